#[tokio::main]
async fn main() -> anyhow::Result<()> {
    table_pager::app::run().await
}
