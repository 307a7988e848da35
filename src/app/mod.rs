pub(crate) mod wiring;

use crate::{cli, context, rest, storage::Filters};
use anyhow::{Context as AnyhowContext, Result};
use tokio_util::sync::CancellationToken;

pub struct App {
    pub ctx: context::Context,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::init(ctx.log_file.as_deref()).context("opening log file")?;
        log::info!("🚀 Starting table-pager");
        log::info!("📂 Database: {}", ctx.db_path.display());
        log::info!("📋 Table: {} (key {})", ctx.table, ctx.primary_key);

        wiring::init_data_dir(&ctx).context("initializing data dir")?;

        Ok((Self { ctx }, cli))
    }

    /// Fail early when the table cannot be read.
    pub fn check_table(&self) -> Result<u64> {
        let repo = wiring::open_repository(&self.ctx)?;
        repo.find_count(&Filters::new())
            .with_context(|| format!("reading table {}", self.ctx.table))
    }
}

pub async fn run_daemon(app: App) -> Result<()> {
    let rows = app.check_table()?;
    log::info!("🧮 Rows: {}", rows);
    log::info!("🧮 Page size: {}", app.ctx.per_page);
    if let Some(path) = app.ctx.log_file.as_deref() {
        log::info!("📝 Log file: {}", path.display());
    }

    let shutdown = CancellationToken::new();
    let state = wiring::build_state(&app.ctx);
    let api_addr = app.ctx.api_listen;
    let rest_shutdown = shutdown.clone();

    let mut rest_handle = tokio::spawn(async move {
        if let Err(e) = rest::serve(api_addr, state, rest_shutdown).await {
            log::error!("REST server error: {:#}", e);
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
        }
        _ = &mut rest_handle => {
            log::error!("REST task exited unexpectedly");
        }
    }

    shutdown.cancel();
    if !rest_handle.is_finished() {
        rest_handle.await.context("joining REST task")?;
    }

    log::info!("✅ Shutdown complete");
    Ok(())
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    match &cli.cmd {
        None | Some(cli::Command::Serve) => run_daemon(app).await,
        Some(cmd) => cmd.run(&app.ctx),
    }
}
