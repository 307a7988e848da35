use anyhow::{Context as AnyhowContext, Result};

use super::CommandRunner;
use crate::{
    app::wiring,
    cli::Command,
    context,
    render::{PaginationRenderer, RouteParams},
    rest::ROWS_ROUTE,
    types::{filters_from_pairs, row_to_json},
};

/// One-shot read commands against the configured table.
pub struct QueryCommand<'a>(pub &'a Command);

impl CommandRunner for QueryCommand<'_> {
    fn run(&self, ctx: &context::Context) -> Result<()> {
        let repo = wiring::open_repository(ctx)?;
        match self.0 {
            Command::Get { id } => {
                let row = repo
                    .get_by_id(id.clone())
                    .with_context(|| format!("loading {} {:?}", ctx.table, id))?;
                println!("{}", serde_json::to_string_pretty(&row_to_json(&row))?);
            }
            Command::List {
                page,
                per_page,
                columns,
                filters,
            } => {
                let per_page = per_page.unwrap_or(ctx.per_page);
                let filters = filters_from_pairs(filters.iter().cloned());
                let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
                let result = repo
                    .find_paginated_result(&columns, &filters, *page, per_page)
                    .context("loading page")?;

                let renderer = wiring::build_renderer();
                let mut params = RouteParams::new();
                params.insert("per_page".to_string(), per_page.to_string());
                let links = renderer.links(result.pagination(), ROWS_ROUTE, &params)?;

                let out = serde_json::json!({
                    "table": ctx.table,
                    "pagination": result.pagination(),
                    "rows": result.results().iter().map(row_to_json).collect::<Vec<_>>(),
                    "links": links,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            Command::Count { filters } => {
                let filters = filters_from_pairs(filters.iter().cloned());
                let count = repo.find_count(&filters).context("counting rows")?;
                println!("{count}");
            }
            Command::Serve => anyhow::bail!("serve runs as the daemon, not as a one-shot command"),
        }
        Ok(())
    }
}
