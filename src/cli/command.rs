use clap::Subcommand;
use rusqlite::types::Value;

use crate::types::{parse_filter, parse_scalar};

fn parse_id(raw: &str) -> Result<Value, String> {
    Ok(parse_scalar(raw))
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Fetch one row by primary key")]
    Get {
        #[arg(long, value_name = "VALUE", value_parser = parse_id)]
        id: Value,
    },
    #[command(
        about = "Print one page of rows as JSON",
        long_about = "Print one page of rows, with its pagination and the page links, as JSON. Filters are exact-match and ANDed."
    )]
    List {
        #[arg(long, default_value_t = 1u64, value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
        #[arg(long = "per-page", value_parser = clap::value_parser!(u64).range(1..))]
        per_page: Option<u64>,
        #[arg(long = "column", value_name = "COLUMN", help = "Columns to select (default all)")]
        columns: Vec<String>,
        #[arg(long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, Value)>,
    },
    #[command(about = "Count rows matching the filters")]
    Count {
        #[arg(long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, Value)>,
    },
    #[command(about = "Serve the table over HTTP (default)")]
    Serve,
}
