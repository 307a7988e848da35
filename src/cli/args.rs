use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Browse and page through a single SQLite table",
    long_about = "Generic table repository with pagination. Runs one-shot queries or serves the table over HTTP as paginated JSON and HTML.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long = "db",
        env = "TABLE_PAGER_DB",
        default_value = ".table-pager/data.sqlite",
        value_name = "PATH",
        help = "SQLite database file"
    )]
    pub db: String,

    #[arg(
        long,
        env = "TABLE_PAGER_TABLE",
        default_value = "items",
        value_name = "NAME",
        help = "Table the repository is bound to"
    )]
    pub table: String,

    #[arg(
        long = "primary-key",
        env = "TABLE_PAGER_PRIMARY_KEY",
        default_value = "id",
        value_name = "COLUMN",
        help = "Primary-key column of the table"
    )]
    pub primary_key: String,

    #[arg(
        long = "per-page",
        default_value_t = 20u64,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Default page size"
    )]
    pub per_page: u64,

    #[arg(
        long = "log-file",
        env = "TABLE_PAGER_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "api-listen",
        env = "TABLE_PAGER_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8083",
        help = "HTTP listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
