use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime settings resolved from CLI flags, environment and `.env`.
#[derive(Clone, Debug)]
pub struct Context {
    pub db_path: PathBuf,
    pub table: String,
    pub primary_key: String,
    pub per_page: u64,
    pub api_listen: SocketAddr,
    pub log_file: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            db_path: PathBuf::from(&cli.db),
            table: cli.table.clone(),
            primary_key: cli.primary_key.clone(),
            per_page: cli.per_page,
            api_listen: cli.api_listen,
            log_file: cli.log_file.as_ref().map(PathBuf::from),
        }
    }
}
