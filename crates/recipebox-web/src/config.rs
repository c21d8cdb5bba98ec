//! Server configuration
//!
//! Every option can be given as a flag or through a `RECIPEBOX_*` variable.

use clap::Parser;
use recipebox_core::logging_facility::Profile;
use recipebox_store::StoreConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "recipebox")]
#[command(about = "Recipebox - a small recipe list served over HTTP", long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "RECIPEBOX_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: SocketAddr,

    /// Directory holding the database file (created if missing)
    #[arg(long, env = "RECIPEBOX_DATA_DIR", default_value = "./.data")]
    pub data_dir: PathBuf,

    /// Database file name inside the data directory
    #[arg(long, env = "RECIPEBOX_DB_FILE", default_value = "db.sqlite")]
    pub db_file: String,

    /// Directory served under /static/
    #[arg(long, env = "RECIPEBOX_STATIC_DIR", default_value = "./static")]
    pub static_dir: PathBuf,

    /// Log output: dev (human readable) or json
    #[arg(long, env = "RECIPEBOX_LOG_FORMAT", default_value = "dev")]
    pub log_format: Profile,

    /// Milliseconds a write waits on a locked database before failing
    #[arg(long, env = "RECIPEBOX_BUSY_TIMEOUT_MS", default_value_t = 5000)]
    pub busy_timeout_ms: u64,

    /// Keep SQLite's rollback journal instead of switching to WAL
    #[arg(long, env = "RECIPEBOX_NO_WAL")]
    pub no_wal: bool,
}

impl ServerConfig {
    /// Store settings derived from this configuration
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            data_dir: self.data_dir.clone(),
            file_name: self.db_file.clone(),
            wal: !self.no_wal,
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
        }
    }
}
