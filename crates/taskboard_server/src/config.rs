//! Gateway process configuration.
//!
//! Every flag falls back to a `TASKBOARD_*` environment variable.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "taskboard", version, about = "Task list gateway and browser UI")]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "TASKBOARD_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// SQLite database file; `:memory:` keeps tasks in memory only.
    #[arg(long, env = "TASKBOARD_DB_PATH", default_value = "taskboard.sqlite3")]
    pub db_path: PathBuf,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "TASKBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when unset.
    #[arg(long, env = "TASKBOARD_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(taskboard_core::default_log_level())
    }

    /// Starts process logging according to this config.
    pub fn init_logging(&self) -> Result<(), String> {
        let level = self.effective_log_level();
        match self.log_dir.as_deref() {
            Some(dir) => taskboard_core::init_logging(level, dir),
            None => taskboard_core::init_stderr_logging(level),
        }
    }
}
