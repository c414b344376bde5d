//! Server configuration from command-line flags and `GOALBOARD_*` variables.

use crate::error::{GoalboardError, Result};
use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Where board data lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Process memory; lost on exit
    Memory,
    /// One JSON document per entity under the data directory
    File,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "goalboard", version, about = "Goal-tracking kanban board API server")]
pub struct ServerConfig {
    /// Interface address to listen on
    #[arg(long, env = "GOALBOARD_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "GOALBOARD_PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long, env = "GOALBOARD_STORAGE", value_enum, default_value_t = StorageBackend::Memory)]
    pub storage: StorageBackend,

    /// Root directory for the file backend
    #[arg(long, env = "GOALBOARD_DATA_DIR", default_value = ".goalboard")]
    pub data_dir: PathBuf,

    /// Start the memory backend empty instead of with the sample board
    #[arg(long, env = "GOALBOARD_NO_SEED")]
    pub no_seed: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "GOALBOARD_LOG_JSON")]
    pub log_json: bool,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "GOALBOARD_PERMISSIVE_CORS")]
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            storage: StorageBackend::Memory,
            data_dir: PathBuf::from(".goalboard"),
            no_seed: false,
            log_json: false,
            permissive_cors: false,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind; `host` must be a literal IP address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            GoalboardError::ConfigError(format!("invalid host address '{}'", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
