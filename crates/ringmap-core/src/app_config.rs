use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The subset of settings the command-line tool reads.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub log_level: String,
    pub sites_path: PathBuf,
    /// Outer radius of each ring in meters, innermost first.
    pub ring_radii_m: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub sites_path: PathBuf,
    /// Outer radius of each ring in meters, innermost first.
    pub ring_radii_m: Vec<f64>,
    pub rate_limit_per_minute: usize,
}
