use clap::Parser;
use std::path::PathBuf;

/// Server configuration, from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wilayah-server",
    version,
    about = "HTTP API for typo-tolerant Indonesian region search"
)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Compiled region database (see `wilayah build`)
    #[arg(long = "db-path", env = "DB_PATH", default_value = "data/regions.bin")]
    pub db_path: PathBuf,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cfg = ServerConfig::try_parse_from([
            "wilayah-server",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--db-path",
            "/srv/regions.bin",
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:9000");
        assert_eq!(cfg.db_path, PathBuf::from("/srv/regions.bin"));
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(ServerConfig::try_parse_from(["wilayah-server", "--port", "http"]).is_err());
    }
}
