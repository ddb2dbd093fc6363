//! Runtime configuration for the admin server.
//!
//! Every setting can be given as a command-line flag or through the matching
//! `ISP_*` environment variable; the flag wins when both are present.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "isp-admin")]
#[command(about = "Package and subscriber administration for a small ISP")]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long, env = "ISP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "ISP_PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database file. Created on first start.
    #[arg(long, env = "ISP_DATABASE", default_value = "isp_admin.sqlite")]
    pub database: PathBuf,

    /// Root directory for uploaded files, served read-only under `/storage`.
    #[arg(long, env = "ISP_STORAGE_DIR", default_value = "storage")]
    pub storage_dir: PathBuf,

    /// Largest ID card photo accepted from the client forms, in bytes.
    #[arg(long, env = "ISP_MAX_PHOTO_BYTES", default_value_t = 5 * 1024 * 1024)]
    pub max_photo_bytes: usize,

    /// Insert the demo package catalog and demo clients when the database is empty.
    #[arg(long, env = "ISP_SEED")]
    pub seed: bool,

    /// Open the admin UI in the default browser once the server is up.
    #[arg(long, env = "ISP_OPEN_BROWSER")]
    pub open_browser: bool,
}

impl Config {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let config = Config::try_parse_from(["isp-admin"]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database, PathBuf::from("isp_admin.sqlite"));
        assert_eq!(config.storage_dir, PathBuf::from("storage"));
        assert_eq!(config.max_photo_bytes, 5 * 1024 * 1024);
        assert!(!config.seed);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "isp-admin",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--seed",
            "--max-photo-bytes",
            "1024",
        ])
        .unwrap();
        assert_eq!(config.url(), "http://0.0.0.0:9000");
        assert_eq!(config.max_photo_bytes, 1024);
        assert!(config.seed);
    }
}
