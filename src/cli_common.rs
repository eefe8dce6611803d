//! Pieces shared by the command line tools.

use crate::config::{AppConfig, CliConfig, FileConfig};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Options every tool accepts.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory holding catalog.db and user.db.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// Path to a TOML config file. Values in it override command line flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Email domain for users created on the fly.
    #[clap(long)]
    pub placeholder_email_domain: Option<String>,
}

impl CommonArgs {
    pub fn resolve(&self) -> Result<AppConfig> {
        let file_config = match &self.config {
            Some(path) => Some(FileConfig::load(path)?),
            None => None,
        };
        let cli = CliConfig {
            db_dir: self.db_dir.clone(),
            placeholder_email_domain: self.placeholder_email_domain.clone(),
        };
        AppConfig::resolve(&cli, file_config)
    }
}

/// Logs to stderr, INFO unless `LOG_LEVEL` says otherwise.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_path_makes_relative_paths_absolute() {
        let path = parse_path("some/relative/file.csv").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("some/relative/file.csv"));
    }

    #[test]
    fn resolve_without_config_file_uses_flags() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let args = CommonArgs {
            db_dir: Some(temp_dir.path().to_path_buf()),
            config: None,
            placeholder_email_domain: Some("flags.test".to_string()),
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.placeholder_email_domain, "flags.test");
    }
}
