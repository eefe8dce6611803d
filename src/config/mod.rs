mod file_config;

pub use file_config::{FileConfig, ImportFileConfig};

use crate::catalog_store::CATALOG_DB_FILE_NAME;
use crate::import::{ImportSettings, UNKNOWN_FORMAT_NAME, UNKNOWN_LABEL_NAME};
use crate::user::USER_DB_FILE_NAME;
use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_PLACEHOLDER_EMAIL_DOMAIN: &str = "example.com";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub placeholder_email_domain: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub placeholder_email_domain: String,
    pub import: ImportSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();
        let import_file = file.import.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let placeholder_email_domain = import_file
            .placeholder_email_domain
            .or_else(|| cli.placeholder_email_domain.clone())
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER_EMAIL_DOMAIN.to_string());
        if placeholder_email_domain.trim().is_empty() {
            bail!("placeholder_email_domain cannot be empty");
        }

        let import = ImportSettings {
            unknown_label_name: import_file
                .unknown_label_name
                .unwrap_or_else(|| UNKNOWN_LABEL_NAME.to_string()),
            unknown_format_name: import_file
                .unknown_format_name
                .unwrap_or_else(|| UNKNOWN_FORMAT_NAME.to_string()),
        };
        if import.unknown_label_name.trim().is_empty()
            || import.unknown_format_name.trim().is_empty()
        {
            bail!("Fallback label and format names cannot be empty");
        }

        Ok(Self {
            db_dir,
            placeholder_email_domain,
            import,
        })
    }

    pub fn catalog_db_path(&self) -> PathBuf {
        self.db_dir.join(CATALOG_DB_FILE_NAME)
    }

    pub fn user_db_path(&self) -> PathBuf {
        self.db_dir.join(USER_DB_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_cli_only() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_dir: Some(temp_dir.path().to_path_buf()),
            placeholder_email_domain: Some("vinyl.test".to_string()),
        };

        let config = AppConfig::resolve(&cli, None).unwrap();
        assert_eq!(config.db_dir, temp_dir.path());
        assert_eq!(config.placeholder_email_domain, "vinyl.test");
        assert_eq!(config.import.unknown_label_name, "Unknown Label");
        assert_eq!(config.import.unknown_format_name, "Unknown");
        assert_eq!(config.catalog_db_path(), temp_dir.path().join("catalog.db"));
        assert_eq!(config.user_db_path(), temp_dir.path().join("user.db"));
    }

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(&CliConfig::default(), None).unwrap();
        assert_eq!(config.db_dir, PathBuf::from("."));
        assert_eq!(config.placeholder_email_domain, "example.com");
    }

    #[test]
    fn test_file_overrides_cli() {
        let cli_dir = TempDir::new().unwrap();
        let file_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_dir: Some(cli_dir.path().to_path_buf()),
            placeholder_email_domain: Some("cli.test".to_string()),
        };
        let file = FileConfig {
            db_dir: Some(file_dir.path().to_string_lossy().to_string()),
            import: Some(ImportFileConfig {
                placeholder_email_domain: Some("file.test".to_string()),
                unknown_label_name: Some("Not On Label".to_string()),
                unknown_format_name: None,
            }),
        };

        let config = AppConfig::resolve(&cli, Some(file)).unwrap();
        assert_eq!(config.db_dir, file_dir.path());
        assert_eq!(config.placeholder_email_domain, "file.test");
        assert_eq!(config.import.unknown_label_name, "Not On Label");
        assert_eq!(config.import.unknown_format_name, "Unknown");
    }

    #[test]
    fn test_missing_db_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_dir: Some(temp_dir.path().join("nope")),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_db_dir_must_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("catalog.db");
        std::fs::write(&file_path, b"").unwrap();
        let cli = CliConfig {
            db_dir: Some(file_path),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_empty_fallback_name_fails() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_dir: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let file = FileConfig {
            db_dir: None,
            import: Some(ImportFileConfig {
                unknown_format_name: Some("  ".to_string()),
                ..Default::default()
            }),
        };
        assert!(AppConfig::resolve(&cli, Some(file)).is_err());
    }
}
