// src/config.rs
//! Host configuration for the `dumpdb` binary: database connection parameters
//! and an optional backup directory, loaded from a TOML file.
//!
//! ```toml
//! [database]
//! engine = "postgres"
//! name = "appdb"
//! user = "app"
//! password = "hunter2"
//!
//! [backup]
//! dir = "/var/backups/appdb"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backup::DatabaseConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub backup: BackupConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Target directory for dumps. `DB_BACKUP_DIR` in the environment wins
    /// over this; the home-derived default is the last resort.
    pub dir: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// `<user config dir>/junkdrawer/config.toml`, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("junkdrawer").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_a_full_config() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(
            tmp,
            r#"
[database]
engine = "postgres"
name = "appdb"
user = "app"
password = "hunter2"
host = "db.internal"
port = 5433

[backup]
dir = "/var/backups/appdb"
"#
        )?;
        tmp.flush()?;

        let cfg = Config::load(tmp.path())?;
        assert_eq!(cfg.database.engine, "postgres");
        assert_eq!(cfg.database.name, "appdb");
        assert_eq!(cfg.database.port, Some(5433));
        assert_eq!(cfg.backup.dir.as_deref(), Some(Path::new("/var/backups/appdb")));
        Ok(())
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, "[database]\nengine = \"mysql\"\nname = \"appdb\"\nuser = \"app\"\n")?;
        tmp.flush()?;

        let cfg = Config::load(tmp.path())?;
        assert_eq!(cfg.database.password, "");
        assert!(cfg.backup.dir.is_none());
        Ok(())
    }

    #[test]
    fn unreadable_config_is_an_error() {
        assert!(Config::load(Path::new("/no/such/config.toml")).is_err());
    }
}
