// src/backup/mod.rs
//! Database dumps.
//!
//! Shells out to the backend's dump tool (`mysqldump` or `pg_dump`) and
//! streams its output straight into a timestamped `.sql` file. The call waits
//! for the tool to finish; there is deliberately no timeout or retry around
//! it. Unsupported backends fail before any file is created.

use anyhow::{bail, Context, Result};
use chrono::Local;
use glob::glob;
use serde::Deserialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;
use tracing::info;

/// Database backends we know how to dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbEngine {
    Mysql,
    Postgres,
}

impl DbEngine {
    fn tool(self) -> &'static str {
        match self {
            DbEngine::Mysql => "mysqldump",
            DbEngine::Postgres => "pg_dump",
        }
    }
}

impl FromStr for DbEngine {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(DbEngine::Mysql),
            "postgres" | "postgresql" => Ok(DbEngine::Postgres),
            other => bail!("unsupported database backend: {other:?}"),
        }
    }
}

/// Connection parameters for the database to dump. Deserialized from the
/// `[database]` table of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub engine: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Pick the backup directory: the explicit one if given (e.g. from
/// `DB_BACKUP_DIR` or the config file), otherwise `<home>/tmp/<app_name>`.
pub fn resolve_backup_dir(
    explicit: Option<PathBuf>,
    app_name: &str,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let home = home.context("could not determine home directory for default backup dir")?;
    Ok(home.join("tmp").join(app_name))
}

fn dump_command(engine: DbEngine, cfg: &DatabaseConfig) -> Command {
    let mut cmd = Command::new(engine.tool());
    match engine {
        DbEngine::Mysql => {
            cmd.arg("-u").arg(&cfg.user);
            if !cfg.password.is_empty() {
                cmd.arg(format!("-p{}", cfg.password));
            }
            if let Some(host) = &cfg.host {
                cmd.arg("-h").arg(host);
            }
            if let Some(port) = cfg.port {
                cmd.arg("-P").arg(port.to_string());
            }
            cmd.arg(&cfg.name);
        }
        DbEngine::Postgres => {
            cmd.arg("-Fc").arg("-U").arg(&cfg.user);
            if let Some(host) = &cfg.host {
                cmd.arg("-h").arg(host);
            }
            if let Some(port) = cfg.port {
                cmd.arg("-p").arg(port.to_string());
            }
            cmd.arg(&cfg.name);
            if !cfg.password.is_empty() {
                cmd.env("PGPASSWORD", &cfg.password);
            }
        }
    }
    cmd
}

/// Dump `cfg`'s database into `backup_dir`, creating the directory if needed.
///
/// The file is named `<dbname>.<YYYYMMDD-HHMM>.sql`. Both stdout and stderr
/// of the dump tool go into the file, matching how the tools are normally
/// shelled. On any failure after the file is created, the partial file is
/// removed so a bad run leaves nothing behind. Returns the written path.
pub fn dump_database(cfg: &DatabaseConfig, backup_dir: &Path) -> Result<PathBuf> {
    // parse the engine first so unsupported backends touch nothing on disk
    let engine: DbEngine = cfg.engine.parse()?;

    fs::create_dir_all(backup_dir)
        .with_context(|| format!("failed to create backup dir {}", backup_dir.display()))?;

    let stamp = Local::now().format("%Y%m%d-%H%M");
    let backup_path = backup_dir.join(format!("{}.{}.sql", cfg.name, stamp));

    info!(tool = engine.tool(), path = %backup_path.display(), "dumping database");
    if let Err(err) = run_dump(engine, cfg, &backup_path) {
        let _ = fs::remove_file(&backup_path);
        return Err(err);
    }
    Ok(backup_path)
}

fn run_dump(engine: DbEngine, cfg: &DatabaseConfig, backup_path: &Path) -> Result<()> {
    let out = File::create(backup_path)
        .with_context(|| format!("could not create {}", backup_path.display()))?;
    let err = out
        .try_clone()
        .with_context(|| format!("could not reopen {}", backup_path.display()))?;

    let status = dump_command(engine, cfg)
        .stdin(Stdio::null())
        .stdout(Stdio::from(out))
        .stderr(Stdio::from(err))
        .status()
        .with_context(|| format!("failed to run {}", engine.tool()))?;

    if !status.success() {
        bail!("{} exited with {}", engine.tool(), status);
    }
    Ok(())
}

/// Existing `*.sql` dumps in `dir`, sorted so the newest stamp comes last.
pub fn list_backups(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.sql", dir.display());
    let mut paths: Vec<PathBuf> = glob(&pattern)
        .context("invalid glob pattern for backup dir")?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}
