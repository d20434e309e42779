// src/bin/dumpdb.rs
//! Dump the configured database to a timestamped file.
//!
//! Usage: `dumpdb [config.toml]`. The backup directory is `DB_BACKUP_DIR`
//! if set, then the config's `backup.dir`, then `~/tmp/<dbname>`. On success
//! the path of the dump is printed to stdout so scripts can pick it up.

use anyhow::{Context, Result};
use junkdrawer::{backup, config::Config};
use std::path::PathBuf;
use std::{env, process};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    if let Err(err) = run() {
        eprintln!("dumpdb: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(Config::default_path)
        .context("no config path given and no user config directory found")?;
    let config = Config::load(&config_path)?;

    let explicit = env::var_os("DB_BACKUP_DIR")
        .map(PathBuf::from)
        .or_else(|| config.backup.dir.clone());
    let backup_dir =
        backup::resolve_backup_dir(explicit, &config.database.name, dirs::home_dir())?;

    info!(dir = %backup_dir.display(), db = %config.database.name, "backing up database");
    let path = backup::dump_database(&config.database, &backup_dir)?;

    // print the path so other scripts can use it
    println!("{}", path.display());
    Ok(())
}
