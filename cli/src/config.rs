use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

use caltrack_core::{ClearScope, Database, Persistence, Tracker};

pub struct Config {
    pub db_path: PathBuf,
    pub clear_scope: ClearScope,
}

impl Config {
    /// Resolve the database location, creating its directory if needed.
    /// `db_override` comes from `--db` / `CALTRACK_DB`.
    pub fn load(db_override: Option<PathBuf>, clear_scope: ClearScope) -> Result<Self> {
        let db_path = match db_override {
            Some(path) => path,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "caltrack")
                    .context("Could not determine home directory")?;
                proj_dirs.data_dir().join("caltrack.db")
            }
        };

        if let Some(data_dir) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(data_dir).with_context(|| {
                format!("Failed to create data directory: {}", data_dir.display())
            })?;
        }

        Ok(Config {
            db_path,
            clear_scope,
        })
    }

    pub fn open_tracker(&self) -> Result<Tracker<Database>> {
        let db = Database::open(&self.db_path)?;
        let persistence = Persistence::new(db).with_clear_scope(self.clear_scope);
        Ok(Tracker::start(persistence))
    }
}
