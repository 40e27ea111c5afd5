use crate::constants::{DATA_DIR_ENV, LOG_FILE_NAME, STORE_FILE_NAME};
use crate::error::{QuickLinksError, Result};

use directories::ProjectDirs;
use std::path::PathBuf;

/// Where the link store and the log file live.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub store_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    pub fn from_dir(data_dir: PathBuf) -> Self {
        Self {
            store_path: data_dir.join(STORE_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
            data_dir,
        }
    }

    /// Resolve the data directory: `QUICK_LINKS_DATA_DIR` wins, then the
    /// platform data dir.
    pub fn load() -> Result<Self> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::from_dir(PathBuf::from(dir)));
        }
        let dirs = ProjectDirs::from("", "", "quick-links").ok_or_else(|| {
            QuickLinksError::Config("could not determine a home directory".to_string())
        })?;
        Ok(Self::from_dir(dirs.data_dir().to_path_buf()))
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}
