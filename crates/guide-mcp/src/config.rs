use std::path::{Path, PathBuf};

use guide_engine::catalogue::CATALOGUE_FILES;

use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
///
/// No defaults are assumed for paths; the caller must provide them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Filesystem path to the catalogue data directory containing the five
    /// collection files (tasks, qualities, risks, categories, methods).
    pub catalogue_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GUIDE_CATALOGUE_PATH`: path to the catalogue data directory
    pub fn from_env() -> Result<Self, AppError> {
        let catalogue_path = std::env::var("GUIDE_CATALOGUE_PATH").map_err(|_| {
            AppError::Config("GUIDE_CATALOGUE_PATH environment variable is required".to_string())
        })?;

        for file in CATALOGUE_FILES {
            let path = Path::new(&catalogue_path).join(file);
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "catalogue file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(Self { catalogue_path })
    }

    pub fn catalogue_dir(&self) -> PathBuf {
        PathBuf::from(&self.catalogue_path)
    }
}
