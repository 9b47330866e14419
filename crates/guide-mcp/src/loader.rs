/// Catalogue loading and change detection.
///
/// The catalogue files are read once at startup. The `reload_catalogue` tool
/// re-reads them only when the content fingerprint (sha256 over the five
/// files, in a fixed order) differs from the one loaded.
use sha2::{Digest, Sha256};
use tracing::info;

use guide_engine::catalogue::{Catalogue, CATALOGUE_FILES};

use crate::config::Config;
use crate::error::AppError;

pub struct CatalogueLoader {
    config: Config,
}

impl CatalogueLoader {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Hex sha256 digest over the concatenated catalogue files.
    pub fn fingerprint(&self) -> Result<String, AppError> {
        let dir = self.config.catalogue_dir();
        let mut hasher = Sha256::new();
        for file in CATALOGUE_FILES {
            let path = dir.join(file);
            let content = std::fs::read(&path).map_err(|e| {
                AppError::Fingerprint(format!("failed to read {}: {e}", path.display()))
            })?;
            hasher.update(file.as_bytes());
            hasher.update(&content);
        }
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Read and validate the catalogue, returning it with its fingerprint.
    pub fn load(&self) -> Result<(Catalogue, String), AppError> {
        let fingerprint = self.fingerprint()?;
        let catalogue = Catalogue::load_dir(&self.config.catalogue_dir())?;
        info!(%fingerprint, "catalogue read from disk");
        Ok((catalogue, fingerprint))
    }
}
