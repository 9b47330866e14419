use guide_engine::CatalogueError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error("config error: {0}")]
    Config(String),

    #[error("fingerprint error: {0}")]
    Fingerprint(String),
}
