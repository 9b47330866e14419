use std::path::PathBuf;

/// Errors raised while loading or validating the catalogue.
///
/// The engine itself never errors after a catalogue is built: unknown ids
/// resolve to omissions and missing coverage data contributes weight 0.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("method {method_id} lists {entry_id} more than once")]
    DuplicateCoverageEntry { method_id: String, entry_id: String },
}
