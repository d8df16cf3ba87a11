use thiserror::Error;

/// Import rejection reasons. All are raised before any mutation is
/// attempted; an import either lands wholesale or not at all. The three
/// variants map to distinct client-visible messages in the hosting layer.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported export version '{found}' (expected 1.0)")]
    VersionMismatch { found: String },

    #[error("import contains no components")]
    Empty,

    #[error("structural validation failed at {path}: {message}")]
    StructuralInvalid { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, ImportError>;
