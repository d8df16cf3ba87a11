//! Import/export boundary for component libraries.
//!
//! Consumes and produces the versioned export envelope, validates it
//! fail-fast before any mutation, and deduplicates definition
//! identifiers against the receiving library while preserving every
//! in-batch cross-reference.

pub mod dedupe;
pub mod envelope;
pub mod error;

use chrono::{DateTime, Utc};
use composer_model::{ComponentDefinition, DefinitionLibrary};

pub use dedupe::deduplicate;
pub use envelope::{ENVELOPE_VERSION, ExportEnvelope, export_components, parse_envelope};
pub use error::{ImportError, Result};

/// Validate an envelope and produce definitions safe to insert into
/// `library`: every id unique against the library and within the batch,
/// every in-batch reference still resolving.
pub fn import_components(
    envelope: &ExportEnvelope,
    library: &DefinitionLibrary,
    imported_at: DateTime<Utc>,
) -> Result<Vec<ComponentDefinition>> {
    if envelope.version != ENVELOPE_VERSION {
        return Err(ImportError::VersionMismatch {
            found: envelope.version.clone(),
        });
    }
    if envelope.components.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(deduplicate(
        envelope.components.clone(),
        &library.ids(),
        imported_at,
    ))
}
