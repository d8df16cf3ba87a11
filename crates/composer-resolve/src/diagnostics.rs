//! Structured resolution diagnostics.
//!
//! Fallback paths that used to be silent (unmatched variant, empty slot,
//! dangling targets) are reported here so the editor can surface stale
//! instance hints without string-matching log output. None of these abort
//! a resolution.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// The selected variant combination matched no authored variant; the
    /// base tree was used instead.
    VariantFallback { selected: BTreeMap<String, Value> },
    /// A slot had neither instance-supplied nor definition-default
    /// content and collapsed to nothing.
    EmptySlot { name: String },
    /// An override entry targets an identifier absent from the resolved
    /// tree. Inert, kept in storage.
    DanglingOverride { element_id: String },
    /// A prop binding targets an identifier absent from the resolved tree.
    DanglingPropBinding { prop: String, element_id: String },
    /// An override value did not fit its category and was skipped.
    MalformedOverride { element_id: String, detail: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::VariantFallback { selected } => {
                write!(f, "no variant matches selection {selected:?}; using base tree")
            }
            Diagnostic::EmptySlot { name } => write!(f, "slot '{name}' has no content"),
            Diagnostic::DanglingOverride { element_id } => {
                write!(f, "override targets unknown element '{element_id}'")
            }
            Diagnostic::DanglingPropBinding { prop, element_id } => {
                write!(f, "prop '{prop}' binds to unknown element '{element_id}'")
            }
            Diagnostic::MalformedOverride { element_id, detail } => {
                write!(f, "malformed override on '{element_id}': {detail}")
            }
        }
    }
}
