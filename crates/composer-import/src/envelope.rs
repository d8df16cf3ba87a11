//! The versioned export envelope.
//!
//! Validation runs against the raw JSON value, fail-fast with the first
//! offending path, so a rejected envelope never half-materializes into
//! typed definitions.

use chrono::{DateTime, Utc};
use composer_model::ComponentDefinition;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ImportError, Result};

/// The only envelope version this build reads or writes.
pub const ENVELOPE_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub components: Vec<ComponentDefinition>,
}

/// Wrap definitions for export.
pub fn export_components(
    definitions: &[ComponentDefinition],
    now: DateTime<Utc>,
) -> ExportEnvelope {
    ExportEnvelope {
        version: ENVELOPE_VERSION.to_string(),
        exported_at: now,
        components: definitions.to_vec(),
    }
}

/// Validate a raw envelope value and parse it into typed definitions.
///
/// Rejects, in order: a version that is not exactly [`ENVELOPE_VERSION`],
/// a missing/empty components list, and the first element that lacks a
/// string `id`/`type` or carries a non-list `children`.
pub fn parse_envelope(value: &Value) -> Result<ExportEnvelope> {
    let Some(envelope) = value.as_object() else {
        return Err(structural("envelope", "expected an object"));
    };

    let version = envelope
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if version != ENVELOPE_VERSION {
        return Err(ImportError::VersionMismatch {
            found: version.to_string(),
        });
    }

    let components = match envelope.get("components") {
        None | Some(Value::Null) => return Err(ImportError::Empty),
        Some(Value::Array(components)) if components.is_empty() => return Err(ImportError::Empty),
        Some(Value::Array(components)) => components,
        Some(_) => return Err(structural("components", "expected a list")),
    };

    for (index, component) in components.iter().enumerate() {
        let path = format!("components[{index}]");
        let Some(object) = component.as_object() else {
            return Err(structural(&path, "expected an object"));
        };
        require_string(object.get("id"), &format!("{path}.id"))?;
        require_string(object.get("name"), &format!("{path}.name"))?;
        let Some(element) = object.get("element") else {
            return Err(structural(&format!("{path}.element"), "missing element tree"));
        };
        validate_element(element, &format!("{path}.element"))?;
        if let Some(variants) = object.get("variants") {
            let Some(variants) = variants.as_array() else {
                return Err(structural(&format!("{path}.variants"), "expected a list"));
            };
            for (v, variant) in variants.iter().enumerate() {
                let variant_path = format!("{path}.variants[{v}].element");
                let Some(element) = variant.get("element") else {
                    return Err(structural(&variant_path, "missing element tree"));
                };
                validate_element(element, &variant_path)?;
            }
        }
        if let Some(slots) = object.get("slots") {
            let Some(slots) = slots.as_array() else {
                return Err(structural(&format!("{path}.slots"), "expected a list"));
            };
            for (s, slot) in slots.iter().enumerate() {
                if let Some(content) = slot.get("defaultContent") {
                    let slot_path = format!("{path}.slots[{s}].defaultContent");
                    let Some(content) = content.as_array() else {
                        return Err(structural(&slot_path, "expected a list"));
                    };
                    for (c, child) in content.iter().enumerate() {
                        validate_element(child, &format!("{slot_path}[{c}]"))?;
                    }
                }
            }
        }
    }

    serde_json::from_value(value.clone()).map_err(|err| ImportError::StructuralInvalid {
        path: "envelope".to_string(),
        message: err.to_string(),
    })
}

fn validate_element(value: &Value, path: &str) -> Result<()> {
    let Some(object) = value.as_object() else {
        return Err(structural(path, "expected an object"));
    };
    require_string(object.get("id"), &format!("{path}.id"))?;
    require_string(object.get("type"), &format!("{path}.type"))?;
    if let Some(children) = object.get("children") {
        let Some(children) = children.as_array() else {
            return Err(structural(&format!("{path}.children"), "expected a list"));
        };
        for (index, child) in children.iter().enumerate() {
            validate_element(child, &format!("{path}.children[{index}]"))?;
        }
    }
    Ok(())
}

fn require_string(value: Option<&Value>, path: &str) -> Result<()> {
    match value.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(()),
        Some(_) => Err(structural(path, "must not be empty")),
        None => Err(structural(path, "expected a string")),
    }
}

fn structural(path: &str, message: &str) -> ImportError {
    ImportError::StructuralInvalid {
        path: path.to_string(),
        message: message.to_string(),
    }
}
