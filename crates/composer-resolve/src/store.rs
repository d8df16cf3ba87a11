//! Override store operations.
//!
//! All operations are pure: the input `InstanceData` is never mutated
//! and a new value is returned, so a single-writer state container can
//! swap states wholesale.

use composer_model::{
    Breakpoint, InstanceData, InteractionState, Overridable, OverrideCategory,
};
use serde_json::Value;

use crate::resolve::{ResolveError, Result};

/// A parsed compound `"breakpointOrState.property"` key.
enum CompoundKey {
    Style(Breakpoint, String),
    State(InteractionState, String),
}

fn parse_compound(category: OverrideCategory, key: &str) -> Result<CompoundKey> {
    let invalid = || ResolveError::InvalidOverrideKey {
        category,
        key: key.to_string(),
    };
    let (head, property) = key.split_once('.').ok_or_else(invalid)?;
    if property.is_empty() {
        return Err(invalid());
    }
    match category {
        OverrideCategory::Styles => {
            let breakpoint = head.parse::<Breakpoint>().map_err(|_| invalid())?;
            Ok(CompoundKey::Style(breakpoint, property.to_string()))
        }
        OverrideCategory::States => {
            let state = head.parse::<InteractionState>().map_err(|_| invalid())?;
            Ok(CompoundKey::State(state, property.to_string()))
        }
        _ => Err(invalid()),
    }
}

/// Store one override value for `element_id`. For `props` the key names
/// the prop; for `styles`/`states` it is compound; for `content` and
/// `visible` it is ignored. The stored entry is always flagged
/// overridden.
pub fn set_override(
    instance: &InstanceData,
    element_id: &str,
    category: OverrideCategory,
    key: &str,
    value: Value,
) -> Result<InstanceData> {
    let mut updated = instance.clone();
    let entry = updated.overrides.entry(element_id.to_string()).or_default();
    match category {
        OverrideCategory::Props => {
            entry.props.insert(key.to_string(), Overridable::set(value));
        }
        OverrideCategory::Styles | OverrideCategory::States => {
            match parse_compound(category, key)? {
                CompoundKey::Style(breakpoint, property) => {
                    entry
                        .styles
                        .entry(breakpoint)
                        .or_default()
                        .insert(property, Overridable::set(value));
                }
                CompoundKey::State(state, property) => {
                    entry
                        .states
                        .entry(state)
                        .or_default()
                        .insert(property, Overridable::set(value));
                }
            }
        }
        OverrideCategory::Content => {
            entry.content = Some(Overridable::set(value));
        }
        OverrideCategory::Visible => {
            entry.visible = Some(Overridable::set(value));
        }
    }
    Ok(updated)
}

/// Remove one override value, or a whole category when `key` is absent.
/// Emptied breakpoint/state maps are pruned, and the element entry is
/// dropped once nothing overridden remains.
pub fn reset_override(
    instance: &InstanceData,
    element_id: &str,
    category: OverrideCategory,
    key: Option<&str>,
) -> Result<InstanceData> {
    let mut updated = instance.clone();
    let Some(entry) = updated.overrides.get_mut(element_id) else {
        return Ok(updated);
    };
    match (category, key) {
        (OverrideCategory::Props, Some(key)) => {
            entry.props.remove(key);
        }
        (OverrideCategory::Props, None) => entry.props.clear(),
        (OverrideCategory::Styles | OverrideCategory::States, Some(key)) => {
            match parse_compound(category, key)? {
                CompoundKey::Style(breakpoint, property) => {
                    if let Some(map) = entry.styles.get_mut(&breakpoint) {
                        map.remove(&property);
                        if map.is_empty() {
                            entry.styles.remove(&breakpoint);
                        }
                    }
                }
                CompoundKey::State(state, property) => {
                    if let Some(map) = entry.states.get_mut(&state) {
                        map.remove(&property);
                        if map.is_empty() {
                            entry.states.remove(&state);
                        }
                    }
                }
            }
        }
        (OverrideCategory::Styles, None) => entry.styles.clear(),
        (OverrideCategory::States, None) => entry.states.clear(),
        (OverrideCategory::Content, _) => entry.content = None,
        (OverrideCategory::Visible, _) => entry.visible = None,
    }
    if entry.is_empty() {
        updated.overrides.remove(element_id);
    }
    Ok(updated)
}

/// Drop every override for `element_id`.
#[must_use = "returns a new InstanceData; the input is unchanged"]
pub fn reset_all_overrides(instance: &InstanceData, element_id: &str) -> InstanceData {
    let mut updated = instance.clone();
    updated.overrides.remove(element_id);
    updated
}

/// Whether a customized value is stored, mirroring the compound-key
/// convention of [`set_override`]. Backs the editor's "is this value
/// customized" indicators.
pub fn has_override(
    instance: &InstanceData,
    element_id: &str,
    category: OverrideCategory,
    key: Option<&str>,
) -> bool {
    let Some(entry) = instance.overrides.get(element_id) else {
        return false;
    };
    match (category, key) {
        (OverrideCategory::Props, Some(key)) => entry.props.contains_key(key),
        (OverrideCategory::Props, None) => !entry.props.is_empty(),
        (OverrideCategory::Styles | OverrideCategory::States, Some(key)) => {
            match parse_compound(category, key) {
                Ok(CompoundKey::Style(breakpoint, property)) => entry
                    .styles
                    .get(&breakpoint)
                    .is_some_and(|map| map.contains_key(&property)),
                Ok(CompoundKey::State(state, property)) => entry
                    .states
                    .get(&state)
                    .is_some_and(|map| map.contains_key(&property)),
                Err(_) => false,
            }
        }
        (OverrideCategory::Styles, None) => !entry.styles.is_empty(),
        (OverrideCategory::States, None) => !entry.states.is_empty(),
        (OverrideCategory::Content, _) => entry.content.is_some(),
        (OverrideCategory::Visible, _) => entry.visible.is_some(),
    }
}

/// Element ids carrying at least one override entry, sorted. Backs the
/// editor's layer-tree decoration.
pub fn overridden_elements(instance: &InstanceData) -> Vec<&str> {
    instance
        .overrides
        .iter()
        .filter(|(_, entry)| !entry.is_empty())
        .map(|(element_id, _)| element_id.as_str())
        .collect()
}
