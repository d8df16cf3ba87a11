//! Override application onto a resolved tree.

use std::collections::BTreeMap;

use composer_model::{Element, ElementOverrides};
use tracing::warn;

use crate::diagnostics::Diagnostic;

/// The prop key textual content overrides are written to.
pub(crate) const CONTENT_PROP: &str = "content";

/// Apply per-element overrides, pre-order. Within one element the
/// categories apply in fixed order: props, styles, states, content,
/// visibility. Only values flagged `isOverridden` take effect; missing
/// breakpoint/state maps on the base are created on demand.
pub(crate) fn apply_overrides(
    element: &mut Element,
    overrides: &BTreeMap<String, ElementOverrides>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Some(entry) = overrides.get(&element.id) {
        apply_element_overrides(element, entry, diagnostics);
    }
    for child in &mut element.children {
        apply_overrides(child, overrides, diagnostics);
    }
}

fn apply_element_overrides(
    element: &mut Element,
    entry: &ElementOverrides,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (key, value) in &entry.props {
        if let Some(value) = value.active() {
            element.props.insert(key.clone(), value.clone());
        }
    }
    for (breakpoint, styles) in &entry.styles {
        // A base map is only created once something is actually flagged;
        // an all-inactive entry must leave no trace in the tree.
        if !styles.values().any(|value| value.is_overridden) {
            continue;
        }
        let target = element.styles.entry(*breakpoint).or_default();
        for (key, value) in styles {
            if let Some(value) = value.active() {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    for (state, styles) in &entry.states {
        if !styles.values().any(|value| value.is_overridden) {
            continue;
        }
        let target = element.states.entry(*state).or_default();
        for (key, value) in styles {
            if let Some(value) = value.active() {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    if let Some(content) = &entry.content
        && let Some(value) = content.active()
    {
        element.props.insert(CONTENT_PROP.to_string(), value.clone());
    }
    if let Some(visible) = &entry.visible
        && let Some(value) = visible.active()
    {
        match value.as_bool() {
            Some(flag) => element.settings.visible = Some(flag),
            None => {
                warn!(element_id = element.id, "visibility override is not a boolean");
                diagnostics.push(Diagnostic::MalformedOverride {
                    element_id: element.id.clone(),
                    detail: format!("visibility override is not a boolean: {value}"),
                });
            }
        }
    }
}
