//! Prop-to-element binding.

use composer_model::{ComponentDefinition, Element, InstanceData};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::diagnostics::Diagnostic;
use crate::tree::find_element_mut;

/// Write each bound prop's effective value into its target element.
///
/// Effective value is the instance's `propValues` entry, else the prop's
/// default; a prop with neither is skipped outright. Targets are matched
/// by identifier only.
pub(crate) fn apply_prop_bindings(
    root: &mut Element,
    definition: &ComponentDefinition,
    instance: &InstanceData,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for prop in &definition.props {
        let Some(binding) = &prop.bind_to else {
            continue;
        };
        let value = instance
            .prop_values
            .get(&prop.key)
            .or(prop.default.as_ref());
        let Some(value) = value else {
            continue;
        };
        let Some(target) = find_element_mut(root, &binding.element_id) else {
            debug!(
                prop = prop.key,
                element_id = binding.element_id,
                "prop binding target not in resolved tree"
            );
            diagnostics.push(Diagnostic::DanglingPropBinding {
                prop: prop.key.clone(),
                element_id: binding.element_id.clone(),
            });
            continue;
        };
        write_prop_path(target, &binding.path, value.clone());
    }
}

/// Write `value` under a dotted path rooted at the element's props.
/// Missing intermediate segments are created as empty objects; an
/// existing non-object intermediate aborts the write.
fn write_prop_path(element: &mut Element, path: &str, value: Value) {
    let Some((first, rest)) = split_path(path) else {
        return;
    };
    if rest.is_empty() {
        element.props.insert(first.to_string(), value);
        return;
    }
    let slot = element
        .props
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let mut current = slot;
    for (index, segment) in rest.iter().enumerate() {
        let Value::Object(map) = current else {
            warn!(path, "prop binding path hits a non-object value");
            return;
        };
        if index == rest.len() - 1 {
            map.insert((*segment).to_string(), value);
            return;
        }
        current = map
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

fn split_path(path: &str) -> Option<(&str, Vec<&str>)> {
    let mut segments = path.split('.').filter(|segment| !segment.is_empty());
    let first = segments.next()?;
    Some((first, segments.collect()))
}
