//! Variant selection.

use std::collections::BTreeMap;

use composer_model::{ComponentDefinition, Element};
use serde_json::Value;

/// Pick the subtree to resolve for `selected` variant-property values.
///
/// The first variant agreeing with every selected key wins; exact value
/// equality only, no partial matching. An empty selection or an
/// unmatched combination falls back to the base tree (`None`).
pub(crate) fn select_variant<'a>(
    definition: &'a ComponentDefinition,
    selected: &BTreeMap<String, Value>,
) -> Option<&'a Element> {
    if selected.is_empty() {
        return None;
    }
    definition
        .variants
        .iter()
        .find(|variant| {
            selected
                .iter()
                .all(|(key, value)| variant.when.get(key) == Some(value))
        })
        .map(|variant| &variant.element)
}
