//! Deterministic identifier deduplication at library-merge time.
//!
//! Renaming all occurrences of a duplicated identifier, not just the
//! colliding one, keeps identical identifiers from pointing at different
//! content depending on import order.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use composer_model::{ComponentDefinition, Element};
use tracing::debug;

/// Rename every colliding or duplicated-in-batch definition identifier
/// and rewrite all in-batch `componentId` references.
///
/// First pass counts occurrences within the batch. Second pass, in
/// original order, renames any definition whose id collides with
/// `existing_ids` or repeats within the batch to the deterministic
/// `{id}_imported_{millis}_{index}` form; the first occurrence of a
/// repeated id becomes the canonical rewrite target. Third pass rewrites
/// every `componentId` reference through the rename map, recursively
/// over base trees, variant trees, and slot default content.
pub fn deduplicate(
    mut definitions: Vec<ComponentDefinition>,
    existing_ids: &BTreeSet<String>,
    imported_at: DateTime<Utc>,
) -> Vec<ComponentDefinition> {
    let mut occurrences: BTreeMap<String, usize> = BTreeMap::new();
    for definition in &definitions {
        *occurrences.entry(definition.id.clone()).or_insert(0) += 1;
    }

    let millis = imported_at.timestamp_millis();
    let mut used_ids: BTreeSet<String> = existing_ids.clone();
    let mut rename_map: BTreeMap<String, String> = BTreeMap::new();

    for (index, definition) in definitions.iter_mut().enumerate() {
        let original = definition.id.clone();
        let duplicated = occurrences.get(&original).copied().unwrap_or(0) > 1;
        if existing_ids.contains(&original) || duplicated {
            let renamed = format!("{original}_imported_{millis}_{index}");
            debug!(original, renamed, "renaming imported definition");
            // Only the first occurrence becomes the rewrite target;
            // later duplicates get unique ids but no references.
            rename_map
                .entry(original)
                .or_insert_with(|| renamed.clone());
            definition.id = renamed.clone();
            used_ids.insert(renamed);
        } else {
            used_ids.insert(original);
        }
    }

    debug!(
        imported = definitions.len(),
        merged_ids = used_ids.len(),
        renamed = rename_map.len(),
        "import deduplication complete"
    );
    if rename_map.is_empty() {
        return definitions;
    }
    for definition in &mut definitions {
        rewrite_references(&mut definition.element, &rename_map);
        for variant in &mut definition.variants {
            rewrite_references(&mut variant.element, &rename_map);
        }
        for slot in &mut definition.slots {
            for element in &mut slot.default_content {
                rewrite_references(element, &rename_map);
            }
        }
    }
    definitions
}

fn rewrite_references(element: &mut Element, rename_map: &BTreeMap<String, String>) {
    if let Some(data) = element.instance_data_mut() {
        if let Some(renamed) = rename_map.get(&data.component_id) {
            data.component_id = renamed.clone();
        }
        for slot in &mut data.slot_contents {
            for child in &mut slot.content {
                rewrite_references(child, rename_map);
            }
        }
    }
    for child in &mut element.children {
        rewrite_references(child, rename_map);
    }
}
