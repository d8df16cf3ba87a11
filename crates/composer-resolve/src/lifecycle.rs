//! Instance lifecycle: creation, sync against a newer definition, and
//! detachment into a standalone tree.

use chrono::{DateTime, Utc};
use composer_model::{
    ComponentDefinition, DefinitionLibrary, Element, ElementKind, InstanceData,
};
use tracing::debug;

use crate::resolve::{Result, resolve};
use crate::tree::{collect_ids, fresh_element_id, fresh_instance_id, regenerate_ids, walk};

/// The type tag instance elements carry.
pub const INSTANCE_TYPE: &str = "componentInstance";

/// Create a fresh placement of `definition`: new identifiers, empty
/// overrides, synced as of `now`.
pub fn create_component_instance(
    definition: &ComponentDefinition,
    now: DateTime<Utc>,
) -> Element {
    let mut element = Element::new(fresh_element_id(), INSTANCE_TYPE);
    element.kind = ElementKind::Instance {
        instance_data: InstanceData::new(definition.id.clone(), fresh_instance_id(), Some(now)),
    };
    element
}

/// Whether the definition changed since the instance last synced. Both
/// timestamps are required; without data this never prompts a sync.
pub fn needs_sync(instance: &InstanceData, definition: &ComponentDefinition) -> bool {
    match (definition.updated_at, instance.last_synced_at) {
        (Some(updated_at), Some(last_synced_at)) => updated_at > last_synced_at,
        _ => false,
    }
}

/// Acknowledge the current definition state. Overrides are preserved
/// as-is; reconciling them against a structurally changed base is the
/// caller's call, via [`prune_dangling_overrides`].
pub fn sync_instance(
    instance: &InstanceData,
    _definition: &ComponentDefinition,
    now: DateTime<Utc>,
) -> InstanceData {
    let mut updated = instance.clone();
    updated.last_synced_at = Some(now);
    updated
}

/// Drop override entries whose target identifier exists in neither the
/// base tree, any variant tree, any slot default content, nor the
/// instance's own slot content. Returns the pruned instance data
/// together with the removed ids.
///
/// Instance-supplied slot content counts: its elements land in the
/// resolved tree, so overrides targeting them are live, not dangling.
///
/// Never invoked implicitly by [`sync_instance`]; dangling entries are
/// inert during resolution, so keeping them is always safe.
pub fn prune_dangling_overrides(
    instance: &InstanceData,
    definition: &ComponentDefinition,
) -> (InstanceData, Vec<String>) {
    let mut known = collect_ids(&definition.element);
    for variant in &definition.variants {
        known.extend(collect_ids(&variant.element));
    }
    for slot in &definition.slots {
        for element in &slot.default_content {
            walk(element, &mut |node| {
                known.insert(node.id.clone());
            });
        }
    }
    for slot in &instance.slot_contents {
        for element in &slot.content {
            walk(element, &mut |node| {
                known.insert(node.id.clone());
            });
        }
    }

    let mut updated = instance.clone();
    let mut pruned = Vec::new();
    updated.overrides.retain(|element_id, _| {
        let keep = known.contains(element_id);
        if !keep {
            pruned.push(element_id.clone());
        }
        keep
    });
    if !pruned.is_empty() {
        debug!(count = pruned.len(), "pruned dangling overrides");
    }
    (updated, pruned)
}

/// Convert an instance into a standalone tree: resolve it fully, strip
/// the instance reference, and regenerate every identifier. No external
/// reference into the fresh tree exists yet, so the renames need no
/// tracking.
pub fn detach_instance(
    instance_element: &Element,
    library: &DefinitionLibrary,
) -> Result<Element> {
    let resolution = resolve(instance_element, library)?;
    let mut detached = resolution.element;
    if detached.is_instance() {
        detached.kind = ElementKind::Plain {};
    }
    regenerate_ids(&mut detached);
    Ok(detached)
}
