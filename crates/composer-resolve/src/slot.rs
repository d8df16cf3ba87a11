//! Slot injection.

use composer_model::{ComponentDefinition, Element, InstanceData};
use tracing::debug;

use crate::diagnostics::Diagnostic;

/// Replace every slot child with instance-supplied content, falling back
/// to the definition's default content, else nothing. Pre-order; the
/// substituted children are recursed into so nested slots resolve too.
///
/// A slot root is left in place: only children are substituted, matching
/// how definitions author slots inside container elements.
pub(crate) fn inject_slots(
    element: &mut Element,
    instance: &InstanceData,
    definition: &ComponentDefinition,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let children = std::mem::take(&mut element.children);
    let mut replaced = Vec::with_capacity(children.len());
    for child in children {
        match child.slot_name() {
            Some(slot_name) => {
                replaced.extend(slot_content(slot_name, instance, definition, diagnostics));
            }
            None => replaced.push(child),
        }
    }
    element.children = replaced;
    for child in &mut element.children {
        inject_slots(child, instance, definition, diagnostics);
    }
}

/// Content for one slot: instance wins, definition default second, empty
/// last.
fn slot_content(
    slot_name: &str,
    instance: &InstanceData,
    definition: &ComponentDefinition,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Element> {
    if let Some(content) = instance.slot_content(slot_name)
        && !content.is_empty()
    {
        return content.to_vec();
    }
    if let Some(slot) = definition.slot(slot_name)
        && !slot.default_content.is_empty()
    {
        return slot.default_content.clone();
    }
    debug!(slot = slot_name, "slot collapsed to empty");
    diagnostics.push(Diagnostic::EmptySlot {
        name: slot_name.to_string(),
    });
    Vec::new()
}
