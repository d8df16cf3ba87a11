//! The resolution engine.
//!
//! Turns (instance element, definition library) into a fresh, standalone
//! tree: variant selection, deep clone, slot injection, prop binding,
//! then override application, in that fixed order. The definition is
//! never touched; every mutation lands on the private clone.

use composer_model::{DefinitionLibrary, Element, OverrideCategory};
use thiserror::Error;
use tracing::{debug, warn};

use crate::apply::apply_overrides;
use crate::binding::apply_prop_bindings;
use crate::diagnostics::Diagnostic;
use crate::slot::inject_slots;
use crate::tree::collect_ids;
use crate::variant::select_variant;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The referenced definition is absent from the library. Callers
    /// render a placeholder for the instance; a page render never aborts
    /// on this.
    #[error("component '{component_id}' not found in library")]
    ComponentNotFound { component_id: String },

    /// The element handed to `resolve` carries no instance data.
    #[error("element '{element_id}' is not a component instance")]
    NotAnInstance { element_id: String },

    /// A compound style/state override key did not parse.
    #[error("invalid {category} override key '{key}'")]
    InvalidOverrideKey {
        category: OverrideCategory,
        key: String,
    },
}

pub type Result<T> = std::result::Result<T, ResolveError>;

/// A resolved tree plus everything the resolution wants to tell the
/// editor about fallbacks it took along the way.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub element: Element,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve an instance element against the library.
pub fn resolve(instance_element: &Element, library: &DefinitionLibrary) -> Result<Resolution> {
    let Some(instance) = instance_element.instance_data() else {
        return Err(ResolveError::NotAnInstance {
            element_id: instance_element.id.clone(),
        });
    };
    let Some(definition) = library.get(&instance.component_id) else {
        warn!(component_id = instance.component_id, "component not in library");
        return Err(ResolveError::ComponentNotFound {
            component_id: instance.component_id.clone(),
        });
    };

    let mut diagnostics = Vec::new();

    let chosen = match select_variant(definition, &instance.selected_variant) {
        Some(element) => element,
        None => {
            if !instance.selected_variant.is_empty() {
                debug!(
                    component_id = definition.id,
                    "variant selection unmatched, using base tree"
                );
                diagnostics.push(Diagnostic::VariantFallback {
                    selected: instance.selected_variant.clone(),
                });
            }
            &definition.element
        }
    };

    // The only point a new tree comes into existence. Everything below
    // mutates this clone in place.
    let mut element = chosen.clone();

    inject_slots(&mut element, instance, definition, &mut diagnostics);
    apply_prop_bindings(&mut element, definition, instance, &mut diagnostics);

    let resolved_ids = collect_ids(&element);
    for element_id in instance.overrides.keys() {
        if !resolved_ids.contains(element_id) {
            warn!(element_id, "override targets unknown element");
            diagnostics.push(Diagnostic::DanglingOverride {
                element_id: element_id.clone(),
            });
        }
    }

    apply_overrides(&mut element, &instance.overrides, &mut diagnostics);

    Ok(Resolution {
        element,
        diagnostics,
    })
}
