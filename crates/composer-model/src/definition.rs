use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::element::Element;

/// An alternate subtree selected when every entry of `when` matches the
/// instance's variant selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub when: BTreeMap<String, Value>,
    pub element: Element,
}

/// Where a component prop's value is written inside the resolved tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropBinding {
    pub element_id: String,
    /// Dotted path under the target element's props, e.g. `"attributes.href"`.
    pub path: String,
}

/// A component-level prop: a key, an optional default, and an optional
/// binding target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDefinition {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_to: Option<PropBinding>,
}

/// A named slot and the content used when an instance supplies none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_content: Vec<Element>,
}

/// A reusable authored component: a base element tree plus variants,
/// props, and slots. Mutated only through explicit authoring actions;
/// resolution never touches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub id: String,
    pub name: String,
    pub element: Element,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<PropDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<SlotDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ComponentDefinition {
    /// Create a definition with just a base tree.
    pub fn new(id: impl Into<String>, name: impl Into<String>, element: Element) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            element,
            variants: Vec::new(),
            props: Vec::new(),
            slots: Vec::new(),
            updated_at: None,
        }
    }

    /// The default content for `slot_name`, when the definition declares it.
    pub fn slot(&self, slot_name: &str) -> Option<&SlotDefinition> {
        self.slots.iter().find(|slot| slot.name == slot_name)
    }
}

/// The library of definitions an editor or renderer works against.
///
/// Always an explicitly-owned, externally-injected collection passed as a
/// parameter into resolution. Never shared global state, so concurrent
/// resolutions against one library need no locking as long as the
/// authoring layer does not mutate it underneath them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionLibrary {
    definitions: BTreeMap<String, ComponentDefinition>,
}

impl DefinitionLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from definitions, keyed by their ids. Later
    /// duplicates replace earlier ones.
    pub fn from_definitions(definitions: impl IntoIterator<Item = ComponentDefinition>) -> Self {
        let mut library = Self::new();
        for definition in definitions {
            library.insert(definition);
        }
        library
    }

    /// Insert a definition, returning the one it replaced, if any.
    pub fn insert(&mut self, definition: ComponentDefinition) -> Option<ComponentDefinition> {
        self.definitions.insert(definition.id.clone(), definition)
    }

    pub fn get(&self, component_id: &str) -> Option<&ComponentDefinition> {
        self.definitions.get(component_id)
    }

    pub fn contains(&self, component_id: &str) -> bool {
        self.definitions.contains_key(component_id)
    }

    pub fn remove(&mut self, component_id: &str) -> Option<ComponentDefinition> {
        self.definitions.remove(component_id)
    }

    /// All definition ids, library-scoped unique by construction.
    pub fn ids(&self) -> BTreeSet<String> {
        self.definitions.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
