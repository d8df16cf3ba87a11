use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::element::Element;
use crate::overrides::ElementOverrides;

/// Content an instance supplies for one named slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotContent {
    pub slot_name: String,
    #[serde(default)]
    pub content: Vec<Element>,
}

/// Everything a placement of a component carries beyond the definition:
/// the sparse overrides, the variant selection, prop values, and slot
/// content. Lives on the instance element, never on the definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceData {
    pub component_id: String,
    pub instance_id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, ElementOverrides>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selected_variant: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub prop_values: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slot_contents: Vec<SlotContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl InstanceData {
    /// Fresh instance data referencing `component_id`, with no overrides.
    pub fn new(
        component_id: impl Into<String>,
        instance_id: impl Into<String>,
        last_synced_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            component_id: component_id.into(),
            instance_id: instance_id.into(),
            overrides: BTreeMap::new(),
            selected_variant: BTreeMap::new(),
            prop_values: BTreeMap::new(),
            slot_contents: Vec::new(),
            last_synced_at,
        }
    }

    /// Instance-supplied content for `slot_name`, if any was provided.
    pub fn slot_content(&self, slot_name: &str) -> Option<&[Element]> {
        self.slot_contents
            .iter()
            .find(|slot| slot.slot_name == slot_name)
            .map(|slot| slot.content.as_slice())
    }
}
