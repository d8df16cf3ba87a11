use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::instance::InstanceData;

/// Style property map for one breakpoint or interaction state.
pub type StyleMap = BTreeMap<String, Value>;

/// Responsive breakpoints, widest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desktop" => Ok(Breakpoint::Desktop),
            "tablet" => Ok(Breakpoint::Tablet),
            "mobile" => Ok(Breakpoint::Mobile),
            _ => Err(format!("Unknown breakpoint: {}", s)),
        }
    }
}

/// Interaction states an element can carry styles for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    Default,
    Hover,
    Focus,
    Active,
    Disabled,
}

impl InteractionState {
    pub const ALL: [InteractionState; 5] = [
        InteractionState::Default,
        InteractionState::Hover,
        InteractionState::Focus,
        InteractionState::Active,
        InteractionState::Disabled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionState::Default => "default",
            InteractionState::Hover => "hover",
            InteractionState::Focus => "focus",
            InteractionState::Active => "active",
            InteractionState::Disabled => "disabled",
        }
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InteractionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(InteractionState::Default),
            "hover" => Ok(InteractionState::Hover),
            "focus" => Ok(InteractionState::Focus),
            "active" => Ok(InteractionState::Active),
            "disabled" => Ok(InteractionState::Disabled),
            _ => Err(format!("Unknown interaction state: {}", s)),
        }
    }
}

/// What an element *is*, beyond its type tag.
///
/// Persisted documents carry this as the optional `slotName` /
/// `instanceData` fields of the legacy JSON shape; the untagged
/// representation keeps that wire format intact while giving engine code
/// a real discriminant to match on instead of sniffing optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementKind {
    /// A placement of a component, resolved against the library at render time.
    Instance {
        #[serde(rename = "instanceData")]
        instance_data: InstanceData,
    },
    /// A named placeholder replaced by slot content at resolution time.
    Slot {
        #[serde(rename = "slotName")]
        slot_name: String,
    },
    /// An ordinary element.
    Plain {},
}

impl Default for ElementKind {
    fn default() -> Self {
        ElementKind::Plain {}
    }
}

/// Per-element settings bag. Only `visible` is interpreted by the engine;
/// everything else passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ElementSettings {
    pub fn is_empty(&self) -> bool {
        self.visible.is_none() && self.extra.is_empty()
    }
}

/// One node of an element tree.
///
/// Identifiers are unique within a tree. `props` holds arbitrary JSON
/// values; textual content lives under the `content` prop key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(flatten)]
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<Breakpoint, StyleMap>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub states: BTreeMap<InteractionState, StyleMap>,
    #[serde(default, skip_serializing_if = "ElementSettings::is_empty")]
    pub settings: ElementSettings,
}

impl Element {
    /// Create a plain element with no children or props.
    pub fn new(id: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element_type: element_type.into(),
            kind: ElementKind::Plain {},
            children: Vec::new(),
            props: BTreeMap::new(),
            styles: BTreeMap::new(),
            states: BTreeMap::new(),
            settings: ElementSettings::default(),
        }
    }

    /// Create a slot placeholder element.
    pub fn slot(id: impl Into<String>, slot_name: impl Into<String>) -> Self {
        let mut element = Self::new(id, "slot");
        element.kind = ElementKind::Slot {
            slot_name: slot_name.into(),
        };
        element
    }

    pub fn is_slot(&self) -> bool {
        matches!(self.kind, ElementKind::Slot { .. })
    }

    pub fn is_instance(&self) -> bool {
        matches!(self.kind, ElementKind::Instance { .. })
    }

    /// The slot name, when this element is a slot placeholder.
    pub fn slot_name(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Slot { slot_name } => Some(slot_name),
            _ => None,
        }
    }

    /// The instance data, when this element is an instance reference.
    pub fn instance_data(&self) -> Option<&InstanceData> {
        match &self.kind {
            ElementKind::Instance { instance_data } => Some(instance_data),
            _ => None,
        }
    }

    pub fn instance_data_mut(&mut self) -> Option<&mut InstanceData> {
        match &mut self.kind {
            ElementKind::Instance { instance_data } => Some(instance_data),
            _ => None,
        }
    }
}
