use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::element::{Breakpoint, InteractionState};

/// A value that supersedes a base value only when explicitly flagged.
///
/// An entry with `is_overridden = false` must have no visible effect;
/// the base value always wins unless the flag is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overridable {
    pub value: Value,
    #[serde(default)]
    pub is_overridden: bool,
}

impl Overridable {
    /// An active override carrying `value`.
    pub fn set(value: Value) -> Self {
        Self {
            value,
            is_overridden: true,
        }
    }

    /// The value, only when the override flag is set.
    pub fn active(&self) -> Option<&Value> {
        self.is_overridden.then_some(&self.value)
    }
}

/// Sparse overrides for a single target element, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementOverrides {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, Overridable>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<Breakpoint, BTreeMap<String, Overridable>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub states: BTreeMap<InteractionState, BTreeMap<String, Overridable>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Overridable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<Overridable>,
}

impl ElementOverrides {
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
            && self.styles.is_empty()
            && self.states.is_empty()
            && self.content.is_none()
            && self.visible.is_none()
    }
}

/// The independent override axes an element supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideCategory {
    Props,
    Styles,
    States,
    Content,
    Visible,
}

impl OverrideCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverrideCategory::Props => "props",
            OverrideCategory::Styles => "styles",
            OverrideCategory::States => "states",
            OverrideCategory::Content => "content",
            OverrideCategory::Visible => "visible",
        }
    }

    /// True for the categories addressed with a compound
    /// `"breakpointOrState.property"` key.
    pub fn is_compound(&self) -> bool {
        matches!(self, OverrideCategory::Styles | OverrideCategory::States)
    }
}

impl fmt::Display for OverrideCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OverrideCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "props" => Ok(OverrideCategory::Props),
            "styles" => Ok(OverrideCategory::Styles),
            "states" => Ok(OverrideCategory::States),
            "content" => Ok(OverrideCategory::Content),
            "visible" => Ok(OverrideCategory::Visible),
            _ => Err(format!("Unknown override category: {}", s)),
        }
    }
}
