pub mod definition;
pub mod element;
pub mod instance;
pub mod overrides;

pub use definition::{
    ComponentDefinition, DefinitionLibrary, PropBinding, PropDefinition, SlotDefinition, Variant,
};
pub use element::{
    Breakpoint, Element, ElementKind, ElementSettings, InteractionState, StyleMap,
};
pub use instance::{InstanceData, SlotContent};
pub use overrides::{ElementOverrides, Overridable, OverrideCategory};
