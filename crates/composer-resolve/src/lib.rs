//! Override-resolution engine for the page-builder component system.
//!
//! A [`composer_model::ComponentDefinition`] can be placed many times as
//! an instance, each carrying a sparse set of overrides. [`resolve`]
//! merges one instance onto its definition without ever mutating the
//! shared base tree; the override [`store`] translates editor edits into
//! override entries; [`lifecycle`] covers create, sync, and detach.
//!
//! The engine is synchronous and pure over its inputs: every mutation
//! targets a private clone, so concurrent resolutions against one
//! (externally synchronized) library are safe without locking.

pub mod diagnostics;
pub mod lifecycle;
pub mod store;
pub mod tree;

mod apply;
mod binding;
mod resolve;
mod slot;
mod variant;

pub use diagnostics::Diagnostic;
pub use lifecycle::{
    INSTANCE_TYPE, create_component_instance, detach_instance, needs_sync,
    prune_dangling_overrides, sync_instance,
};
pub use resolve::{Resolution, ResolveError, Result, resolve};
pub use store::{
    has_override, overridden_elements, reset_all_overrides, reset_override, set_override,
};
