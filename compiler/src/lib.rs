//! Definition Compiler
//!
//! Resolve a batch of hierarchical definitions into their compiled form.
//!
//! Responsibilities:
//! - Build the inheritance forest (parents before children)
//! - Merge every definition with its already compiled parent
//! - Prune deleted elements, system transitions and inherited duplicates
//! - Synchronize region properties and fill unset defaults
//! - Collect per-definition diagnostics without stopping the batch

mod compiler;
mod config;
mod diagnostics;
mod engine;
mod error;
mod normalize;
mod passes;
mod state;

pub use compiler::{compile, CompileReport, Compiler};
pub use config::{CompilerConfig, DanglingParentPolicy};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{CompileError, CompileResult};
pub use normalize::{link, normalize, remove_at, resolve_data_types, FieldIndex, Location, Scope};
pub use passes::{
    prepare_default_value_suggests, remove_deleted_elements, remove_inherited_duplicates,
    remove_system_transitions, set_default_properties, synch_region_properties,
};
pub use state::DefinitionState;
