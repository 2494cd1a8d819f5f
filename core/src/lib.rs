//! Definition Core Types
//!
//! This crate provides the foundational types used throughout the definition compiler:
//! - The definition model (Definition, Field, Region, Transition)
//! - Display types (the DisplayType enum) and resolved data types
//! - Type descriptor parsing (`an..20`, `n10`, ...)
//! - Default-value template binding extraction
//! - Common error types

mod descriptor;
mod display;
mod error;
mod model;
mod template;

pub use descriptor::*;
pub use display::*;
pub use error::*;
pub use model::*;
pub use template::*;
