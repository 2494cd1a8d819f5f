//! Definition Forest
//!
//! Builds the inheritance forest of a flat, possibly out-of-order list of
//! definitions. The forest is immutable after construction via ForestBuilder
//! and refers to definitions by their index in the input list.

mod builder;
mod forest;

pub use builder::{build_forest, ForestBuilder, ForestError, ForestResult, ParentResolution};
pub use forest::{Forest, Node, NodeId, Unresolved, Visit};
