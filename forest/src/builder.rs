//! ForestBuilder for constructing an immutable Forest.

use crate::{Forest, Node, NodeId, Unresolved};
use defcomp_core::Definition;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during forest construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForestError {
    #[error("Duplicate definition identifier: {0}")]
    DuplicateDefinition(String),

    #[error("Unknown parent definition '{parent}' for definition '{definition}'")]
    UnknownParent { definition: String, parent: String },

    #[error("Inheritance cycle detected: {cycle}")]
    InheritanceCycle { cycle: String },
}

/// Result type for forest construction.
pub type ForestResult<T> = Result<T, ForestError>;

/// How to handle a parent identifier that names no known definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParentResolution {
    /// Treat the definition as a root and record it as unresolved.
    #[default]
    Lenient,
    /// Fail with `ForestError::UnknownParent`.
    Strict,
}

/// Builder for constructing an immutable Forest.
#[derive(Debug, Default)]
pub struct ForestBuilder {
    resolution: ParentResolution,
}

/// Build a forest with lenient parent resolution.
pub fn build_forest(definitions: &[Definition]) -> ForestResult<Forest> {
    ForestBuilder::new().build(definitions)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

impl ForestBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on dangling parent identifiers.
    pub fn strict(mut self) -> Self {
        self.resolution = ParentResolution::Strict;
        self
    }

    /// Set the dangling parent handling.
    pub fn with_resolution(mut self, resolution: ParentResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Build the forest.
    ///
    /// The first pass indexes every identifier that is declared or referenced
    /// as a parent, so a child may appear before its parent. The second pass
    /// links children to parents. Cycles are rejected afterwards.
    pub fn build(&self, definitions: &[Definition]) -> ForestResult<Forest> {
        let mut forest = Forest::default();

        // First pass: index declared and referenced identifiers
        for (position, definition) in definitions.iter().enumerate() {
            let id = slot(&mut forest, &definition.identifier);
            let node = &mut forest.nodes[id.0];
            if node.definition.is_some() {
                return Err(ForestError::DuplicateDefinition(
                    definition.identifier.clone(),
                ));
            }
            node.definition = Some(position);
            forest.definition_nodes.push(id);

            if let Some(parent) = &definition.parent {
                slot(&mut forest, parent);
            }
        }

        // Second pass: attach children to their parents
        for (position, definition) in definitions.iter().enumerate() {
            let id = forest.definition_nodes[position];
            let Some(parent) = &definition.parent else {
                forest.roots.push(id);
                continue;
            };

            let parent_id = forest.index[parent.as_str()];
            if forest.nodes[parent_id.0].is_placeholder() {
                match self.resolution {
                    ParentResolution::Strict => {
                        return Err(ForestError::UnknownParent {
                            definition: definition.identifier.clone(),
                            parent: parent.clone(),
                        });
                    }
                    ParentResolution::Lenient => {
                        warn!(
                            definition = %definition.identifier,
                            parent = %parent,
                            "Parent definition not found, treating as root"
                        );
                        forest.unresolved.push(Unresolved {
                            definition: definition.identifier.clone(),
                            parent: parent.clone(),
                        });
                        forest.roots.push(id);
                        continue;
                    }
                }
            }

            forest.nodes[id.0].parent = Some(parent_id);
            forest.nodes[parent_id.0].children.push(id);
        }

        detect_cycles(&forest)?;

        debug!(
            definitions = forest.definition_count(),
            roots = forest.roots.len(),
            placeholders = forest.placeholder_count(),
            unresolved = forest.unresolved.len(),
            "Built definition forest"
        );

        Ok(forest)
    }
}

/// Get or create the node for an identifier.
fn slot(forest: &mut Forest, identifier: &str) -> NodeId {
    if let Some(&id) = forest.index.get(identifier) {
        return id;
    }
    let id = NodeId::new(forest.nodes.len());
    forest.nodes.push(Node::placeholder(identifier));
    forest.index.insert(identifier.to_string(), id);
    id
}

/// Follow every parent chain once; a chain that reaches a node still on the
/// current path is a cycle.
fn detect_cycles(forest: &Forest) -> ForestResult<()> {
    let mut marks = vec![Mark::Unvisited; forest.nodes.len()];

    for &start in &forest.definition_nodes {
        let mut path: Vec<NodeId> = Vec::new();
        let mut current = Some(start);

        while let Some(id) = current {
            match marks[id.0] {
                Mark::Done => break,
                Mark::InProgress => {
                    let position = path.iter().position(|&p| p == id).unwrap_or(0);
                    let mut names: Vec<&str> = path[position..]
                        .iter()
                        .map(|p| forest.nodes[p.0].identifier.as_str())
                        .collect();
                    names.push(forest.nodes[id.0].identifier.as_str());
                    return Err(ForestError::InheritanceCycle {
                        cycle: names.join(" -> "),
                    });
                }
                Mark::Unvisited => {
                    marks[id.0] = Mark::InProgress;
                    path.push(id);
                    current = forest.nodes[id.0].parent;
                }
            }
        }

        for id in path {
            marks[id.0] = Mark::Done;
        }
    }

    Ok(())
}
