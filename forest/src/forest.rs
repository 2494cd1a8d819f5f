//! Forest of definition nodes.

use std::collections::HashMap;

/// Identifier of a node in the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId from a raw value.
    pub fn new(id: usize) -> Self {
        Self(id)
    }
}

/// A node of the inheritance forest.
///
/// A node without a definition is a placeholder for an identifier that was
/// only ever referenced as a parent.
#[derive(Debug, Clone)]
pub struct Node {
    /// Definition identifier.
    pub identifier: String,
    /// Index of the definition in the input list.
    pub definition: Option<usize>,
    /// Resolved parent node.
    pub parent: Option<NodeId>,
    /// Child nodes, in input order.
    pub children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn placeholder(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            definition: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns true if no definition was supplied for this identifier.
    pub fn is_placeholder(&self) -> bool {
        self.definition.is_none()
    }
}

/// A definition whose parent identifier did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub definition: String,
    pub parent: String,
}

/// One step of a pre-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Index of the visited definition.
    pub definition: usize,
    /// Index of its resolved parent definition.
    pub parent: Option<usize>,
    /// Distance from the root.
    pub depth: usize,
}

/// Inheritance forest of a definition list.
#[derive(Debug, Default)]
pub struct Forest {
    pub(crate) nodes: Vec<Node>,
    pub(crate) index: HashMap<String, NodeId>,
    /// Node of each definition, by input index.
    pub(crate) definition_nodes: Vec<NodeId>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) unresolved: Vec<Unresolved>,
}

impl Forest {
    /// Root nodes, in input order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a node by definition identifier (placeholders included).
    pub fn node_by_identifier(&self, identifier: &str) -> Option<&Node> {
        self.index.get(identifier).and_then(|&id| self.node(id))
    }

    /// Number of definitions in the forest.
    pub fn definition_count(&self) -> usize {
        self.definition_nodes.len()
    }

    /// Number of placeholder nodes (referenced but never supplied).
    pub fn placeholder_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_placeholder()).count()
    }

    /// Definitions whose parent did not resolve.
    pub fn unresolved(&self) -> &[Unresolved] {
        &self.unresolved
    }

    /// Index of the resolved parent definition of a definition.
    pub fn parent_of(&self, definition: usize) -> Option<usize> {
        let node = self.node(*self.definition_nodes.get(definition)?)?;
        node.parent
            .and_then(|parent| self.node(parent))
            .and_then(|parent| parent.definition)
    }

    /// Returns true if the definition has a resolved parent.
    pub fn has_parent(&self, definition: usize) -> bool {
        self.parent_of(definition).is_some()
    }

    /// Identifiers of the ancestors of a definition, nearest first.
    pub fn ancestors(&self, identifier: &str) -> Vec<&str> {
        let mut result = Vec::new();
        let mut current = self.node_by_identifier(identifier).and_then(|n| n.parent);
        while let Some(id) = current {
            let Some(node) = self.node(id) else {
                break;
            };
            result.push(node.identifier.as_str());
            current = node.parent;
        }
        result
    }

    /// Depth-first pre-order walk over every tree, roots and children in input order.
    ///
    /// Every parent is visited before its children.
    pub fn walk(&self) -> Vec<Visit> {
        let mut visits = Vec::with_capacity(self.definition_nodes.len());
        let mut stack: Vec<(NodeId, usize)> = self.roots.iter().rev().map(|&r| (r, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if let Some(definition) = node.definition {
                visits.push(Visit {
                    definition,
                    parent: node
                        .parent
                        .and_then(|p| self.node(p))
                        .and_then(|p| p.definition),
                    depth,
                });
            }
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }

        visits
    }
}
