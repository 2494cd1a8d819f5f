//! Compilation progress of a single definition.

use std::fmt;

/// Stage a definition has reached in the current batch.
///
/// States only move forward, one step at a time. Roots pass through `Merged`
/// without merge work. There is no failure state: problems are diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefinitionState {
    #[default]
    Uncompiled,
    TreeLinked,
    Merged,
    Pruned,
    Normalized,
    Compiled,
}

impl DefinitionState {
    /// The following state, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Uncompiled => Some(Self::TreeLinked),
            Self::TreeLinked => Some(Self::Merged),
            Self::Merged => Some(Self::Pruned),
            Self::Pruned => Some(Self::Normalized),
            Self::Normalized => Some(Self::Compiled),
            Self::Compiled => None,
        }
    }

    /// Returns true if `to` directly follows this state.
    pub fn can_advance_to(self, to: Self) -> bool {
        self.next() == Some(to)
    }

    pub fn is_compiled(self) -> bool {
        self == Self::Compiled
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uncompiled => "uncompiled",
            Self::TreeLinked => "tree-linked",
            Self::Merged => "merged",
            Self::Pruned => "pruned",
            Self::Normalized => "normalized",
            Self::Compiled => "compiled",
        }
    }
}

impl fmt::Display for DefinitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
