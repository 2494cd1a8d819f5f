//! Per-definition diagnostics.

use std::fmt;

/// A recoverable problem found in one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub definition: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(definition: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error found in definition '{}': {}",
            self.definition, self.message
        )
    }
}

/// Diagnostics collected over a batch, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, definition: &str, message: impl Into<String>) {
        self.entries.push(Diagnostic::new(definition, message));
    }

    /// Record every message of one pass for a definition.
    pub fn extend(&mut self, definition: &str, messages: impl IntoIterator<Item = String>) {
        self.entries
            .extend(messages.into_iter().map(|m| Diagnostic::new(definition, m)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics reported for one definition.
    pub fn for_definition<'a>(&'a self, definition: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |d| d.definition == definition)
    }

    /// Render every diagnostic as a message line.
    pub fn into_messages(self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
