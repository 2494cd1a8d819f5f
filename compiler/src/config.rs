//! Configuration for definition compilation

use crate::CompileResult;
use defcomp_core::DisplayType;
use defcomp_forest::ParentResolution;
use serde::{Deserialize, Serialize};

/// What to do with a definition whose parent is not part of the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingParentPolicy {
    /// Compile the definition as a root and log a warning.
    #[default]
    TreatAsRoot,
    /// Compile the definition as a root and add a diagnostic.
    Report,
    /// Reject the whole batch.
    Reject,
}

impl DanglingParentPolicy {
    pub(crate) fn resolution(self) -> ParentResolution {
        match self {
            DanglingParentPolicy::Reject => ParentResolution::Strict,
            DanglingParentPolicy::TreatAsRoot | DanglingParentPolicy::Report => {
                ParentResolution::Lenient
            }
        }
    }
}

/// Configuration for definition compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Handling of parents missing from the batch
    pub dangling_parent: DanglingParentPolicy,
    /// Display type for fields that declare none
    pub default_field_display: DisplayType,
    /// Display type for transitions that declare none
    pub default_transition_display: DisplayType,
    /// Display type for regions that declare none
    pub default_region_display: DisplayType,
    /// URI assigned to fields without a semantic property
    pub uri_placeholder: String,
    /// Resolve data type and length from each field's type descriptor
    pub resolve_type_descriptors: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            dangling_parent: DanglingParentPolicy::TreatAsRoot,
            default_field_display: DisplayType::Hidden,
            default_transition_display: DisplayType::Editable,
            default_region_display: DisplayType::Editable,
            uri_placeholder: "FORBIDDEN".to_string(),
            resolve_type_descriptors: true,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a configuration from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> CompileResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_dangling_parent(mut self, policy: DanglingParentPolicy) -> Self {
        self.dangling_parent = policy;
        self
    }

    pub fn with_default_field_display(mut self, display_type: DisplayType) -> Self {
        self.default_field_display = display_type;
        self
    }

    pub fn with_default_transition_display(mut self, display_type: DisplayType) -> Self {
        self.default_transition_display = display_type;
        self
    }

    pub fn with_default_region_display(mut self, display_type: DisplayType) -> Self {
        self.default_region_display = display_type;
        self
    }

    pub fn with_uri_placeholder(mut self, uri: impl Into<String>) -> Self {
        self.uri_placeholder = uri.into();
        self
    }

    pub fn with_type_resolution(mut self, enabled: bool) -> Self {
        self.resolve_type_descriptors = enabled;
        self
    }

    /// Structural compilation only: no descriptor resolution.
    pub fn minimal() -> Self {
        Self::default().with_type_resolution(false)
    }

    /// Reject batches with missing parents.
    pub fn strict() -> Self {
        Self::default().with_dangling_parent(DanglingParentPolicy::Reject)
    }
}
