//! Display and data types.
//!
//! `DisplayType` controls visibility and editability of fields, regions and
//! transitions. `DataType` is the storage type resolved from a field's type
//! descriptor.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visibility/editability state of a field, region or transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayType {
    /// Visible and editable.
    Editable,
    /// Visible but not editable.
    ReadOnly,
    /// Not shown, but still part of the model.
    Hidden,
    /// Internal entry. System transitions are pruned after compilation.
    System,
}

impl DisplayType {
    /// Returns true for the SYSTEM display type.
    pub fn is_system(&self) -> bool {
        matches!(self, DisplayType::System)
    }

    /// Returns true for every display type that is not SYSTEM.
    pub fn is_visible(&self) -> bool {
        !self.is_system()
    }

    /// Get the canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayType::Editable => "EDITABLE",
            DisplayType::ReadOnly => "READ_ONLY",
            DisplayType::Hidden => "HIDDEN",
            DisplayType::System => "SYSTEM",
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "editable" => Ok(DisplayType::Editable),
            "readonly" | "read_only" => Ok(DisplayType::ReadOnly),
            "hidden" => Ok(DisplayType::Hidden),
            "system" => Ok(DisplayType::System),
            _ => Err(ModelError::UnknownDisplayType(s.to_string())),
        }
    }
}

/// Storage type resolved from a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Text,
    Int,
    Long,
    Double,
    Boolean,
    Date,
    DateTime,
    Uri,
    Any,
}

impl DataType {
    /// Get the type name as used in descriptors.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Double => "double",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::DateTime => "datetime",
            DataType::Uri => "uri",
            DataType::Any => "any",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
