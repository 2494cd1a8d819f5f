//! Definition model.
//!
//! A `Definition` describes an entity type: its top-level fields, the regions
//! that group further fields, and the transitions it allows. Definitions form
//! a hierarchy through `parent`; the compiler merges every definition with its
//! ancestor chain and mutates these records in place.

use crate::{DataType, DisplayType, TemplateBinding};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// A typed, named attribute of a definition or region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Identifier, unique within the enclosing definition or region.
    pub identifier: String,
    /// Type descriptor (`an..20`, `n10`, `boolean`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Display type. Unset values are filled with the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<DisplayType>,
    /// Whether a value is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory: Option<bool>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Default-value template with `$[property]` / `${function}` bindings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value_template: Option<String>,
    /// Bindings extracted from the default-value template.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub template_bindings: Vec<TemplateBinding>,
    /// Region this field belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Sort position within the enclosing scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Whether the field is shown collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Semantic property URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Storage type resolved from the descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    /// Maximum length resolved from the descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Path of the owning container (`definition` or `definition/region`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Identifier of the definition that declared this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// This entry deletes an inherited field with the same identifier.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deleted: bool,
}

impl Field {
    pub fn new(identifier: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// A field redeclaration without a type descriptor.
    pub fn untyped(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn with_display(mut self, display_type: DisplayType) -> Self {
        self.display_type = Some(display_type);
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = Some(true);
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.default_value_template = Some(template.into());
        self
    }

    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Mark this entry as deleting the inherited field with the same identifier.
    pub fn marked_deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Returns true if the field is explicitly mandatory.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory.unwrap_or(false)
    }

    /// Returns true if the display type is SYSTEM.
    pub fn is_system(&self) -> bool {
        self.display_type.is_some_and(|d| d.is_system())
    }

    /// Returns true if the field was declared by the given definition.
    pub fn declared_by(&self, definition: &str) -> bool {
        self.origin.as_deref() == Some(definition)
    }

    /// Copy every attribute that is unset here from `other`.
    ///
    /// Identity attributes (identifier, path, origin, region, deletion marker)
    /// are left untouched.
    pub fn fill_unset_from(&mut self, other: &Field) {
        fill(&mut self.type_name, &other.type_name);
        fill(&mut self.display_type, &other.display_type);
        fill(&mut self.mandatory, &other.mandatory);
        fill(&mut self.default_value, &other.default_value);
        fill(&mut self.default_value_template, &other.default_value_template);
        fill(&mut self.order, &other.order);
        fill(&mut self.collapsed, &other.collapsed);
        fill(&mut self.uri, &other.uri);
        fill(&mut self.data_type, &other.data_type);
        fill(&mut self.max_length, &other.max_length);
        if self.template_bindings.is_empty() {
            self.template_bindings = other.template_bindings.clone();
        }
    }
}

fn fill<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if target.is_none() {
        target.clone_from(source);
    }
}

/// A named grouping of fields within a definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Identifier, unique within the definition.
    pub identifier: String,
    /// Member fields.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Sort position among the definition's regions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Whether the region is collapsed by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Display type. SYSTEM regions are dropped during compilation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<DisplayType>,
    /// This entry deletes an inherited region with the same identifier.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deleted: bool,
}

impl Region {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    /// Add a member field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    pub fn with_display(mut self, display_type: DisplayType) -> Self {
        self.display_type = Some(display_type);
        self
    }

    pub fn marked_deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Get a member field by identifier.
    pub fn get_field(&self, identifier: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.identifier == identifier)
    }

    /// Identifiers of the member fields, in order.
    pub fn field_ids(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.identifier.as_str()).collect()
    }
}

/// A named allowed state change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<DisplayType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_state: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deleted: bool,
}

impl Transition {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn with_display(mut self, display_type: DisplayType) -> Self {
        self.display_type = Some(display_type);
        self
    }

    pub fn between(mut self, from_state: impl Into<String>, to_state: impl Into<String>) -> Self {
        self.from_state = Some(from_state.into());
        self.to_state = Some(to_state.into());
        self
    }

    pub fn marked_deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Returns true if the display type is SYSTEM.
    pub fn is_system(&self) -> bool {
        self.display_type.is_some_and(|d| d.is_system())
    }
}

/// A named schema describing an entity type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Unique identifier.
    pub identifier: String,
    /// Identifier of the parent definition (for inheritance).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Top-level fields.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Regions with their member fields.
    #[serde(default)]
    pub regions: Vec<Region>,
    /// Allowed transitions.
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl Definition {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    /// Set the parent definition.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add a top-level field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a region.
    pub fn region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    /// Add a transition.
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Get a top-level field by identifier.
    pub fn get_field(&self, identifier: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.identifier == identifier)
    }

    /// Get a region by identifier.
    pub fn get_region(&self, identifier: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.identifier == identifier)
    }

    /// Get a transition by identifier.
    pub fn get_transition(&self, identifier: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.identifier == identifier)
    }

    /// Find a field in any scope (top level first, then regions in order).
    pub fn find_field(&self, identifier: &str) -> Option<&Field> {
        self.all_fields().find(|f| f.identifier == identifier)
    }

    /// Iterate over top-level fields followed by every region's fields.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields
            .iter()
            .chain(self.regions.iter().flat_map(|r| r.fields.iter()))
    }

    /// Apply `f` to every field in every scope.
    pub fn for_each_field_mut(&mut self, mut f: impl FnMut(&mut Field)) {
        for field in &mut self.fields {
            f(field);
        }
        for region in &mut self.regions {
            for field in &mut region.fields {
                f(field);
            }
        }
    }

    /// Identifiers of the top-level fields, in order.
    pub fn field_ids(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.identifier.as_str()).collect()
    }

    /// Identifiers of the regions, in order.
    pub fn region_ids(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.identifier.as_str()).collect()
    }

    /// Identifiers of the transitions, in order.
    pub fn transition_ids(&self) -> Vec<&str> {
        self.transitions.iter().map(|t| t.identifier.as_str()).collect()
    }
}
