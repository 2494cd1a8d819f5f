//! Field-path normalization and origin linking.
//!
//! Normalization is structural and can run any number of times:
//! - fields and regions are stably sorted by `order`, unordered entries last
//! - default values are trimmed
//! - every field's `path` names its current owner (`def` or `def/region`)
//! - region fields without a region reference point at their region
//!
//! Type descriptors are resolved separately by [`resolve_data_types`] so their
//! failures are reported once, on the final normalization.

use defcomp_core::{Definition, Field, TypeDescriptor};
use std::collections::HashMap;
use tracing::trace;

/// Scope owning a field inside a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Top-level field list.
    Definition,
    /// Field list of the region at this position.
    Region(usize),
}

impl Scope {
    /// Path of the scope (`def` or `def/region`).
    pub fn path(&self, definition: &Definition) -> String {
        match self {
            Scope::Definition => definition.identifier.clone(),
            Scope::Region(index) => match definition.regions.get(*index) {
                Some(region) => format!("{}/{}", definition.identifier, region.identifier),
                None => definition.identifier.clone(),
            },
        }
    }

    pub fn fields<'a>(&self, definition: &'a Definition) -> Option<&'a Vec<Field>> {
        match self {
            Scope::Definition => Some(&definition.fields),
            Scope::Region(index) => definition.regions.get(*index).map(|r| &r.fields),
        }
    }

    pub fn fields_mut<'a>(&self, definition: &'a mut Definition) -> Option<&'a mut Vec<Field>> {
        match self {
            Scope::Definition => Some(&mut definition.fields),
            Scope::Region(index) => definition.regions.get_mut(*index).map(|r| &mut r.fields),
        }
    }
}

/// One field occurrence: its scope and its position inside that scope.
///
/// Two occurrences of the same identifier in one scope have distinct
/// locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub scope: Scope,
    pub position: usize,
}

impl Location {
    pub fn new(scope: Scope, position: usize) -> Self {
        Self { scope, position }
    }

    pub fn field<'a>(&self, definition: &'a Definition) -> Option<&'a Field> {
        self.scope.fields(definition)?.get(self.position)
    }

    pub fn field_mut<'a>(&self, definition: &'a mut Definition) -> Option<&'a mut Field> {
        self.scope.fields_mut(definition)?.get_mut(self.position)
    }
}

/// Remove the fields at the given locations and return how many were removed.
///
/// Locations must come from the same snapshot of the definition; removal runs
/// back to front so earlier positions stay valid.
pub fn remove_at(definition: &mut Definition, locations: &[Location]) -> usize {
    let mut sorted = locations.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut removed = 0;
    for location in sorted.into_iter().rev() {
        if let Some(fields) = location.scope.fields_mut(definition) {
            if location.position < fields.len() {
                fields.remove(location.position);
                removed += 1;
            }
        }
    }
    removed
}

/// Owner index of a definition: field identifier to its occurrences.
///
/// The index is a snapshot; rebuild it after the definition changes shape.
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    owners: HashMap<String, Vec<Location>>,
    /// Identifiers in first-appearance order.
    order: Vec<String>,
}

impl FieldIndex {
    pub fn build(definition: &Definition) -> Self {
        let mut index = Self::default();
        for (position, field) in definition.fields.iter().enumerate() {
            index.insert(&field.identifier, Location::new(Scope::Definition, position));
        }
        for (region, fields) in definition.regions.iter().map(|r| &r.fields).enumerate() {
            for (position, field) in fields.iter().enumerate() {
                index.insert(&field.identifier, Location::new(Scope::Region(region), position));
            }
        }
        index
    }

    fn insert(&mut self, identifier: &str, location: Location) {
        match self.owners.get_mut(identifier) {
            Some(locations) => locations.push(location),
            None => {
                self.owners.insert(identifier.to_string(), vec![location]);
                self.order.push(identifier.to_string());
            }
        }
    }

    /// Occurrences of the identifier, top level first.
    pub fn locations(&self, identifier: &str) -> &[Location] {
        self.owners.get(identifier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Identifiers occurring more than once, in first-appearance order.
    pub fn shared(&self) -> impl Iterator<Item = (&str, &[Location])> {
        self.order.iter().filter_map(|id| {
            let locations = self.owners.get(id)?;
            (locations.len() > 1).then_some((id.as_str(), locations.as_slice()))
        })
    }

    /// Number of distinct field identifiers.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Tag every field without an origin as declared by this definition and
/// rebuild the owner index.
pub fn link(definition: &mut Definition) -> FieldIndex {
    let owner = definition.identifier.clone();
    definition.for_each_field_mut(|field| {
        if field.origin.is_none() {
            field.origin = Some(owner.clone());
        }
    });
    let index = FieldIndex::build(definition);
    trace!(
        definition = %definition.identifier,
        fields = index.len(),
        "Linked definition fields"
    );
    index
}

/// Normalize the structure of a definition in place.
pub fn normalize(definition: &mut Definition) {
    sort_by_order(&mut definition.fields, |f| f.order);
    sort_by_order(&mut definition.regions, |r| r.order);

    let top_path = definition.identifier.clone();
    for field in &mut definition.fields {
        normalize_field(field, &top_path);
    }

    for region in &mut definition.regions {
        sort_by_order(&mut region.fields, |f| f.order);
        let path = format!("{}/{}", definition.identifier, region.identifier);
        for field in &mut region.fields {
            normalize_field(field, &path);
            if field.region.is_none() {
                field.region = Some(region.identifier.clone());
            }
        }
    }
}

fn normalize_field(field: &mut Field, path: &str) {
    if let Some(value) = field.default_value.as_mut() {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
    field.path = Some(path.to_string());
}

/// Stable sort: ordered entries ascending, then unordered ones in their
/// current relative order.
fn sort_by_order<T>(items: &mut [T], order: impl Fn(&T) -> Option<i32>) {
    items.sort_by_key(|item| match order(item) {
        Some(position) => (0, position),
        None => (1, 0),
    });
}

/// Resolve `data_type` and `max_length` of every field whose data type is unset.
///
/// Returns one message per field with an unparseable descriptor.
pub fn resolve_data_types(definition: &mut Definition) -> Vec<String> {
    let mut messages = Vec::new();
    definition.for_each_field_mut(|field| {
        if field.data_type.is_some() {
            return;
        }
        let Some(type_name) = field.type_name.as_deref() else {
            return;
        };
        match TypeDescriptor::parse(type_name) {
            Ok(descriptor) => {
                field.data_type = Some(descriptor.data_type);
                if field.max_length.is_none() {
                    field.max_length = descriptor.max_length;
                }
            }
            Err(err) => messages.push(format!("Field [{}]: {}", field.identifier, err)),
        }
    });
    messages
}
