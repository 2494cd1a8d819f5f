//! Pruning and default-filling passes.
//!
//! Each pass works on one merged definition. The compiler runs them in
//! declaration order right after the merge, before any child merges from the
//! definition, so children inherit a parent that is already pruned.

use crate::{remove_at, CompilerConfig, FieldIndex, Location, Scope};
use defcomp_core::{template_bindings, Definition, Field};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Remove every field, region and transition carrying a deletion marker.
///
/// A field marker also removes occurrences of the same identifier in other
/// scopes, unless the definition declared that occurrence itself.
pub fn remove_deleted_elements(definition: &mut Definition) {
    let owner = definition.identifier.clone();
    let deleted: HashSet<String> = definition
        .all_fields()
        .filter(|f| f.deleted)
        .map(|f| f.identifier.clone())
        .collect();

    let keep = |field: &Field| {
        !field.deleted && !(deleted.contains(&field.identifier) && !field.declared_by(&owner))
    };

    definition.fields.retain(keep);
    definition.regions.retain(|r| !r.deleted);
    for region in &mut definition.regions {
        region.fields.retain(keep);
    }
    definition.transitions.retain(|t| !t.deleted);

    if !deleted.is_empty() {
        debug!(
            definition = %owner,
            fields = deleted.len(),
            "Removed deleted fields"
        );
    }
}

/// Remove every transition with display type SYSTEM.
pub fn remove_system_transitions(definition: &mut Definition) {
    definition.transitions.retain(|t| !t.is_system());
}

/// Drop inherited copies of fields the definition redeclared in another scope.
///
/// Only meaningful for definitions with a resolved parent.
pub fn remove_inherited_duplicates(definition: &mut Definition) {
    let owner = definition.identifier.clone();
    let own: HashSet<String> = definition
        .all_fields()
        .filter(|f| f.declared_by(&owner))
        .map(|f| f.identifier.clone())
        .collect();
    if own.is_empty() {
        return;
    }

    let keep = |field: &Field| !own.contains(&field.identifier) || field.declared_by(&owner);
    definition.fields.retain(keep);
    for region in &mut definition.regions {
        region.fields.retain(keep);
    }
}

/// Align fields with their regions and resolve duplicates across scopes.
///
/// - SYSTEM regions are dropped with their fields
/// - dangling region references are reported
/// - duplicate identifiers are collapsed where that is unambiguous
/// - region order, collapsed state and display type reach member fields
///   that leave them unset
///
/// Returns the messages for problems that could not be resolved.
pub fn synch_region_properties(definition: &mut Definition) -> Vec<String> {
    let mut messages = Vec::new();

    let dropped: HashSet<String> = definition
        .regions
        .iter()
        .filter(|r| r.display_type.is_some_and(|d| d.is_system()))
        .map(|r| r.identifier.clone())
        .collect();
    if !dropped.is_empty() {
        definition.regions.retain(|r| !dropped.contains(&r.identifier));
        debug!(
            definition = %definition.identifier,
            regions = ?dropped,
            "Removed system regions"
        );
    }

    check_region_references(definition, &dropped, &mut messages);
    resolve_duplicates(definition, &mut messages);
    propagate_region_properties(definition);

    messages
}

fn check_region_references(
    definition: &Definition,
    dropped: &HashSet<String>,
    messages: &mut Vec<String>,
) {
    for field in &definition.fields {
        let Some(region) = field.region.as_deref() else {
            continue;
        };
        if definition.get_region(region).is_none() && !dropped.contains(region) {
            messages.push(format!(
                "Field [{}] references missing region [{}]",
                field.identifier, region
            ));
        }
    }

    for region in &definition.regions {
        for field in &region.fields {
            match field.region.as_deref() {
                Some(reference) if reference != region.identifier => {
                    messages.push(format!(
                        "Field [{}] in region [{}] references region [{}]",
                        field.identifier, region.identifier, reference
                    ));
                }
                _ => {}
            }
        }
    }
}

fn resolve_duplicates(definition: &mut Definition, messages: &mut Vec<String>) {
    let index = FieldIndex::build(definition);
    let mut obsolete: Vec<Location> = Vec::new();

    for (identifier, locations) in index.shared() {
        let (system, visible): (Vec<Location>, Vec<Location>) = locations
            .iter()
            .copied()
            .partition(|location| location.field(definition).is_some_and(Field::is_system));

        match visible.as_slice() {
            [] => {
                let copies: Vec<&Field> = system
                    .iter()
                    .filter_map(|location| location.field(definition))
                    .collect();
                let identical = copies
                    .first()
                    .is_some_and(|first| copies.iter().all(|c| same_declaration(c, first)));
                if identical {
                    obsolete.extend_from_slice(&system[1..]);
                    trace!(field = %identifier, "Collapsed identical system fields");
                } else {
                    report_system_copies(definition, identifier, &system, messages);
                }
            }
            [target] => {
                let copies: Vec<Field> = system
                    .iter()
                    .filter_map(|location| location.field(definition).cloned())
                    .collect();
                if let Some(field) = target.field_mut(definition) {
                    // the visible copy keeps its own visibility
                    let display_type = field.display_type;
                    for copy in &copies {
                        field.fill_unset_from(copy);
                    }
                    field.display_type = display_type;
                }
                obsolete.extend(system);
            }
            _ => {
                for location in &visible {
                    messages.push(format!(
                        "Found duplicate VISIBLE field [{}] {}",
                        identifier,
                        describe(definition, location)
                    ));
                }
                report_system_copies(definition, identifier, &system, messages);
            }
        }
    }

    remove_at(definition, &obsolete);
}

fn report_system_copies(
    definition: &Definition,
    identifier: &str,
    system: &[Location],
    messages: &mut Vec<String>,
) {
    for location in system {
        messages.push(format!(
            "Found duplicate field [{}] {} that cannot be auto removed because both are system fields!",
            identifier,
            describe(definition, location)
        ));
    }
}

fn describe(definition: &Definition, location: &Location) -> String {
    match location.scope {
        Scope::Definition => format!("from [{}]", location.scope.path(definition)),
        Scope::Region(_) => format!("in [{}]", location.scope.path(definition)),
    }
}

/// Two copies declare the same field regardless of where they live.
fn same_declaration(a: &Field, b: &Field) -> bool {
    let strip = |f: &Field| Field {
        path: None,
        region: None,
        origin: None,
        ..f.clone()
    };
    strip(a) == strip(b)
}

fn propagate_region_properties(definition: &mut Definition) {
    for index in 0..definition.regions.len() {
        let region = &definition.regions[index];
        let identifier = region.identifier.clone();
        let (order, collapsed, display_type) =
            (region.order, region.collapsed, region.display_type);

        let apply = |field: &mut Field| {
            if field.order.is_none() {
                field.order = order;
            }
            if field.collapsed.is_none() {
                field.collapsed = collapsed;
            }
            if field.display_type.is_none() {
                field.display_type = display_type;
            }
        };

        definition.regions[index].fields.iter_mut().for_each(apply);
        definition
            .fields
            .iter_mut()
            .filter(|f| f.region.as_deref() == Some(identifier.as_str()))
            .for_each(apply);
    }
}

/// Extract default-value template bindings for fields that have none yet.
pub fn prepare_default_value_suggests(definition: &mut Definition) {
    definition.for_each_field_mut(|field| {
        if !field.template_bindings.is_empty() {
            return;
        }
        if let Some(template) = field.default_value_template.as_deref() {
            field.template_bindings = template_bindings(template);
        }
    });
}

/// Fill every unset attribute with its configured default.
pub fn set_default_properties(definition: &mut Definition, config: &CompilerConfig) {
    definition.for_each_field_mut(|field| {
        field.mandatory.get_or_insert(false);
        field.display_type.get_or_insert(config.default_field_display);
        if field.uri.as_deref().map_or(true, |uri| uri.trim().is_empty()) {
            field.uri = Some(config.uri_placeholder.clone());
        }
    });
    for region in &mut definition.regions {
        region.collapsed.get_or_insert(false);
        region.display_type.get_or_insert(config.default_region_display);
    }
    for transition in &mut definition.transitions {
        transition
            .display_type
            .get_or_insert(config.default_transition_display);
    }
}
