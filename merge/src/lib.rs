//! Definition merge logic
//!
//! Merges a parent definition into a child, keyed by identifier:
//! - Fields: copied when absent, otherwise the child's declaration wins untouched
//! - Regions: deep-copied when absent, otherwise their fields are merged recursively
//! - Transitions: copied when absent (shallow), otherwise the child's wins
//!
//! There is no attribute-level merging of fields: a redeclared field in the
//! child is authoritative as a whole.

use defcomp_core::{Definition, Field, Region, Transition};
use std::collections::HashSet;

/// Counts of entries a merge copied into the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Fields copied (top level and inside regions).
    pub fields: usize,
    /// Whole regions copied.
    pub regions: usize,
    /// Transitions copied.
    pub transitions: usize,
}

impl MergeReport {
    /// Returns true if the merge did not change the target.
    pub fn is_empty(&self) -> bool {
        self.fields == 0 && self.regions == 0 && self.transitions == 0
    }

    fn absorb(&mut self, other: MergeReport) {
        self.fields += other.fields;
        self.regions += other.regions;
        self.transitions += other.transitions;
    }
}

/// Something a parent of the same kind can be merged into.
pub trait Mergeable {
    /// Merge `source` into `self`, keeping every entry `self` already declares.
    fn merge_from(&mut self, source: &Self) -> MergeReport;
}

impl Mergeable for Region {
    fn merge_from(&mut self, source: &Self) -> MergeReport {
        MergeReport {
            fields: merge_fields(&mut self.fields, &source.fields),
            ..MergeReport::default()
        }
    }
}

impl Mergeable for Definition {
    fn merge_from(&mut self, source: &Self) -> MergeReport {
        let mut report = MergeReport {
            fields: merge_fields(&mut self.fields, &source.fields),
            ..MergeReport::default()
        };
        report.absorb(merge_regions(&mut self.regions, &source.regions));
        report.transitions = merge_transitions(&mut self.transitions, &source.transitions);
        report
    }
}

/// Append a copy of every source field whose identifier is absent in `target`.
///
/// Returns the number of copied fields.
pub fn merge_fields(target: &mut Vec<Field>, source: &[Field]) -> usize {
    let existing: HashSet<String> = target.iter().map(|f| f.identifier.clone()).collect();
    let before = target.len();
    target.extend(
        source
            .iter()
            .filter(|f| !existing.contains(&f.identifier))
            .cloned(),
    );
    target.len() - before
}

/// Deep-copy absent regions and merge the fields of regions present in both.
pub fn merge_regions(target: &mut Vec<Region>, source: &[Region]) -> MergeReport {
    let mut report = MergeReport::default();
    for source_region in source {
        match target
            .iter_mut()
            .find(|r| r.identifier == source_region.identifier)
        {
            Some(target_region) => report.absorb(target_region.merge_from(source_region)),
            None => {
                target.push(source_region.clone());
                report.regions += 1;
            }
        }
    }
    report
}

/// Append a copy of every source transition whose identifier is absent in `target`.
pub fn merge_transitions(target: &mut Vec<Transition>, source: &[Transition]) -> usize {
    let existing: HashSet<String> = target.iter().map(|t| t.identifier.clone()).collect();
    let before = target.len();
    target.extend(
        source
            .iter()
            .filter(|t| !existing.contains(&t.identifier))
            .cloned(),
    );
    target.len() - before
}
