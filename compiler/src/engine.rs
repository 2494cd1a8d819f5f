//! Parent-first compilation over the definition forest.

use crate::normalize::{link, normalize};
use crate::DefinitionState;
use defcomp_core::Definition;
use defcomp_forest::{Forest, Visit};
use defcomp_merge::Mergeable;
use tracing::{debug, trace};

/// Compile every definition parents first.
///
/// Each visited definition is normalized and linked, merged with its parent
/// and handed to `finish` before any of its children is visited. Children
/// therefore merge from a parent that is already pruned and normalized.
/// Roots are only normalized and linked before `finish`.
pub(crate) fn compile_forest<F>(
    definitions: &mut [Definition],
    forest: &Forest,
    states: &mut [DefinitionState],
    mut finish: F,
) where
    F: FnMut(&mut Definition, &Visit),
{
    for visit in forest.walk() {
        let index = visit.definition;
        {
            let definition = &mut definitions[index];
            normalize(definition);
            link(definition);
        }
        advance(states, index, &definitions[index].identifier, DefinitionState::TreeLinked);

        if let Some(parent) = visit.parent {
            debug_assert!(states[parent].is_compiled());
            let (child, source) = pair_mut(definitions, index, parent);
            let report = child.merge_from(source);
            debug!(
                definition = %child.identifier,
                parent = %source.identifier,
                depth = visit.depth,
                fields = report.fields,
                regions = report.regions,
                transitions = report.transitions,
                "Merged definition with parent"
            );
            normalize(child);
        }
        advance(states, index, &definitions[index].identifier, DefinitionState::Merged);

        finish(&mut definitions[index], &visit);
        for state in [
            DefinitionState::Pruned,
            DefinitionState::Normalized,
            DefinitionState::Compiled,
        ] {
            advance(states, index, &definitions[index].identifier, state);
        }
    }
}

/// Move a definition to its next state.
fn advance(
    states: &mut [DefinitionState],
    index: usize,
    identifier: &str,
    to: DefinitionState,
) {
    debug_assert!(
        states[index].can_advance_to(to),
        "{} cannot move from {} to {}",
        identifier,
        states[index],
        to
    );
    trace!(
        definition = identifier,
        from = %states[index],
        to = %to,
        "Definition state changed"
    );
    states[index] = to;
}

/// Borrow one element mutably and another one shared.
fn pair_mut<T>(items: &mut [T], target: usize, source: usize) -> (&mut T, &T) {
    debug_assert_ne!(target, source);
    if target < source {
        let (head, tail) = items.split_at_mut(source);
        (&mut head[target], &tail[0])
    } else {
        let (head, tail) = items.split_at_mut(target);
        (&mut tail[0], &head[source])
    }
}
