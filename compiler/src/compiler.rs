//! Main compiler implementation.

use crate::engine::compile_forest;
use crate::normalize::{normalize, resolve_data_types};
use crate::passes::{
    prepare_default_value_suggests, remove_deleted_elements, remove_inherited_duplicates,
    remove_system_transitions, set_default_properties, synch_region_properties,
};
use crate::{CompileResult, CompilerConfig, DanglingParentPolicy, DefinitionState, Diagnostics};
use defcomp_core::Definition;
use defcomp_forest::{Forest, ForestBuilder, Unresolved};
use tracing::{debug, trace, warn};

/// Outcome of compiling a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Rendered diagnostics, in discovery order.
    pub diagnostics: Vec<String>,
    /// Number of definitions that reached the compiled state.
    pub compiled: usize,
    /// Number of definitions compiled as roots.
    pub roots: usize,
    /// Definitions whose parent was not part of the batch.
    pub unresolved: Vec<Unresolved>,
}

impl CompileReport {
    /// Returns true if no diagnostic was produced.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The Compiler resolves a batch of definitions in place.
///
/// It holds only configuration, so one instance can serve concurrent batches.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// Create a compiler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile definitions in place and return the diagnostics.
    pub fn compile(&self, definitions: &mut [Definition]) -> CompileResult<Vec<String>> {
        Ok(self.compile_report(definitions)?.diagnostics)
    }

    /// Compile definitions in place and return the full report.
    ///
    /// Fails only when the batch has no valid inheritance forest. Problems in
    /// a single definition become diagnostics and never stop the batch.
    pub fn compile_report(&self, definitions: &mut [Definition]) -> CompileResult<CompileReport> {
        let forest = ForestBuilder::new()
            .with_resolution(self.config.dangling_parent.resolution())
            .build(definitions)?;

        let mut diagnostics = Diagnostics::new();
        self.report_unresolved(&forest, &mut diagnostics);

        let mut states = vec![DefinitionState::Uncompiled; definitions.len()];
        compile_forest(definitions, &forest, &mut states, |definition, visit| {
            self.finish(definition, forest.has_parent(visit.definition), &mut diagnostics);
        });

        let report = CompileReport {
            compiled: states.iter().filter(|s| s.is_compiled()).count(),
            roots: forest.roots().len(),
            unresolved: forest.unresolved().to_vec(),
            diagnostics: diagnostics.into_messages(),
        };

        debug!(
            definitions = definitions.len(),
            compiled = report.compiled,
            roots = report.roots,
            diagnostics = report.diagnostics.len(),
            "Compiled definitions"
        );

        Ok(report)
    }

    fn report_unresolved(&self, forest: &Forest, diagnostics: &mut Diagnostics) {
        for unresolved in forest.unresolved() {
            match self.config.dangling_parent {
                DanglingParentPolicy::Report => diagnostics.push(
                    &unresolved.definition,
                    format!("Parent definition [{}] not found", unresolved.parent),
                ),
                DanglingParentPolicy::TreatAsRoot => warn!(
                    definition = %unresolved.definition,
                    parent = %unresolved.parent,
                    "Compiling definition with missing parent as root"
                ),
                // Rejected while building the forest.
                DanglingParentPolicy::Reject => {}
            }
        }
    }

    /// Prune, synchronize, fill defaults and run the final normalization.
    ///
    /// Runs right after the definition is merged and before its children are.
    fn finish(&self, definition: &mut Definition, has_parent: bool, diagnostics: &mut Diagnostics) {
        remove_deleted_elements(definition);
        remove_system_transitions(definition);
        if has_parent {
            remove_inherited_duplicates(definition);
        }
        let messages = synch_region_properties(definition);
        diagnostics.extend(&definition.identifier, messages);

        prepare_default_value_suggests(definition);
        set_default_properties(definition, &self.config);

        normalize(definition);
        if self.config.resolve_type_descriptors {
            let messages = resolve_data_types(definition);
            diagnostics.extend(&definition.identifier, messages);
        }
        trace!(
            definition = %definition.identifier,
            diagnostics = diagnostics.for_definition(&definition.identifier).count(),
            "Finished definition"
        );
    }
}

/// Compile definitions with the default configuration.
pub fn compile(definitions: &mut [Definition]) -> CompileResult<Vec<String>> {
    Compiler::new().compile(definitions)
}
