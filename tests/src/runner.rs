//! Scenario runner.

use defcomp_compiler::Compiler;
use defcomp_core::Definition;
use tracing_subscriber::EnvFilter;

use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::Fixture;
use crate::scenario::Scenario;

/// Install a test log subscriber once; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Runs a scenario against the compiler.
pub struct Runner<'s> {
    scenario: &'s Scenario,
    fixture: Fixture,
}

impl<'s> Runner<'s> {
    /// Create a new runner for a scenario.
    pub fn new(scenario: &'s Scenario) -> ScenarioResult<Self> {
        let fixture = scenario.load_fixture()?;
        Ok(Self { scenario, fixture })
    }

    /// Run the scenario and return the compiled batch.
    pub fn run(&self) -> ScenarioResult<Vec<Definition>> {
        init_tracing();

        // 1. Compile the batch
        let compiler = Compiler::with_config(self.fixture.config.clone().unwrap_or_default());
        let mut definitions = self.fixture.definitions.clone();
        let result = compiler
            .compile_report(&mut definitions)
            .map_err(|e| e.to_string());

        // 2. Verify the batch outcome
        let outcome = self.scenario.outcome_expectation();
        outcome.verify(self.scenario.name(), &result)?;
        if outcome.expects_error() {
            return Ok(definitions);
        }

        // 3. Verify each definition
        for check in self.scenario.checks() {
            let definition = definitions
                .iter()
                .find(|d| d.identifier == check.definition)
                .ok_or_else(|| ScenarioError::definition_not_found(&check.definition))?;
            check.expectation.verify(definition)?;
        }

        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use crate::scenario::Scenario;
    use defcomp_core::{DisplayType, Field};

    #[test]
    fn test_runner_with_inline_definitions() {
        let scenario = Scenario::new("inline")
            .definitions(vec![
                defcomp_core::Definition::new("base")
                    .field(Field::new("a", "n5").with_display(DisplayType::ReadOnly)),
                defcomp_core::Definition::new("child").extends("base"),
            ])
            .expect("child", |e| e.fields(&["a"]).origin("a", "base"))
            .outcome(|o| o.clean().compiled(2).roots(1));

        let compiled = scenario.run().unwrap();

        assert_eq!(compiled.len(), 2);
    }

    #[test]
    fn test_runner_unknown_definition() {
        let scenario = Scenario::new("unknown")
            .definitions(vec![defcomp_core::Definition::new("base")])
            .expect("ghost", |e| e.field_count(0));

        assert!(scenario.run().is_err());
    }
}
