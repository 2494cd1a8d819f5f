//! Scenario definition and builder.

use std::path::{Path, PathBuf};

use defcomp_compiler::CompilerConfig;
use defcomp_core::Definition;

use crate::assertion::{Expectation, ExpectationBuilder, Outcome, OutcomeBuilder};
use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::Fixture;
use crate::runner::Runner;

/// Expectations for one definition of the batch.
#[derive(Debug)]
pub struct Check {
    /// Identifier of the compiled definition.
    pub definition: String,
    pub expectation: Expectation,
}

/// A complete test scenario.
#[derive(Debug)]
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    /// Path to the fixture file.
    fixture_path: Option<PathBuf>,
    /// Definitions given inline.
    definitions: Option<Vec<Definition>>,
    /// Configuration overriding the fixture's.
    config: Option<CompilerConfig>,
    /// Per-definition expectations.
    checks: Vec<Check>,
    /// Batch expectations.
    outcome: Outcome,
    /// Base path for resolving relative paths.
    base_path: PathBuf,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixture_path: None,
            definitions: None,
            config: None,
            checks: Vec::new(),
            outcome: Outcome::new(),
            base_path: fixtures_root(),
        }
    }

    /// Set the base path for resolving relative paths.
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Set the fixture file path (relative to fixtures/).
    pub fn fixture(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixture_path = Some(path.into());
        self
    }

    /// Use inline definitions instead of a fixture file.
    pub fn definitions(mut self, definitions: Vec<Definition>) -> Self {
        self.definitions = Some(definitions);
        self
    }

    /// Compile with this configuration.
    pub fn config(mut self, config: CompilerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Add expectations for a compiled definition.
    pub fn expect<F>(mut self, definition: impl Into<String>, expectation_fn: F) -> Self
    where
        F: FnOnce(ExpectationBuilder) -> ExpectationBuilder,
    {
        let expectation = expectation_fn(ExpectationBuilder::new()).build();
        self.checks.push(Check {
            definition: definition.into(),
            expectation,
        });
        self
    }

    /// Set the expectations for the batch as a whole.
    pub fn outcome<F>(mut self, outcome_fn: F) -> Self
    where
        F: FnOnce(OutcomeBuilder) -> OutcomeBuilder,
    {
        self.outcome = outcome_fn(OutcomeBuilder::new()).build();
        self
    }

    /// Run the scenario and return the compiled definitions.
    pub fn run(&self) -> ScenarioResult<Vec<Definition>> {
        Runner::new(self)?.run()
    }

    /// Get the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn outcome_expectation(&self) -> &Outcome {
        &self.outcome
    }

    /// Get the fixture path (resolved), if any.
    pub fn fixture_path(&self) -> Option<PathBuf> {
        self.fixture_path.as_ref().map(|p| self.resolve_path(p))
    }

    /// Get the batch and configuration, loading the fixture if needed.
    pub fn load_fixture(&self) -> ScenarioResult<Fixture> {
        let mut fixture = match (&self.definitions, self.fixture_path()) {
            (Some(definitions), _) => Fixture {
                config: None,
                definitions: definitions.clone(),
            },
            (None, Some(path)) => Fixture::load(&path)?,
            (None, None) => return Err(ScenarioError::missing_definitions(&self.name)),
        };
        if self.config.is_some() {
            fixture.config.clone_from(&self.config);
        }
        Ok(fixture)
    }

    /// Resolve a path relative to the base path.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }
}

/// Get the fixtures directory of this crate.
fn fixtures_root() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let fixtures = PathBuf::from(manifest_dir).join("fixtures");
        if fixtures.exists() {
            return fixtures;
        }
    }

    // Fallback: try current directory
    let cwd = std::env::current_dir().unwrap_or_default();
    for candidate in [cwd.join("fixtures"), cwd.join("tests").join("fixtures")] {
        if candidate.exists() {
            return candidate;
        }
    }

    // Give up and return a relative path
    PathBuf::from("fixtures")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_builder() {
        let scenario = Scenario::new("test")
            .fixture("full_scenario.json")
            .expect("child", |e| e.fields(&["prop1", "prop2", "prop3"]))
            .expect("parent", |e| e.field_count(3))
            .outcome(|o| o.clean());

        assert_eq!(scenario.name(), "test");
        assert_eq!(scenario.checks().len(), 2);
        assert_eq!(scenario.outcome_expectation().diagnostics, Some(0));
        assert!(scenario
            .fixture_path()
            .unwrap()
            .ends_with("full_scenario.json"));
    }

    #[test]
    fn test_inline_definitions_win_over_fixture() {
        let scenario = Scenario::new("inline")
            .fixture("does_not_exist.json")
            .definitions(vec![Definition::new("only")])
            .config(CompilerConfig::strict());

        let fixture = scenario.load_fixture().unwrap();

        assert_eq!(fixture.identifiers(), vec!["only"]);
        assert!(fixture.config.is_some());
    }

    #[test]
    fn test_missing_definitions() {
        let err = Scenario::new("empty").load_fixture().unwrap_err();
        assert!(matches!(err, ScenarioError::MissingDefinitions { .. }));
    }
}
