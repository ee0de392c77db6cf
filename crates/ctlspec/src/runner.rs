//! In-process example runner
//!
//! Runs every example of a group tree strictly one after another. Each
//! example gets a fresh [`ExampleContext`], a fresh double factory and a
//! fresh handler, so a failing example never leaks state into its
//! siblings.
//!
//! ```
//! use ctlspec::{ExampleGroup, ExampleRunner, HandlerResult, RequestScope, Verb, Action, Params};
//!
//! fn redirect_home(_: Verb, _: &Action, _: &Params, scope: &mut RequestScope<'_>) -> HandlerResult {
//!     scope.redirect_to("/");
//!     Ok(())
//! }
//!
//! let mut group = ExampleGroup::new("HomeController");
//! group.assert_redirects_action_to("index", "/").unwrap();
//!
//! let report = ExampleRunner::default().run(&group, || redirect_home);
//! assert!(report.all_passed());
//! ```

use crate::group::{ExampleGroup, Hook};
use ctlspec_application::ExampleContext;
use ctlspec_domain::error::{Error, Result};
use ctlspec_domain::{ActionHandler, HarnessSettings};
use ctlspec_infrastructure::logging::{init_logging, log_example_result};
use ctlspec_infrastructure::{ConfigLoader, HarnessConfig, InMemoryDoubleFactory};
use serde_json::json;
use tracing::{debug, info, info_span};

/// Outcome of one example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleOutcome {
    /// Group descriptions and the example's own, space separated
    pub description: String,
    /// Failure message, `None` when the example passed
    pub failure: Option<String>,
}

impl ExampleOutcome {
    /// Whether the example passed
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Outcomes of one run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Every example's outcome
    pub outcomes: Vec<ExampleOutcome>,
}

impl RunReport {
    /// Number of passed examples
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed()).count()
    }

    /// Number of failed examples
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Whether every example passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(ExampleOutcome::passed)
    }

    /// Failed examples only
    pub fn failures(&self) -> impl Iterator<Item = &ExampleOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }

    /// Outcome of the example with this full description
    pub fn outcome(&self, description: &str) -> Option<&ExampleOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.description == description)
    }

    /// `Ok` when every example passed, otherwise one error listing the failures
    pub fn into_result(self) -> Result<()> {
        if self.all_passed() {
            return Ok(());
        }
        let lines: Vec<String> = self
            .failures()
            .map(|outcome| {
                format!(
                    "{}: {}",
                    outcome.description,
                    outcome.failure.as_deref().unwrap_or_default()
                )
            })
            .collect();
        Err(Error::assertion_failed(lines.join("\n")))
    }

    /// Convert to JSON for artifact storage
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "passed": self.passed(),
            "failed": self.failed(),
            "examples": self
                .outcomes
                .iter()
                .map(|outcome| json!({
                    "description": outcome.description,
                    "passed": outcome.passed(),
                    "failure": outcome.failure,
                }))
                .collect::<Vec<_>>(),
        })
    }
}

/// Runs example groups against a handler under test
#[derive(Debug, Clone, Default)]
pub struct ExampleRunner {
    settings: HarnessSettings,
}

impl ExampleRunner {
    /// Runner using `settings` for every example
    pub fn new(settings: HarnessSettings) -> Self {
        Self { settings }
    }

    /// Runner using a loaded configuration
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.harness.clone())
    }

    /// Load `ctlspec.toml` and `CTLSPEC__*` overrides, then set up logging
    ///
    /// Logging that is already set up, e.g. by an earlier runner in the
    /// same test binary, is kept.
    pub fn from_environment() -> Result<Self> {
        let config = ConfigLoader::new().load()?;
        if let Err(err) = init_logging(&config.logging) {
            debug!(error = %err, "keeping existing logging setup");
        }
        Ok(Self::from_config(&config))
    }

    /// Settings every example starts with
    pub fn settings(&self) -> &HarnessSettings {
        &self.settings
    }

    /// Fresh context for one example
    pub fn new_context(&self) -> ExampleContext {
        let factory = InMemoryDoubleFactory::from_settings(&self.settings);
        ExampleContext::new(self.settings.clone(), Box::new(factory))
    }

    /// Run every example of `group` and its nested groups
    ///
    /// `handler_factory` builds the handler under test once per example.
    pub fn run<H, F>(&self, group: &ExampleGroup, handler_factory: F) -> RunReport
    where
        H: ActionHandler,
        F: Fn() -> H,
    {
        let mut report = RunReport::default();
        let mut hooks = Vec::new();
        let mut path = Vec::new();
        self.run_group(group, &mut hooks, &mut path, &handler_factory, &mut report);
        info!(
            group = %group.description(),
            passed = report.passed(),
            failed = report.failed(),
            "example group finished"
        );
        report
    }

    fn run_group<'g, H, F>(
        &self,
        group: &'g ExampleGroup,
        hooks: &mut Vec<&'g Hook>,
        path: &mut Vec<&'g str>,
        handler_factory: &F,
        report: &mut RunReport,
    ) where
        H: ActionHandler,
        F: Fn() -> H,
    {
        let inherited = hooks.len();
        hooks.extend(group.hooks.iter());
        path.push(group.description());

        for example in &group.examples {
            let description = path
                .iter()
                .copied()
                .chain(std::iter::once(example.description()))
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            let span = info_span!("example", description = %description);
            let _entered = span.enter();

            let mut ctx = self.new_context();
            let mut handler = handler_factory();
            let outcome = hooks
                .iter()
                .try_for_each(|hook| hook(&mut ctx))
                .and_then(|()| (example.body)(&mut ctx, &mut handler));

            let failure = outcome.err().map(|err| err.to_string());
            log_example_result(&description, failure.is_none(), failure.as_deref());
            report.outcomes.push(ExampleOutcome {
                description,
                failure,
            });
        }

        for child in &group.children {
            self.run_group(child, hooks, path, handler_factory, report);
        }

        path.pop();
        hooks.truncate(inherited);
    }
}
