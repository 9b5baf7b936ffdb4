//! Report types: check metadata, outcomes, and aggregation.

use serde::Serialize;

/// Normative level of the requirement behind a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// An absolute requirement.
    Must,
    /// A recommendation.
    Should,
    /// Optional behavior; failing is non-conforming only if attempted.
    May,
}

impl Level {
    /// Uppercase label used in rendered reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Must => "MUST",
            Level::Should => "SHOULD",
            Level::May => "MAY",
        }
    }
}

/// How a check can be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Automation {
    /// Fully automated against the server under test.
    Automated,
    /// Needs a human; always reported as a skip.
    Manual,
    /// Constrains clients, not servers; always reported as a skip.
    ClientOnly,
}

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The requirement held.
    Passed,
    /// The server violated the requirement (or returned unparseable RDF).
    Failed,
    /// Preconditions were not configured, or the check is not automatable.
    Skipped,
    /// The harness could not complete the check (transport, fixtures).
    Errored,
}

impl Outcome {
    /// Short label used in rendered reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Passed => "PASS",
            Outcome::Failed => "FAIL",
            Outcome::Skipped => "SKIP",
            Outcome::Errored => "ERROR",
        }
    }
}

/// Static metadata of one check in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    /// Stable identifier, e.g. `ldpc-linktypehdr`.
    pub id: &'static str,
    /// Requirement level.
    pub level: Level,
    /// Section of the LDP specification the requirement comes from.
    pub spec_ref: &'static str,
    /// Automation status.
    pub automation: Automation,
    /// One-sentence statement of the requirement.
    pub description: &'static str,
}

/// One check's result, carrying its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Stable check identifier.
    pub id: &'static str,
    /// Requirement level.
    pub level: Level,
    /// Specification reference URI.
    pub spec_ref: &'static str,
    /// Automation status.
    pub automation: Automation,
    /// What happened.
    pub outcome: Outcome,
    /// Human-readable message describing the outcome.
    pub message: String,
    /// Optional additional detail lines.
    pub details: Vec<String>,
}

impl CheckResult {
    fn with_outcome(check: &Check, outcome: Outcome, message: impl Into<String>) -> Self {
        CheckResult {
            id: check.id,
            level: check.level,
            spec_ref: check.spec_ref,
            automation: check.automation,
            outcome,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Creates a passing result.
    #[must_use]
    pub fn passed(check: &Check, message: impl Into<String>) -> Self {
        Self::with_outcome(check, Outcome::Passed, message)
    }

    /// Creates a failing result.
    #[must_use]
    pub fn failed(check: &Check, message: impl Into<String>) -> Self {
        Self::with_outcome(check, Outcome::Failed, message)
    }

    /// Creates a failing result with additional detail lines.
    #[must_use]
    pub fn failed_with_details(
        check: &Check,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        let mut result = Self::with_outcome(check, Outcome::Failed, message);
        result.details = details;
        result
    }

    /// Creates a skipped result.
    #[must_use]
    pub fn skipped(check: &Check, message: impl Into<String>) -> Self {
        Self::with_outcome(check, Outcome::Skipped, message)
    }

    /// Creates an errored result.
    #[must_use]
    pub fn errored(check: &Check, message: impl Into<String>) -> Self {
        Self::with_outcome(check, Outcome::Errored, message)
    }

    /// True if the server violated the requirement.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Failed
    }

    /// True if the result should fail the run (failure or harness error).
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self.outcome, Outcome::Failed | Outcome::Errored)
    }
}

/// Aggregated report of one suite run.
#[derive(Debug, Default, Serialize)]
pub struct SuiteReport {
    /// All individual check results, in execution order.
    pub results: Vec<CheckResult>,
}

impl SuiteReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        SuiteReport::default()
    }

    /// Appends a result.
    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    /// Extends this report with the results of another.
    pub fn extend(&mut self, other: SuiteReport) {
        self.results.extend(other.results);
    }

    /// Number of results with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Number of failures at the given requirement level.
    #[must_use]
    pub fn failures_at(&self, level: Level) -> usize {
        self.results
            .iter()
            .filter(|r| r.is_failure() && r.level == level)
            .count()
    }

    /// True when nothing failed and nothing errored.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.results.iter().any(CheckResult::is_blocking)
    }
}
