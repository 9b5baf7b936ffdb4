//! Conformance checks for Linked Data Platform servers.
//!
//! This crate drives a live LDP server through the HTTP exchanges the W3C
//! LDP specification prescribes and reports, per check, whether the server
//! honored the requirement. Checks carry their requirement level and
//! specification reference, so a report reads like the conformance clauses
//! of the LDP specification itself.
//!
//! # Check Groups
//!
//! | Group | Checks | Target |
//! |-------|--------|--------|
//! | `checks::resource` | 7 | the member resource (configured or provisioned) |
//! | `checks::container` | 4 | the first configured container, basic-first |
//! | `checks::nonrdf` | 6 | fresh child containers under the selected root |
//!
//! Checks whose preconditions are not configured are reported as skips, not
//! failures; the suite runs with any subset of targets configured.
//!
//! # Entry Point
//!
//! ```no_run
//! use ldp_conformance::{run_suite, SuiteConfig};
//!
//! let config = SuiteConfig {
//!     server: Some("http://localhost:8080/".into()),
//!     basic_container: Some("http://localhost:8080/container/".into()),
//!     ..SuiteConfig::default()
//! };
//! let config = config.absolutize().expect("resolve targets");
//! let report = run_suite(config).expect("Failed to run the suite");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod checks;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod lifecycle;
pub mod link;
pub mod rdf;
pub mod report;
pub mod target;

pub use config::SuiteConfig;
pub use error::HarnessError;
pub use report::{CheckResult, Level, Outcome, SuiteReport};

use checks::CheckContext;

/// Runs the whole check catalog against the configured server and returns
/// the aggregated report.
///
/// Groups run in this order:
/// 1. Requirements on every LDP resource (LDPR / LDP-RS)
/// 2. Container behavior (type advertisement, creation, containment)
/// 3. Binary (LDP-NR) support
///
/// The member resource the resource checks share is provisioned at most
/// once and deleted at the end when the harness created it. Resources the
/// creation checks make are deleted check-by-check.
///
/// # Errors
///
/// [`HarnessError::Client`] when the HTTP client cannot be built. Trouble
/// during individual checks is folded into the report instead.
pub fn run_suite(config: SuiteConfig) -> Result<SuiteReport, HarnessError> {
    let mut ctx = CheckContext::new(config)?;
    let mut report = SuiteReport::new();

    // 1. Requirements on every LDP resource
    report.extend(checks::resource::run(&mut ctx));

    // 2. Container behavior
    report.extend(checks::container::run(&mut ctx));

    // 3. Binary (LDP-NR) support
    report.extend(checks::nonrdf::run(&mut ctx));

    // Everything the harness provisioned goes away with the run.
    let CheckContext { http, member, .. } = ctx;
    member.teardown(&http);

    Ok(report)
}
