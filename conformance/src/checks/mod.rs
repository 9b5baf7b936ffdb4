//! The check catalog and its execution plumbing.
//!
//! Checks are grouped the way the LDP specification groups its normative
//! sections: [`resource`] covers obligations every LDP resource carries,
//! [`container`] covers containers, and [`nonrdf`] covers binary (LDP-NR)
//! support. Each check pairs a [`Check`] metadata record with a function
//! from [`CheckContext`] to [`CheckOutcome`]; [`run_check`] folds the pair
//! into one [`CheckResult`] row, classifying errors per [`HarnessError`].

pub mod container;
pub mod nonrdf;
pub mod resource;

use crate::config::SuiteConfig;
use crate::error::{CheckOutcome, HarnessError};
use crate::http::{is_entity_tag, is_strong_entity_tag, ExchangeResult, HttpExchange};
use crate::lifecycle::ResourceLifecycle;
use crate::report::{Automation, Check, CheckResult};

/// Shared state threaded through every check of one run.
pub struct CheckContext {
    /// The HTTP accessor all checks go through.
    pub http: HttpExchange,
    /// Resolved run configuration.
    pub config: SuiteConfig,
    /// Provisioner for the member resource the resource checks target.
    pub member: ResourceLifecycle,
}

impl CheckContext {
    /// Builds the context for one run against `config`.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Client`] when the HTTP client cannot be built.
    pub fn new(config: SuiteConfig) -> Result<Self, HarnessError> {
        let http = HttpExchange::new(&config)?;
        let member = ResourceLifecycle::from_config(&config);
        Ok(CheckContext {
            http,
            config,
            member,
        })
    }
}

/// Runs one check and folds its outcome into a result row.
///
/// Manual and client-only checks are reported as skips without invoking
/// `run`. A returned error classifies by kind: missing configuration is a
/// skip, transport or fixture trouble is a harness error, and everything
/// else is a conformance failure.
pub fn run_check(
    check: &Check,
    ctx: &mut CheckContext,
    run: impl FnOnce(&mut CheckContext) -> CheckOutcome,
) -> CheckResult {
    let result = match check.automation {
        Automation::Manual => CheckResult::skipped(check, "manual verification required"),
        Automation::ClientOnly => {
            CheckResult::skipped(check, "client obligation; not verifiable against a server")
        }
        Automation::Automated => match run(ctx) {
            Ok(()) => CheckResult::passed(check, check.description),
            Err(err) if err.is_skip() => CheckResult::skipped(check, err.to_string()),
            Err(err) if err.is_harness_fault() => CheckResult::errored(check, err.to_string()),
            Err(HarnessError::Assertion(failure)) => CheckResult::failed_with_details(
                check,
                format!("expected {}", failure.expected),
                vec![
                    format!("actual: {}", failure.actual),
                    format!("at: {}", failure.subject),
                ],
            ),
            Err(err) => CheckResult::failed(check, err.to_string()),
        },
    };
    tracing::debug!(
        id = check.id,
        outcome = result.outcome.as_str(),
        "check evaluated"
    );
    result
}

/// Fails unless the response status is 2xx.
pub(crate) fn require_success(response: &ExchangeResult) -> CheckOutcome {
    if response.is_success() {
        Ok(())
    } else {
        Err(HarnessError::assertion(
            "a 2xx status",
            format!("status {}", response.status),
            response.uri.as_str(),
        ))
    }
}

/// Fails unless the response status is exactly `expected`.
pub(crate) fn require_status(response: &ExchangeResult, expected: u16) -> CheckOutcome {
    if response.status == expected {
        Ok(())
    } else {
        Err(HarnessError::assertion(
            format!("status {expected}"),
            format!("status {}", response.status),
            response.uri.as_str(),
        ))
    }
}

/// Fails unless the response content type has the expected essence.
pub(crate) fn require_media_type(response: &ExchangeResult, expected: &str) -> CheckOutcome {
    match response.media_type() {
        Some(essence) if essence == expected => Ok(()),
        Some(essence) => Err(HarnessError::assertion(
            format!("a `{expected}` representation"),
            format!("`{essence}`"),
            response.uri.as_str(),
        )),
        None => Err(HarnessError::assertion(
            format!("a `{expected}` representation"),
            "no Content-Type header",
            response.uri.as_str(),
        )),
    }
}

/// Fails unless the response carries a well-formed entity-tag; with
/// `strong` set, the `W/` weak form is rejected too.
pub(crate) fn require_entity_tag(response: &ExchangeResult, strong: bool) -> CheckOutcome {
    let expected = if strong {
        "a strong entity-tag"
    } else {
        "a well-formed entity-tag"
    };
    let Some(tag) = response.etag() else {
        return Err(HarnessError::assertion(
            expected,
            "no ETag header",
            response.uri.as_str(),
        ));
    };
    let well_formed = if strong {
        is_strong_entity_tag(tag)
    } else {
        is_entity_tag(tag)
    };
    if well_formed {
        Ok(())
    } else {
        Err(HarnessError::assertion(
            expected,
            format!("`{tag}`"),
            response.uri.as_str(),
        ))
    }
}

/// Fails unless the response advertises `<target>; rel="relation"`.
pub(crate) fn require_link(
    response: &ExchangeResult,
    target: &str,
    relation: &str,
) -> CheckOutcome {
    if response.has_link(target, relation) {
        Ok(())
    } else {
        Err(HarnessError::assertion(
            format!("Link `<{target}>; rel=\"{relation}\"`"),
            response.link_summary(),
            response.uri.as_str(),
        ))
    }
}
