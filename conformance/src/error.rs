//! Error taxonomy for the harness.
//!
//! The variants map one-to-one onto check outcomes: missing configuration
//! becomes a skip, transport and fixture trouble become errors, parse and
//! assertion trouble become failures. See [`crate::checks::run_check`] for
//! the mapping.
//!
//! The whole tree is `Clone` so a failed provisioning attempt can be cached
//! by the lifecycle manager and replayed to later checks without issuing a
//! second POST. Network errors are captured as display text for the same
//! reason (`reqwest::Error` is not `Clone`).

use std::fmt;

/// A failed protocol assertion: what was required, what was observed, and
/// the resource the observation was made against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    /// The condition the LDP specification requires.
    pub expected: String,
    /// What the server actually returned.
    pub actual: String,
    /// URI of the resource or container under test.
    pub subject: String,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {}; got {} (at {})",
            self.expected, self.actual, self.subject
        )
    }
}

/// Everything that can go wrong while running a check.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HarnessError {
    /// A suite parameter the check depends on was not supplied.
    #[error("test parameter `{0}` is not configured")]
    ConfigurationMissing(&'static str),

    /// No container URI was supplied in any of the accepted slots.
    #[error("no container is configured (basic, direct, or indirect)")]
    NoContainerConfigured,

    /// Network-level failure: connection refused, timeout, malformed
    /// response. Distinct from any HTTP status the server returns.
    #[error("transport failure during {method} {uri}: {reason}")]
    Transport {
        /// HTTP method of the failed exchange.
        method: String,
        /// Request target.
        uri: String,
        /// Display text of the underlying client error.
        reason: String,
    },

    /// A response body advertised as RDF could not be parsed.
    #[error("cannot parse response as {media_type}: {reason}")]
    Parse {
        /// Content type the server claimed.
        media_type: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A protocol requirement did not hold.
    #[error("{0}")]
    Assertion(AssertionFailure),

    /// A fixture file named in the configuration could not be read.
    #[error("cannot read fixture `{path}`: {reason}")]
    Fixture {
        /// Path as configured.
        path: String,
        /// I/O diagnostic.
        reason: String,
    },

    /// The HTTP client itself could not be constructed.
    #[error("cannot build HTTP client: {0}")]
    Client(String),
}

impl HarnessError {
    /// Builds a [`HarnessError::Transport`] from a failed reqwest call.
    pub fn transport(method: &reqwest::Method, uri: &str, source: &reqwest::Error) -> Self {
        HarnessError::Transport {
            method: method.to_string(),
            uri: uri.to_owned(),
            reason: source.to_string(),
        }
    }

    /// Builds a [`HarnessError::Assertion`] from its three parts.
    pub fn assertion(
        expected: impl Into<String>,
        actual: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        HarnessError::Assertion(AssertionFailure {
            expected: expected.into(),
            actual: actual.into(),
            subject: subject.into(),
        })
    }

    /// True for conditions that skip a check rather than fail it.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            HarnessError::ConfigurationMissing(_) | HarnessError::NoContainerConfigured
        )
    }

    /// True for conditions reported as harness errors rather than server
    /// non-conformance (transport trouble, unreadable fixtures, a client
    /// that would not even build).
    #[must_use]
    pub fn is_harness_fault(&self) -> bool {
        matches!(
            self,
            HarnessError::Transport { .. }
                | HarnessError::Fixture { .. }
                | HarnessError::Client(_)
        )
    }
}

/// Check-level result alias.
pub type CheckOutcome = Result<(), HarnessError>;
