//! Suite configuration.
//!
//! A [`SuiteConfig`] is built once (by the CLI or a test), absolutized, and
//! then threaded read-only into every component constructor. Nothing here is
//! global state.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::HarnessError;

/// Default network timeout applied to every exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Basic-auth credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password (may be empty).
    pub password: String,
}

impl Credentials {
    /// Parses a `user:pass` credential spec. Returns `None` when the colon
    /// separator is missing; an empty password (`user:`) is accepted.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (username, password) = raw.split_once(':')?;
        Some(Credentials {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }
}

/// Immutable parameters of one suite run.
#[derive(Debug, Clone, Default)]
pub struct SuiteConfig {
    /// Server root, used to resolve relative target URIs.
    pub server: Option<String>,
    /// URI of an `ldp:BasicContainer` to exercise.
    pub basic_container: Option<String>,
    /// URI of an `ldp:DirectContainer` to exercise.
    pub direct_container: Option<String>,
    /// URI of an `ldp:IndirectContainer` to exercise.
    pub indirect_container: Option<String>,
    /// Pre-existing member resource; when set, the harness adopts it
    /// instead of provisioning one (and never deletes it).
    pub member_resource: Option<String>,
    /// Turtle fixture used verbatim as the member-creation POST body.
    pub member_ttl: Option<PathBuf>,
    /// Basic-auth credentials applied to every exchange.
    pub auth: Option<Credentials>,
    /// Network timeout; `None` means [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
    /// Headers added to every request before method-specific ones.
    pub default_headers: Vec<(String, String)>,
}

impl SuiteConfig {
    /// Effective network timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Resolves every configured target URI against `server`, so the rest
    /// of the harness only ever sees absolute URIs.
    ///
    /// # Errors
    ///
    /// [`HarnessError::ConfigurationMissing`] when a relative target is
    /// configured but no `server` root is.
    pub fn absolutize(mut self) -> Result<Self, HarnessError> {
        self.basic_container = resolve_opt(self.server.as_deref(), self.basic_container)?;
        self.direct_container = resolve_opt(self.server.as_deref(), self.direct_container)?;
        self.indirect_container = resolve_opt(self.server.as_deref(), self.indirect_container)?;
        self.member_resource = resolve_opt(self.server.as_deref(), self.member_resource)?;
        Ok(self)
    }
}

/// Parses a `Name: value` header spec. Returns `None` when the colon is
/// missing or the name is empty.
#[must_use]
pub fn parse_header_spec(raw: &str) -> Option<(String, String)> {
    let (name, value) = raw.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_owned(), value.trim().to_owned()))
}

fn resolve_opt(
    server: Option<&str>,
    target: Option<String>,
) -> Result<Option<String>, HarnessError> {
    match target {
        None => Ok(None),
        Some(t) if is_absolute(&t) => Ok(Some(t)),
        Some(t) => {
            let base = server.ok_or(HarnessError::ConfigurationMissing("server"))?;
            Ok(Some(join_base(base, &t)))
        }
    }
}

fn is_absolute(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

fn join_base(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = relative.trim_start_matches('/');
    format!("{base}/{relative}")
}
