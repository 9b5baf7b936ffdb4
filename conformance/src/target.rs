//! Container selection and child-URI derivation.
//!
//! A suite run may configure up to three container variants; each test
//! context picks exactly one, in a fixed priority order, at construction
//! time. Child URIs for POSTed test resources get a random alphanumeric
//! segment so parallel runs cannot collide by name.

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

use ldp_vocab::namespaces::ldp;

use crate::config::SuiteConfig;
use crate::error::HarnessError;

/// Length of generated child-URI segments.
const SEGMENT_LEN: usize = 16;

/// The three LDP container variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// `ldp:BasicContainer`.
    Basic,
    /// `ldp:DirectContainer`.
    Direct,
    /// `ldp:IndirectContainer`.
    Indirect,
}

impl ContainerKind {
    /// The RDF type a container of this kind must advertise and assert.
    #[must_use]
    pub fn type_iri(self) -> &'static str {
        match self {
            ContainerKind::Basic => ldp::BASIC_CONTAINER,
            ContainerKind::Direct => ldp::DIRECT_CONTAINER,
            ContainerKind::Indirect => ldp::INDIRECT_CONTAINER,
        }
    }

    /// Short label for report messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ContainerKind::Basic => "basic",
            ContainerKind::Direct => "direct",
            ContainerKind::Indirect => "indirect",
        }
    }
}

/// Priority for container-scoped checks.
pub const BASIC_FIRST: [ContainerKind; 3] = [
    ContainerKind::Basic,
    ContainerKind::Direct,
    ContainerKind::Indirect,
];

/// Priority for member-resource provisioning, which prefers containers
/// with explicit membership semantics.
pub const DIRECT_FIRST: [ContainerKind; 3] = [
    ContainerKind::Direct,
    ContainerKind::Indirect,
    ContainerKind::Basic,
];

/// The one container a test context runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDescriptor {
    /// Absolute container URI.
    pub uri: String,
    /// Which variant the URI was configured as.
    pub kind: ContainerKind,
}

/// Picks the first configured container in `order`.
///
/// # Errors
///
/// [`HarnessError::NoContainerConfigured`] when none of the slots named by
/// `order` is configured.
pub fn select_container(
    config: &SuiteConfig,
    order: &[ContainerKind],
) -> Result<ContainerDescriptor, HarnessError> {
    for kind in order {
        let slot = match kind {
            ContainerKind::Basic => &config.basic_container,
            ContainerKind::Direct => &config.direct_container,
            ContainerKind::Indirect => &config.indirect_container,
        };
        if let Some(uri) = slot {
            return Ok(ContainerDescriptor {
                uri: uri.clone(),
                kind: *kind,
            });
        }
    }
    Err(HarnessError::NoContainerConfigured)
}

/// A fresh 16-character alphanumeric path segment. Collision-resistant by
/// size, not cryptographic.
#[must_use]
pub fn random_segment() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SEGMENT_LEN)
        .map(char::from)
        .collect()
}

/// Appends a path segment to a container URI with exactly one separating
/// slash, whatever the container's trailing form.
#[must_use]
pub fn child_uri(container: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        container.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}
