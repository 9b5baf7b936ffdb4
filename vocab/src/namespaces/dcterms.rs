//! `dcterms:` namespace — the DCMI Metadata Terms the LDP protocol touches.
//!
//! LDP servers expose modification state as `dcterms:modified`; test
//! fixtures use `dcterms:title` and `dcterms:description` for human labels.

/// DCTerms namespace IRI.
pub const NS: &str = "http://purl.org/dc/terms/";

/// `dcterms:modified` — last-modification timestamp of a resource.
pub const MODIFIED: &str = "http://purl.org/dc/terms/modified";
/// `dcterms:title`.
pub const TITLE: &str = "http://purl.org/dc/terms/title";
/// `dcterms:description`.
pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";
