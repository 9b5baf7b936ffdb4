//! Vocabulary namespace modules.
//!
//! Each sub-module encodes one namespace as full-IRI string constants.

pub mod dcterms;
pub mod ldp;
pub mod rdf;
