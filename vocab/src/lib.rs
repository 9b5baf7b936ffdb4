//! W3C Linked Data Platform vocabulary as typed Rust constants.
//!
//! One module per namespace: [`namespaces::ldp`] holds the LDP classes and
//! membership properties, [`namespaces::dcterms`] and [`namespaces::rdf`]
//! the handful of external terms the LDP protocol leans on. All constants
//! are full IRIs; prefix-based abbreviation is left to serializers.
//!
//! ```
//! use ldp_vocab::namespaces::ldp;
//! assert!(ldp::BASIC_CONTAINER.starts_with(ldp::NS));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod namespaces;

#[cfg(test)]
mod tests {
    use super::namespaces::{dcterms, ldp, rdf};

    #[test]
    fn ldp_terms_share_the_ldp_namespace() {
        for iri in [
            ldp::RESOURCE,
            ldp::RDF_SOURCE,
            ldp::NON_RDF_SOURCE,
            ldp::CONTAINER,
            ldp::BASIC_CONTAINER,
            ldp::DIRECT_CONTAINER,
            ldp::INDIRECT_CONTAINER,
            ldp::CONTAINS,
            ldp::MEMBER,
            ldp::MEMBERSHIP_RESOURCE,
            ldp::HAS_MEMBER_RELATION,
            ldp::IS_MEMBER_OF_RELATION,
            ldp::INSERTED_CONTENT_RELATION,
            ldp::MEMBER_SUBJECT,
            ldp::CONSTRAINED_BY,
        ] {
            assert!(iri.starts_with(ldp::NS), "outside ldp namespace: {iri}");
        }
    }

    #[test]
    fn ldp_terms_unique() {
        let mut seen = std::collections::HashSet::new();
        for iri in [
            ldp::RESOURCE,
            ldp::RDF_SOURCE,
            ldp::NON_RDF_SOURCE,
            ldp::CONTAINER,
            ldp::BASIC_CONTAINER,
            ldp::DIRECT_CONTAINER,
            ldp::INDIRECT_CONTAINER,
            ldp::CONTAINS,
            ldp::MEMBER,
            ldp::MEMBERSHIP_RESOURCE,
            ldp::HAS_MEMBER_RELATION,
            ldp::IS_MEMBER_OF_RELATION,
            ldp::INSERTED_CONTENT_RELATION,
            ldp::MEMBER_SUBJECT,
            ldp::CONSTRAINED_BY,
        ] {
            assert!(seen.insert(iri), "duplicate IRI: {iri}");
        }
    }

    #[test]
    fn external_terms_well_formed() {
        assert!(dcterms::MODIFIED.starts_with(dcterms::NS));
        assert!(dcterms::TITLE.starts_with(dcterms::NS));
        assert!(rdf::TYPE.starts_with(rdf::NS));
    }
}
