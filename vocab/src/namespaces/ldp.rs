//! `ldp:` namespace — the W3C Linked Data Platform vocabulary.
//!
//! Covers the resource and container class hierarchy plus the membership
//! properties, per <https://www.w3.org/ns/ldp>. Paging terms are omitted;
//! LDP Paging was never taken past Working Group Note status.

/// LDP namespace IRI.
pub const NS: &str = "http://www.w3.org/ns/ldp#";

// Classes
/// `ldp:Resource` — any HTTP resource under LDP interaction rules.
pub const RESOURCE: &str = "http://www.w3.org/ns/ldp#Resource";
/// `ldp:RDFSource` — a resource whose state is an RDF graph.
pub const RDF_SOURCE: &str = "http://www.w3.org/ns/ldp#RDFSource";
/// `ldp:NonRDFSource` — a binary or other non-RDF resource.
pub const NON_RDF_SOURCE: &str = "http://www.w3.org/ns/ldp#NonRDFSource";
/// `ldp:Container` — the common superclass of the three container kinds.
pub const CONTAINER: &str = "http://www.w3.org/ns/ldp#Container";
/// `ldp:BasicContainer`.
pub const BASIC_CONTAINER: &str = "http://www.w3.org/ns/ldp#BasicContainer";
/// `ldp:DirectContainer`.
pub const DIRECT_CONTAINER: &str = "http://www.w3.org/ns/ldp#DirectContainer";
/// `ldp:IndirectContainer`.
pub const INDIRECT_CONTAINER: &str = "http://www.w3.org/ns/ldp#IndirectContainer";

// Properties
/// `ldp:contains` — containment triples from container to member.
pub const CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";
/// `ldp:member` — the default membership predicate.
pub const MEMBER: &str = "http://www.w3.org/ns/ldp#member";
/// `ldp:membershipResource`.
pub const MEMBERSHIP_RESOURCE: &str = "http://www.w3.org/ns/ldp#membershipResource";
/// `ldp:hasMemberRelation`.
pub const HAS_MEMBER_RELATION: &str = "http://www.w3.org/ns/ldp#hasMemberRelation";
/// `ldp:isMemberOfRelation`.
pub const IS_MEMBER_OF_RELATION: &str = "http://www.w3.org/ns/ldp#isMemberOfRelation";
/// `ldp:insertedContentRelation`.
pub const INSERTED_CONTENT_RELATION: &str = "http://www.w3.org/ns/ldp#insertedContentRelation";
/// `ldp:constrainedBy` — the link relation advertising server constraints.
pub const CONSTRAINED_BY: &str = "http://www.w3.org/ns/ldp#constrainedBy";

// Individuals
/// `ldp:MemberSubject` — sentinel for `insertedContentRelation`.
pub const MEMBER_SUBJECT: &str = "http://www.w3.org/ns/ldp#MemberSubject";
