//! Embedded payloads POSTed to the server under test.
//!
//! Two creation bodies live here: a small Turtle member graph usable in
//! place of an external `memberTtl` fixture file, and a minimal PNG for the
//! non-RDF source checks. The PNG content is opaque to every assertion;
//! only byte-for-byte round-tripping matters.

/// RDF type asserted by the default member-creation graph when no Turtle
/// fixture is configured.
pub const DEFAULT_MEMBER_TYPE: &str = "http://example.org/ns#TestMember";

/// A member resource graph about the to-be-assigned URI `<>`.
pub const MEMBER_GRAPH_TTL: &str = r#"
@prefix dcterms: <http://purl.org/dc/terms/> .

<> a <http://example.org/ns#TestMember> ;
    dcterms:title "Conformance suite member resource" ;
    dcterms:description "Created while exercising container POST; deleted at teardown." .
"#;

/// A complete 1x1 transparent PNG (signature, IHDR, IDAT, IEND).
pub const TEST_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, // signature
    0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52, // IHDR, 13 bytes
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1 x 1
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4, // 8-bit RGBA + CRC
    0x89, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, // IDAT, 10 bytes
    0x54, 0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00, // deflate block
    0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, // CRC
    0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, // IEND
    0x42, 0x60, 0x82,
];

/// Media type the PNG is posted under.
pub const IMAGE_PNG: &str = "image/png";

/// `Slug` hint used when posting the PNG.
pub const PNG_SLUG: &str = "test";

/// File name a server honoring [`PNG_SLUG`] is expected to assign.
pub const PNG_FILE_NAME: &str = "test.png";
