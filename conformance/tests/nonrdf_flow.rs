//! End-to-end binary (LDP-NR) scenario against a scripted server.
//!
//! The stub plays a server that creates intermediate containers on a
//! binary POST: the PNG lands at `<child>/test.png`, its associated RDF
//! source at `<child>/test`, and the child container lists the binary.
//! The harness picks the child path at random, so every scripted route
//! derives its URIs from the request.

mod support;

use ldp_conformance::checks::{nonrdf, CheckContext};
use ldp_conformance::config::SuiteConfig;
use ldp_conformance::fixtures;
use ldp_conformance::report::Outcome;
use support::{RecordedRequest, StubResponse, StubServer};

fn wants_turtle(request: &RecordedRequest) -> bool {
    request
        .header("accept")
        .is_some_and(|accept| accept.contains("text/turtle"))
}

fn child_listing(request: &RecordedRequest, base: &str) -> StubResponse {
    let child = format!("{base}{}", request.path);
    let body = format!(
        "<{child}> a <http://www.w3.org/ns/ldp#Resource>,\n        <http://www.w3.org/ns/ldp#Container>,\n        <http://www.w3.org/ns/ldp#BasicContainer> ;\n    <http://purl.org/dc/terms/modified> \"2026-01-05T09:30:00Z\" ;\n    <http://www.w3.org/ns/ldp#contains> <{child}/test.png> .\n"
    );
    StubResponse::new(200)
        .header("ETag", "\"listing-1\"")
        .body("text/turtle", body)
}

/// A server that fully supports binary creation, conneg on the binary
/// URI, and an associated RDF source.
fn conforming_server() -> StubServer {
    StubServer::builder()
        .prefix_route("POST", "/container/", |req, base| {
            StubResponse::new(201)
                .header("Location", format!("{base}{}/test.png", req.path))
                .header(
                    "Link",
                    format!("<{base}{}/test>; rel=\"describedby\"", req.path),
                )
                .header(
                    "Link",
                    "<http://www.w3.org/ns/ldp#BasicContainer>; rel=\"type\"",
                )
        })
        .prefix_route("GET", "/container/", |req, base| {
            if let Some(child) = req.path.strip_suffix("/test.png") {
                if wants_turtle(req) {
                    // Metadata view of the binary itself.
                    StubResponse::new(200).header("ETag", "W/\"meta-1\"").body(
                        "text/turtle",
                        format!(
                            "<{base}{child}/test.png> a <http://www.w3.org/ns/ldp#NonRDFSource> .\n"
                        ),
                    )
                } else {
                    StubResponse::new(200)
                        .header("ETag", "W/\"bin-1\"")
                        .header("Link", format!("<{base}{child}/test>; rel=\"describedby\""))
                        .header(
                            "Link",
                            "<http://www.w3.org/ns/ldp#NonRDFSource>; rel=\"type\"",
                        )
                        .body("image/png", fixtures::TEST_PNG)
                }
            } else if req.path.ends_with("/test") {
                // The associated RDF source; its entity-tag must be strong.
                StubResponse::new(200).header("ETag", "\"assoc-1\"").body(
                    "text/turtle",
                    format!(
                        "<{base}{}> a <http://www.w3.org/ns/ldp#RDFSource> .\n",
                        req.path
                    ),
                )
            } else {
                child_listing(req, base)
            }
        })
        .prefix_route("DELETE", "/container/", |_, _| StubResponse::new(204))
        .start()
}

fn context_for(server: &StubServer) -> CheckContext {
    let config = SuiteConfig {
        server: Some(server.base().to_owned()),
        basic_container: Some(server.uri("/container/")),
        ..SuiteConfig::default()
    };
    CheckContext::new(config).unwrap()
}

/// Against a fully conforming server every binary check passes, and the
/// harness deletes each binary it created.
#[test]
fn binary_checks_pass_and_clean_up() {
    let server = conforming_server();
    let mut ctx = context_for(&server);

    let report = nonrdf::run(&mut ctx);
    assert_eq!(report.results.len(), 6);
    for result in &report.results {
        assert_eq!(
            result.outcome,
            Outcome::Passed,
            "{} failed: {}",
            result.id,
            result.message
        );
    }

    let requests = server.requests();
    let posts = requests.iter().filter(|r| r.method == "POST").count();
    let deletes: Vec<_> = requests.iter().filter(|r| r.method == "DELETE").collect();
    assert_eq!(posts, 6, "each check posts its own binary");
    assert_eq!(deletes.len(), 6, "each check deletes its binary");
    for delete in deletes {
        assert!(
            delete.path.ends_with("/test.png"),
            "unexpected DELETE {}",
            delete.path
        );
    }
    for post in requests.iter().filter(|r| r.method == "POST") {
        assert_eq!(post.header("slug"), Some("test"));
        assert_eq!(post.header("content-type"), Some("image/png"));
        assert_eq!(post.body, fixtures::TEST_PNG);
    }
}

/// A 201 without the describedby Link fails every check in the preamble,
/// and the harness still deletes what the server reported created.
#[test]
fn missing_describedby_link_fails_and_cleans_up() {
    let server = StubServer::builder()
        .prefix_route("POST", "/container/", |req, base| {
            StubResponse::new(201).header("Location", format!("{base}{}/test.png", req.path))
        })
        .prefix_route("DELETE", "/container/", |_, _| StubResponse::new(204))
        .start();
    let mut ctx = context_for(&server);

    let report = nonrdf::run(&mut ctx);
    assert_eq!(report.results.len(), 6);
    for result in &report.results {
        assert_eq!(result.outcome, Outcome::Failed, "{}", result.id);
        assert!(
            result.message.contains("describedby"),
            "unexpected message: {}",
            result.message
        );
    }

    let requests = server.requests();
    let deletes = requests.iter().filter(|r| r.method == "DELETE").count();
    assert_eq!(deletes, 6, "a failed preamble still cleans up");
}

/// The created binary must land exactly where the POST fixed it; a server
/// that renames gets a failure, and the reported Location is the URI the
/// harness deletes.
#[test]
fn renamed_binary_fails_with_the_expected_location() {
    let server = StubServer::builder()
        .prefix_route("POST", "/container/", |req, base| {
            StubResponse::new(201)
                .header("Location", format!("{base}{}/renamed.png", req.path))
                .header(
                    "Link",
                    format!("<{base}{}/test>; rel=\"describedby\"", req.path),
                )
                .header(
                    "Link",
                    "<http://www.w3.org/ns/ldp#BasicContainer>; rel=\"type\"",
                )
        })
        .prefix_route("DELETE", "/container/", |_, _| StubResponse::new(204))
        .start();
    let mut ctx = context_for(&server);

    let report = nonrdf::run(&mut ctx);
    for result in &report.results {
        assert_eq!(result.outcome, Outcome::Failed, "{}", result.id);
        assert!(
            result.message.contains("Location"),
            "unexpected message: {}",
            result.message
        );
    }

    let requests = server.requests();
    let deletes: Vec<_> = requests.iter().filter(|r| r.method == "DELETE").collect();
    assert_eq!(deletes.len(), 6);
    for delete in deletes {
        assert!(
            delete.path.ends_with("/renamed.png"),
            "teardown must target the URI the server reported, got {}",
            delete.path
        );
    }
}
