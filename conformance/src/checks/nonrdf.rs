//! Checks for binary (LDP-NR) support.
//!
//! Every check POSTs the PNG fixture to a fresh child container derived
//! from the selected root container; servers that create intermediate
//! containers on demand are exercised in the same pass. Expected URIs
//! are fixed by the POST: the binary lands at `<child>/test.png` and its
//! associated RDF source at `<child>/test`. All checks are MAY level; each
//! deletes the binary it created, best-effort.

use ldp_vocab::namespaces::{dcterms, ldp};
use sha2::{Digest, Sha256};

use crate::checks::{
    require_entity_tag, require_link, require_media_type, require_status, run_check, CheckContext,
};
use crate::error::{CheckOutcome, HarnessError};
use crate::fixtures;
use crate::http::ExchangeResult;
use crate::lifecycle::delete_quietly;
use crate::link::{REL_DESCRIBEDBY, REL_TYPE};
use crate::rdf::{Node, TEXT_TURTLE};
use crate::report::{Automation, Check, Level, SuiteReport};
use crate::target::{
    child_uri, random_segment, select_container, ContainerDescriptor, ContainerKind, BASIC_FIRST,
};

const POST_BINARY: Check = Check {
    id: "ldpnr-post-binary",
    level: Level::May,
    spec_ref: "http://www.w3.org/TR/ldp#dfn-ldp-server",
    automation: Automation::Automated,
    description: "LDP servers may accept an HTTP POST of non-RDF representations for creation of any kind of resource, for example binary resources",
};

const LISTED_IN_CONTAINER: Check = Check {
    id: "ldpnr-post-listed",
    level: Level::May,
    spec_ref: "http://www.w3.org/TR/ldp#dfn-ldp-server",
    automation: Automation::Automated,
    description: "After a binary POST the child container lists the new resource among its containment triples",
};

const GET_BINARY: Check = Check {
    id: "ldpnr-get-binary",
    level: Level::May,
    spec_ref: "http://www.w3.org/TR/ldp#h5_ldpr-gen-binary",
    automation: Automation::Automated,
    description: "LDP servers may host a mixture of LDP-RSs and LDP-NRs; a created binary is retrievable unchanged",
};

const ARE_LDPR: Check = Check {
    id: "ldpnr-are-ldpr",
    level: Level::May,
    spec_ref: "http://www.w3.org/TR/ldp#h5_ldpnr-are-ldpr",
    automation: Automation::Automated,
    description: "Each LDP Non-RDF Source is also a conforming LDP Resource, serving both a metadata view and the binary itself",
};

const TYPE_LINK: Check = Check {
    id: "ldpnr-type-link",
    level: Level::May,
    spec_ref: "http://www.w3.org/TR/ldp#h5_ldpnr-type",
    automation: Automation::Automated,
    description: "LDP servers exposing an LDP-NR may advertise a Link header with target ldp:NonRDFSource and relation type on its responses",
};

const DESCRIBEDBY: Check = Check {
    id: "ldpnr-describedby",
    level: Level::May,
    spec_ref: "http://www.w3.org/TR/ldp#h5_ldpc-post-createbinlinkmetahdr",
    automation: Automation::Automated,
    description: "A server creating an associated RDF source for a binary must indicate it with a describedby Link whose target is retrievable",
};

/// Runs the binary-support checks.
pub fn run(ctx: &mut CheckContext) -> SuiteReport {
    let mut report = SuiteReport::new();

    report.push(run_check(&POST_BINARY, ctx, post_binary_accepted));
    report.push(run_check(&LISTED_IN_CONTAINER, ctx, listed_in_container));
    report.push(run_check(&GET_BINARY, ctx, binary_round_trips));
    report.push(run_check(&ARE_LDPR, ctx, metadata_and_binary));
    report.push(run_check(&TYPE_LINK, ctx, advertises_type_link));
    report.push(run_check(&DESCRIBEDBY, ctx, describedby_resolves));

    report
}

fn post_binary_accepted(ctx: &mut CheckContext) -> CheckOutcome {
    let container = select_container(&ctx.config, &BASIC_FIRST)?;
    let posted = post_binary(ctx, &container)?;
    delete_quietly(&ctx.http, &posted.binary);
    Ok(())
}

fn listed_in_container(ctx: &mut CheckContext) -> CheckOutcome {
    let container = select_container(&ctx.config, &BASIC_FIRST)?;
    let posted = post_binary(ctx, &container)?;
    let outcome = assert_child_listing(ctx, &posted);
    delete_quietly(&ctx.http, &posted.binary);
    outcome
}

fn binary_round_trips(ctx: &mut CheckContext) -> CheckOutcome {
    let container = select_container(&ctx.config, &BASIC_FIRST)?;
    let posted = post_binary(ctx, &container)?;
    let outcome = assert_binary_view(ctx, &posted);
    delete_quietly(&ctx.http, &posted.binary);
    outcome
}

fn metadata_and_binary(ctx: &mut CheckContext) -> CheckOutcome {
    let container = select_container(&ctx.config, &BASIC_FIRST)?;
    let posted = post_binary(ctx, &container)?;
    let outcome =
        assert_metadata_view(ctx, &posted).and_then(|()| assert_binary_view(ctx, &posted));
    delete_quietly(&ctx.http, &posted.binary);
    outcome
}

fn advertises_type_link(ctx: &mut CheckContext) -> CheckOutcome {
    let container = select_container(&ctx.config, &BASIC_FIRST)?;
    let posted = post_binary(ctx, &container)?;
    let outcome = assert_type_link(ctx, &posted);
    delete_quietly(&ctx.http, &posted.binary);
    outcome
}

fn describedby_resolves(ctx: &mut CheckContext) -> CheckOutcome {
    let container = select_container(&ctx.config, &BASIC_FIRST)?;
    let posted = post_binary(ctx, &container)?;
    let outcome = assert_describedby(ctx, &posted);
    delete_quietly(&ctx.http, &posted.binary);
    outcome
}

/// URIs fixed by one binary POST.
struct PostedBinary {
    child: String,
    binary: String,
    metadata: String,
}

fn post_binary(
    ctx: &CheckContext,
    container: &ContainerDescriptor,
) -> Result<PostedBinary, HarnessError> {
    let child = child_uri(&container.uri, &random_segment());
    let posted = PostedBinary {
        binary: child_uri(&child, fixtures::PNG_FILE_NAME),
        metadata: child_uri(&child, fixtures::PNG_SLUG),
        child,
    };
    let response = ctx.http.post(
        &posted.child,
        fixtures::TEST_PNG,
        fixtures::IMAGE_PNG,
        Some(fixtures::PNG_SLUG),
    )?;
    if let Err(err) = assert_binary_created(&response, &posted, container.kind) {
        if let Some(location) = response.location().filter(|l| !l.is_empty()) {
            delete_quietly(&ctx.http, location);
        }
        return Err(err);
    }
    tracing::debug!(binary = posted.binary.as_str(), "binary member created");
    Ok(posted)
}

fn assert_binary_created(
    response: &ExchangeResult,
    posted: &PostedBinary,
    kind: ContainerKind,
) -> CheckOutcome {
    require_status(response, 201)?;
    match response.location() {
        Some(location) if location == posted.binary => {}
        Some(location) => {
            return Err(HarnessError::assertion(
                format!("Location `{}`", posted.binary),
                format!("`{location}`"),
                posted.child.as_str(),
            ))
        }
        None => {
            return Err(HarnessError::assertion(
                format!("Location `{}`", posted.binary),
                "no Location header",
                posted.child.as_str(),
            ))
        }
    }
    require_link(response, &posted.metadata, REL_DESCRIBEDBY)?;
    require_link(response, kind.type_iri(), REL_TYPE)
}

fn assert_child_listing(ctx: &CheckContext, posted: &PostedBinary) -> CheckOutcome {
    let listing = ctx.http.get(&posted.child, Some(TEXT_TURTLE))?;
    require_status(&listing, 200)?;
    require_entity_tag(&listing, true)?;
    require_media_type(&listing, TEXT_TURTLE)?;
    let model = listing.model()?;
    for type_iri in [ldp::RESOURCE, ldp::CONTAINER] {
        if !model.self_has_type(type_iri) {
            return Err(HarnessError::assertion(
                format!("`rdf:type <{type_iri}>` about the child container"),
                format!("{} statements without it", model.statement_count()),
                posted.child.as_str(),
            ));
        }
    }
    if !model.contains(None, dcterms::MODIFIED, None) {
        return Err(HarnessError::assertion(
            "a `dcterms:modified` statement about the child container",
            format!("{} statements without it", model.statement_count()),
            posted.child.as_str(),
        ));
    }
    if !model.contains(None, ldp::CONTAINS, Some(Node::Iri(&posted.binary))) {
        return Err(HarnessError::assertion(
            format!("`ldp:contains <{}>`", posted.binary),
            format!("{} statements without it", model.statement_count()),
            posted.child.as_str(),
        ));
    }
    Ok(())
}

fn assert_binary_view(ctx: &CheckContext, posted: &PostedBinary) -> CheckOutcome {
    let response = ctx.http.get(&posted.binary, Some(fixtures::IMAGE_PNG))?;
    require_status(&response, 200)?;
    require_media_type(&response, fixtures::IMAGE_PNG)?;
    require_entity_tag(&response, false)?;
    let expected = payload_digest();
    let digest = response.body_digest();
    if digest == expected {
        Ok(())
    } else {
        Err(HarnessError::assertion(
            format!("a body with digest {expected}"),
            format!("digest {digest}"),
            posted.binary.as_str(),
        ))
    }
}

fn assert_metadata_view(ctx: &CheckContext, posted: &PostedBinary) -> CheckOutcome {
    let response = ctx.http.get(&posted.binary, Some(TEXT_TURTLE))?;
    require_status(&response, 200)?;
    require_media_type(&response, TEXT_TURTLE)?;
    require_entity_tag(&response, false)?;
    response.model()?;
    Ok(())
}

fn assert_type_link(ctx: &CheckContext, posted: &PostedBinary) -> CheckOutcome {
    let response = ctx.http.get(&posted.binary, None)?;
    require_status(&response, 200)?;
    require_entity_tag(&response, false)?;
    require_link(&response, ldp::NON_RDF_SOURCE, REL_TYPE)
}

fn assert_describedby(ctx: &CheckContext, posted: &PostedBinary) -> CheckOutcome {
    let response = ctx.http.get(&posted.binary, None)?;
    require_status(&response, 200)?;
    require_entity_tag(&response, false)?;
    require_link(&response, &posted.metadata, REL_DESCRIBEDBY)?;

    let described = ctx.http.get(&posted.metadata, Some(TEXT_TURTLE))?;
    require_status(&described, 200)?;
    require_media_type(&described, TEXT_TURTLE)?;
    require_entity_tag(&described, true)
}

fn payload_digest() -> String {
    Sha256::digest(fixtures::TEST_PNG)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::report::Outcome;

    #[test]
    fn catalog_is_all_may() {
        let checks = [
            POST_BINARY,
            LISTED_IN_CONTAINER,
            GET_BINARY,
            ARE_LDPR,
            TYPE_LINK,
            DESCRIBEDBY,
        ];
        let mut ids: Vec<&str> = checks.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), checks.len(), "check ids must be unique");
        for check in &checks {
            assert_eq!(check.level, Level::May);
            assert!(check.spec_ref.starts_with("http://www.w3.org/TR/ldp#"));
        }
    }

    #[test]
    fn unconfigured_run_skips_every_check() {
        let mut ctx = CheckContext::new(SuiteConfig::default()).unwrap();
        let report = run(&mut ctx);
        assert_eq!(report.results.len(), 6);
        assert_eq!(report.count(Outcome::Skipped), 6);
        assert!(report.all_passed());
    }

    #[test]
    fn fixture_digest_matches_an_identical_body() {
        let mut echoed = ExchangeResult {
            uri: String::from("http://example.org/x/test.png"),
            status: 200,
            headers: Vec::new(),
            body: fixtures::TEST_PNG.to_vec(),
        };
        assert_eq!(echoed.body_digest(), payload_digest());
        echoed.body.pop();
        assert_ne!(echoed.body_digest(), payload_digest());
    }
}
