//! Checks for LDP containers, run against the first configured container
//! in basic-first order.
//!
//! The two creation checks POST the default member graph and delete
//! whatever the server reports created, whether or not the check passes.

use ldp_vocab::namespaces::{dcterms, ldp};

use crate::checks::{require_link, require_status, run_check, CheckContext};
use crate::error::{CheckOutcome, HarnessError};
use crate::fixtures;
use crate::http::ExchangeResult;
use crate::lifecycle::delete_quietly;
use crate::link::REL_TYPE;
use crate::rdf::{Node, ResourceModel, TEXT_TURTLE};
use crate::report::{Automation, Check, Level, SuiteReport};
use crate::target::{select_container, ContainerDescriptor, BASIC_FIRST};

const LINK_TYPE_HEADER: Check = Check {
    id: "ldpc-linktypehdr",
    level: Level::Must,
    spec_ref: "http://www.w3.org/TR/ldp#ldpc-linktypehdr",
    automation: Automation::Automated,
    description: "LDP servers exposing LDPCs must advertise a Link header whose target is the container type and whose relation is type",
};

const TYPE_TRIPLE: Check = Check {
    id: "ldpc-typetriple",
    level: Level::Must,
    spec_ref: "http://www.w3.org/TR/ldp#ldpbc-are-ldpcs",
    automation: Automation::Automated,
    description: "Each LDP container must assert its container type in its own RDF representation",
};

const POST_CREATES: Check = Check {
    id: "ldpc-post-created201",
    level: Level::Must,
    spec_ref: "http://www.w3.org/TR/ldp#ldpc-post-created201",
    automation: Automation::Automated,
    description: "LDP servers must respond to a successful container POST with status 201 and a Location header naming the created resource",
};

const CONTAINMENT: Check = Check {
    id: "ldpc-containment",
    level: Level::Must,
    spec_ref: "http://www.w3.org/TR/ldp#ldpc-post-createdmbr-contains",
    automation: Automation::Automated,
    description: "After a successful POST the container representation must list the created resource in a containment triple",
};

/// Runs the container checks.
pub fn run(ctx: &mut CheckContext) -> SuiteReport {
    let mut report = SuiteReport::new();

    report.push(run_check(&LINK_TYPE_HEADER, ctx, link_type_header));
    report.push(run_check(&TYPE_TRIPLE, ctx, type_triple));
    report.push(run_check(&POST_CREATES, ctx, post_creates_member));
    report.push(run_check(&CONTAINMENT, ctx, containment_listed));

    report
}

fn link_type_header(ctx: &mut CheckContext) -> CheckOutcome {
    let container = select_container(&ctx.config, &BASIC_FIRST)?;
    let response = ctx.http.get(&container.uri, Some(TEXT_TURTLE))?;
    require_status(&response, 200)?;
    require_link(&response, container.kind.type_iri(), REL_TYPE)
}

fn type_triple(ctx: &mut CheckContext) -> CheckOutcome {
    let container = select_container(&ctx.config, &BASIC_FIRST)?;
    let response = ctx.http.get(&container.uri, Some(TEXT_TURTLE))?;
    require_status(&response, 200)?;
    let model = response.model()?;
    if model.self_has_type(container.kind.type_iri()) {
        Ok(())
    } else {
        Err(HarnessError::assertion(
            format!(
                "`rdf:type <{}>` about the container",
                container.kind.type_iri()
            ),
            format!("{} statements without it", model.statement_count()),
            container.uri.as_str(),
        ))
    }
}

fn post_creates_member(ctx: &mut CheckContext) -> CheckOutcome {
    let container = select_container(&ctx.config, &BASIC_FIRST)?;
    let response = post_default_member(ctx, &container.uri)?;
    let created = assert_created(&response, &container.uri);
    if let Some(location) = response.location().filter(|l| !l.is_empty()) {
        delete_quietly(&ctx.http, location);
    }
    created.map(|_| ())
}

fn containment_listed(ctx: &mut CheckContext) -> CheckOutcome {
    let container = select_container(&ctx.config, &BASIC_FIRST)?;
    let response = post_default_member(ctx, &container.uri)?;
    let created = match assert_created(&response, &container.uri) {
        Ok(created) => created,
        Err(err) => {
            if let Some(location) = response.location().filter(|l| !l.is_empty()) {
                delete_quietly(&ctx.http, location);
            }
            return Err(err);
        }
    };
    let outcome = assert_contained(ctx, &container, &created);
    delete_quietly(&ctx.http, &created);
    outcome
}

fn post_default_member(
    ctx: &CheckContext,
    container: &str,
) -> Result<ExchangeResult, HarnessError> {
    let body = ResourceModel::default_member(fixtures::DEFAULT_MEMBER_TYPE)?
        .to_turtle()?
        .into_bytes();
    ctx.http.post(container, &body, TEXT_TURTLE, None)
}

fn assert_created(response: &ExchangeResult, container: &str) -> Result<String, HarnessError> {
    require_status(response, 201)?;
    match response.location() {
        Some(location) if !location.is_empty() => Ok(location.to_owned()),
        _ => Err(HarnessError::assertion(
            "a Location header naming the created resource",
            "no Location header",
            container,
        )),
    }
}

fn assert_contained(
    ctx: &CheckContext,
    container: &ContainerDescriptor,
    created: &str,
) -> CheckOutcome {
    let listing = ctx.http.get(&container.uri, Some(TEXT_TURTLE))?;
    require_status(&listing, 200)?;
    let model = listing.model()?;
    if !model.contains(None, ldp::CONTAINS, Some(Node::Iri(created))) {
        return Err(HarnessError::assertion(
            format!("`ldp:contains <{created}>` in the container representation"),
            format!("{} statements without it", model.statement_count()),
            container.uri.as_str(),
        ));
    }
    if !model.self_has_type(ldp::RESOURCE) {
        return Err(HarnessError::assertion(
            "`rdf:type ldp:Resource` about the container",
            format!("{} statements without it", model.statement_count()),
            container.uri.as_str(),
        ));
    }
    if !model.contains(None, dcterms::MODIFIED, None) {
        return Err(HarnessError::assertion(
            "a `dcterms:modified` statement about the container",
            format!("{} statements without it", model.statement_count()),
            container.uri.as_str(),
        ));
    }
    Ok(())
}
