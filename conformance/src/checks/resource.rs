//! Checks every LDP resource must satisfy, run against the member resource.
//!
//! The target comes from the lifecycle manager: either an explicitly
//! configured member resource, or one provisioned by POSTing a default
//! member graph to a configured container. When neither is available every
//! check here reports a skip.

use ldp_vocab::namespaces::ldp;

use crate::checks::{
    require_entity_tag, require_link, require_media_type, require_status, require_success,
    run_check, CheckContext,
};
use crate::error::{CheckOutcome, HarnessError};
use crate::link::REL_TYPE;
use crate::rdf::TEXT_TURTLE;
use crate::report::{Automation, Check, Level, SuiteReport};

const GET_TURTLE: Check = Check {
    id: "ldprs-get-turtle",
    level: Level::Must,
    spec_ref: "http://www.w3.org/TR/ldp#ldprs-get-turtle",
    automation: Automation::Automated,
    description: "LDP servers must respond to GET requests on an LDP-RS with a Turtle representation",
};

const LINK_TYPE_HEADER: Check = Check {
    id: "ldpr-gen-linktypehdr",
    level: Level::Must,
    spec_ref: "http://www.w3.org/TR/ldp#ldpr-gen-linktypehdr",
    automation: Automation::Automated,
    description: "LDP servers must advertise a Link header with target ldp:Resource and relation type on LDPR responses",
};

const ARE_LDPR: Check = Check {
    id: "ldprs-are-ldpr",
    level: Level::Must,
    spec_ref: "http://www.w3.org/TR/ldp#ldprs-are-ldprs",
    automation: Automation::Automated,
    description: "Each LDP RDF Source must be a conforming LDP Resource whose representation describes the resource itself",
};

const ETAG_ON_GET: Check = Check {
    id: "ldpr-gen-etag-get",
    level: Level::Must,
    spec_ref: "http://www.w3.org/TR/ldp#ldpr-gen-etags",
    automation: Automation::Automated,
    description: "LDP servers must provide an entity-tag (ETag response header) on LDPR GET responses",
};

const ETAG_ON_HEAD: Check = Check {
    id: "ldpr-gen-etag-head",
    level: Level::Should,
    spec_ref: "http://www.w3.org/TR/ldp#ldpr-gen-etags",
    automation: Automation::Automated,
    description: "LDP servers should provide an entity-tag (ETag response header) on LDPR HEAD responses",
};

const HEAD_SUPPORT: Check = Check {
    id: "ldpr-gen-head",
    level: Level::Should,
    spec_ref: "http://www.w3.org/TR/ldp#ldpr-head-must",
    automation: Automation::Automated,
    description: "LDP servers should support the HTTP HEAD method on LDPR request URIs",
};

const CLIENT_PREFERENCES: Check = Check {
    id: "ldpr-cli-preferences",
    level: Level::Should,
    spec_ref: "http://www.w3.org/TR/ldp#ldpr-cli-preferences",
    automation: Automation::ClientOnly,
    description: "LDP clients should use the Prefer request header to influence the representations they receive",
};

/// Runs the resource checks against the member resource.
pub fn run(ctx: &mut CheckContext) -> SuiteReport {
    let mut report = SuiteReport::new();

    report.push(run_check(&GET_TURTLE, ctx, get_turtle));
    report.push(run_check(&LINK_TYPE_HEADER, ctx, link_type_header));
    report.push(run_check(&ARE_LDPR, ctx, describes_itself));
    report.push(run_check(&ETAG_ON_GET, ctx, etag_on_get));
    report.push(run_check(&ETAG_ON_HEAD, ctx, etag_on_head));
    report.push(run_check(&HEAD_SUPPORT, ctx, head_support));
    report.push(run_check(&CLIENT_PREFERENCES, ctx, |_| Ok(())));

    report
}

fn get_turtle(ctx: &mut CheckContext) -> CheckOutcome {
    let member = ctx.member.ensure(&ctx.http)?;
    let response = ctx.http.get(&member.uri, Some(TEXT_TURTLE))?;
    require_status(&response, 200)?;
    require_media_type(&response, TEXT_TURTLE)?;
    response.model()?;
    Ok(())
}

fn link_type_header(ctx: &mut CheckContext) -> CheckOutcome {
    let member = ctx.member.ensure(&ctx.http)?;
    let response = ctx.http.get(&member.uri, Some(TEXT_TURTLE))?;
    require_status(&response, 200)?;
    require_link(&response, ldp::RESOURCE, REL_TYPE)
}

fn describes_itself(ctx: &mut CheckContext) -> CheckOutcome {
    let member = ctx.member.ensure(&ctx.http)?;
    let response = ctx.http.get(&member.uri, Some(TEXT_TURTLE))?;
    require_status(&response, 200)?;
    let model = response.model()?;
    if model.describes_self() {
        Ok(())
    } else {
        Err(HarnessError::assertion(
            "statements about the resource itself",
            format!(
                "{} statements, none with the resource as subject",
                model.statement_count()
            ),
            member.uri.as_str(),
        ))
    }
}

fn etag_on_get(ctx: &mut CheckContext) -> CheckOutcome {
    let member = ctx.member.ensure(&ctx.http)?;
    let response = ctx.http.get(&member.uri, Some(TEXT_TURTLE))?;
    require_status(&response, 200)?;
    require_entity_tag(&response, false)
}

fn etag_on_head(ctx: &mut CheckContext) -> CheckOutcome {
    let member = ctx.member.ensure(&ctx.http)?;
    let response = ctx.http.head(&member.uri, Some(TEXT_TURTLE))?;
    require_success(&response)?;
    require_entity_tag(&response, false)
}

fn head_support(ctx: &mut CheckContext) -> CheckOutcome {
    let member = ctx.member.ensure(&ctx.http)?;
    let response = ctx.http.head(&member.uri, None)?;
    require_success(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::report::Outcome;

    #[test]
    fn catalog_metadata_is_coherent() {
        let checks = [
            GET_TURTLE,
            LINK_TYPE_HEADER,
            ARE_LDPR,
            ETAG_ON_GET,
            ETAG_ON_HEAD,
            HEAD_SUPPORT,
            CLIENT_PREFERENCES,
        ];
        let mut ids: Vec<&str> = checks.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), checks.len(), "check ids must be unique");
        for check in &checks {
            assert!(check.spec_ref.starts_with("http://www.w3.org/TR/ldp#"));
            assert!(!check.description.is_empty());
        }
    }

    #[test]
    fn unconfigured_run_reports_skips_not_failures() {
        let mut ctx = CheckContext::new(SuiteConfig::default()).unwrap();
        let report = run(&mut ctx);
        assert_eq!(report.results.len(), 7);
        assert_eq!(report.count(Outcome::Skipped), 7);
        assert!(report.all_passed());
    }
}
