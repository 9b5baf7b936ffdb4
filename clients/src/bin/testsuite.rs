//! `ldp-testsuite` — Checks a live server against the W3C Linked Data
//! Platform conformance rules.
//!
//! Targets are optional: configure any subset of containers plus an
//! optional member resource, and checks whose preconditions are missing
//! are reported as skips. Relative target URIs resolve against `--server`.
//!
//! **Usage:**
//! ```
//! ldp-testsuite [--server <uri>] [--basic-container <uri>]
//!               [--direct-container <uri>] [--indirect-container <uri>]
//!               [--member-resource <uri>] [--member-ttl <path>]
//!               [--auth user:pass] [--timeout-secs N]
//!               [--header "Name: value"]... [--json]
//! ```
//!
//! Exits non-zero if any check fails or errors. Diagnostics go to stderr
//! (`RUST_LOG` controls verbosity); the report goes to stdout.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use ldp_conformance::config::{parse_header_spec, Credentials};
use ldp_conformance::{run_suite, Level, Outcome, SuiteConfig, SuiteReport};
use tracing_subscriber::EnvFilter;

/// Run the LDP conformance test suite against a live server.
#[derive(Parser)]
#[command(
    name = "ldp-testsuite",
    about = "Check a server against the W3C Linked Data Platform conformance rules"
)]
struct Args {
    /// Server root; relative target URIs resolve against it.
    #[arg(long)]
    server: Option<String>,

    /// URI of an ldp:BasicContainer to exercise.
    #[arg(long)]
    basic_container: Option<String>,

    /// URI of an ldp:DirectContainer to exercise.
    #[arg(long)]
    direct_container: Option<String>,

    /// URI of an ldp:IndirectContainer to exercise.
    #[arg(long)]
    indirect_container: Option<String>,

    /// Pre-existing member resource to check instead of provisioning one.
    #[arg(long)]
    member_resource: Option<String>,

    /// Turtle file POSTed verbatim when provisioning the member resource.
    #[arg(long)]
    member_ttl: Option<PathBuf>,

    /// Basic-auth credentials as user:pass.
    #[arg(long)]
    auth: Option<String>,

    /// Network timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Extra header sent with every request, as "Name: value". Repeatable.
    #[arg(long = "header")]
    headers: Vec<String>,

    /// Emit the report as pretty-printed JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = build_config(&args)?;
    let report = run_suite(config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_text(&report);
    }

    let blocking = report.count(Outcome::Failed) + report.count(Outcome::Errored);
    if blocking > 0 {
        eprintln!("Conformance FAILED: {} check(s) did not pass.", blocking);
        process::exit(1);
    }
    if !args.json {
        println!("Conformance PASSED.");
    }
    Ok(())
}

/// Turns command-line arguments into a resolved [`SuiteConfig`].
///
/// # Errors
///
/// Malformed `--auth` or `--header` values, and relative targets without a
/// `--server` root, are startup errors.
fn build_config(args: &Args) -> Result<SuiteConfig> {
    let auth = match &args.auth {
        None => None,
        Some(raw) => Some(
            Credentials::parse(raw).ok_or_else(|| anyhow!("--auth must be of the form user:pass"))?,
        ),
    };

    let mut default_headers = Vec::with_capacity(args.headers.len());
    for spec in &args.headers {
        let header = parse_header_spec(spec)
            .ok_or_else(|| anyhow!("--header must be of the form \"Name: value\", got `{spec}`"))?;
        default_headers.push(header);
    }

    let config = SuiteConfig {
        server: args.server.clone(),
        basic_container: args.basic_container.clone(),
        direct_container: args.direct_container.clone(),
        indirect_container: args.indirect_container.clone(),
        member_resource: args.member_resource.clone(),
        member_ttl: args.member_ttl.clone(),
        auth,
        timeout: Some(Duration::from_secs(args.timeout_secs)),
        default_headers,
    };
    Ok(config.absolutize()?)
}

fn render_text(report: &SuiteReport) {
    println!("LDP Conformance Report");
    println!("======================");
    println!();

    for result in &report.results {
        println!(
            "[{}] {} ({}) — {}",
            result.outcome.as_str(),
            result.id,
            result.level.as_str(),
            result.message
        );
        for detail in &result.details {
            println!("       {}", detail);
        }
    }

    println!();
    println!(
        "Summary: {} passed, {} failed, {} skipped, {} errored",
        report.count(Outcome::Passed),
        report.count(Outcome::Failed),
        report.count(Outcome::Skipped),
        report.count(Outcome::Errored)
    );
    println!(
        "Failures by level: {} MUST, {} SHOULD, {} MAY",
        report.failures_at(Level::Must),
        report.failures_at(Level::Should),
        report.failures_at(Level::May)
    );
}
