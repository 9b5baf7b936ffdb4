//! Response bodies as queryable triple models.
//!
//! A [`ResourceModel`] wraps a parsed in-memory graph together with the base
//! URI it was parsed against (the effective request URI), so relative IRIs
//! in Turtle responses resolve the way the server intended. Queries are
//! existence checks only; a model is never mutated after parsing.
//!
//! The accessor also builds outgoing creation payloads: a minimal default
//! graph whose subject is the empty relative IRI `<>`, left for the server
//! to resolve against the URI it assigns.

use sophia_api::prelude::*;
use sophia_api::term::matcher::Any;
use sophia_api::term::{IriRef, SimpleTerm};
use sophia_api::MownStr;
use sophia_inmem::graph::FastGraph;
use sophia_turtle::parser::nt::NTriplesParser;
use sophia_turtle::parser::turtle::TurtleParser;
use sophia_turtle::serializer::turtle::TurtleSerializer;
use sophia_xml::parser::RdfXmlParser;

use crate::error::HarnessError;

/// Media type of Turtle.
pub const TEXT_TURTLE: &str = "text/turtle";
/// Media type of RDF/XML.
pub const APPLICATION_RDF_XML: &str = "application/rdf+xml";
/// Media type of N-Triples.
pub const APPLICATION_NTRIPLES: &str = "application/n-triples";

/// Strips parameters from a media type and lowercases the essence, so
/// `Text/Turtle; charset=UTF-8` compares equal to `text/turtle`.
#[must_use]
pub fn media_essence(content_type: &str) -> String {
    let essence = content_type
        .split_once(';')
        .map_or(content_type, |(essence, _)| essence);
    essence.trim().to_ascii_lowercase()
}

/// Object position of a statement query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    /// An IRI object.
    Iri(&'a str),
    /// A plain string literal object.
    Literal(&'a str),
}

/// One parsed RDF response (or outgoing payload), plus its base URI.
#[derive(Debug)]
pub struct ResourceModel {
    graph: FastGraph,
    base: String,
}

impl ResourceModel {
    /// Parses `body` according to `content_type`, resolving relative IRIs
    /// against `base`.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Parse`] when the content type is not a supported RDF
    /// serialization or the body does not parse as the claimed one.
    pub fn parse(body: &[u8], content_type: &str, base: &str) -> Result<Self, HarnessError> {
        let essence = media_essence(content_type);
        let parse_err = |reason: String| HarnessError::Parse {
            media_type: essence.clone(),
            reason,
        };
        let graph: FastGraph = match essence.as_str() {
            TEXT_TURTLE => {
                let parser = TurtleParser {
                    base: Some(parse_base(base, &essence)?),
                };
                parser
                    .parse(body)
                    .collect_triples()
                    .map_err(|e| parse_err(e.to_string()))?
            }
            APPLICATION_RDF_XML => {
                let parser = RdfXmlParser {
                    base: Some(parse_base(base, &essence)?),
                };
                parser
                    .parse(body)
                    .collect_triples()
                    .map_err(|e| parse_err(e.to_string()))?
            }
            APPLICATION_NTRIPLES => NTriplesParser {}
                .parse(body)
                .collect_triples()
                .map_err(|e| parse_err(e.to_string()))?,
            other => {
                return Err(parse_err(format!("`{other}` is not a supported RDF serialization")))
            }
        };
        Ok(ResourceModel {
            graph,
            base: base.to_owned(),
        })
    }

    /// Builds the default creation payload: exactly one statement,
    /// `<> rdf:type <member_type>`.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Parse`] when `member_type` is not a valid IRI.
    pub fn default_member(member_type: &str) -> Result<Self, HarnessError> {
        let type_ref =
            IriRef::new(MownStr::from(member_type)).map_err(|e| HarnessError::Parse {
                media_type: TEXT_TURTLE.to_owned(),
                reason: format!("invalid member type IRI: {e}"),
            })?;
        let mut graph = FastGraph::new();
        graph
            .insert(
                SimpleTerm::Iri(IriRef::new_unchecked(MownStr::from(""))),
                SimpleTerm::Iri(IriRef::new_unchecked(MownStr::from(
                    ldp_vocab::namespaces::rdf::TYPE,
                ))),
                SimpleTerm::Iri(type_ref),
            )
            .map_err(|e| HarnessError::Parse {
                media_type: TEXT_TURTLE.to_owned(),
                reason: format!("graph insert: {e}"),
            })?;
        Ok(ResourceModel {
            graph,
            base: String::new(),
        })
    }

    /// Base URI the model was parsed against; `"self"` queries resolve here.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// True iff a matching statement exists. `subject = None` means the
    /// model's own resource (the base URI); `object = None` means any
    /// object. IRIs that do not parse cannot occur in a graph, so they
    /// simply never match.
    #[must_use]
    pub fn contains(&self, subject: Option<&str>, predicate: &str, object: Option<Node<'_>>) -> bool {
        let Some(s) = iri_term(subject.unwrap_or(&self.base)) else {
            return false;
        };
        let Some(p) = iri_term(predicate) else {
            return false;
        };
        match object {
            None => self.graph.triples_matching([s], [p], Any).next().is_some(),
            Some(Node::Iri(o)) => {
                let Some(o) = iri_term(o) else {
                    return false;
                };
                self.graph.triples_matching([s], [p], [o]).next().is_some()
            }
            Some(Node::Literal(text)) => self
                .graph
                .triples_matching([s], [p], [text])
                .next()
                .is_some(),
        }
    }

    /// True iff any statement has the model's own resource as subject.
    #[must_use]
    pub fn describes_self(&self) -> bool {
        let Some(s) = iri_term(&self.base) else {
            return false;
        };
        self.graph.triples_matching([s], Any, Any).next().is_some()
    }

    /// True iff the model asserts `rdf:type <type_iri>` about its own
    /// resource.
    #[must_use]
    pub fn self_has_type(&self, type_iri: &str) -> bool {
        self.contains(
            None,
            ldp_vocab::namespaces::rdf::TYPE,
            Some(Node::Iri(type_iri)),
        )
    }

    /// Number of statements in the model.
    #[must_use]
    pub fn statement_count(&self) -> usize {
        self.graph.triples().count()
    }

    /// Serializes the model as Turtle, for use as a POST body.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Parse`] when serialization fails.
    pub fn to_turtle(&self) -> Result<String, HarnessError> {
        let mut stringifier = TurtleSerializer::new_stringifier();
        stringifier
            .serialize_graph(&self.graph)
            .map_err(|e| HarnessError::Parse {
                media_type: TEXT_TURTLE.to_owned(),
                reason: format!("serializer: {e}"),
            })?;
        Ok(stringifier.as_str().to_owned())
    }
}

fn iri_term(iri: &str) -> Option<SimpleTerm<'_>> {
    IriRef::new(MownStr::from(iri)).ok().map(SimpleTerm::Iri)
}

fn parse_base(base: &str, media_type: &str) -> Result<Iri<String>, HarnessError> {
    Iri::new(base.to_owned()).map_err(|e| HarnessError::Parse {
        media_type: media_type.to_owned(),
        reason: format!("invalid base IRI `{base}`: {e}"),
    })
}
