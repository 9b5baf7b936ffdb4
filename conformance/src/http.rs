//! HTTP exchanges against the server under test.
//!
//! One [`HttpExchange`] per suite run: it owns the blocking client and the
//! endpoint-wide request configuration (auth, default headers, timeout).
//! Redirects are never followed, so status and `Location` assertions see
//! the raw protocol exchange. Non-2xx statuses are ordinary results; only
//! network-level trouble becomes an error.

use reqwest::blocking::Client;
use reqwest::redirect;
use reqwest::Method;
use sha2::{Digest, Sha256};

use crate::config::SuiteConfig;
use crate::error::HarnessError;
use crate::link::{self, LinkDescriptor};
use crate::rdf::{media_essence, ResourceModel};

/// The `Slug` request header (RFC 5023), a naming hint for POSTed resources.
pub const SLUG: &str = "Slug";

/// Executes requests with the suite's base configuration applied.
pub struct HttpExchange {
    client: Client,
    auth: Option<(String, String)>,
    default_headers: Vec<(String, String)>,
}

impl HttpExchange {
    /// Builds the exchange from the suite configuration.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Client`] when the underlying client cannot be
    /// constructed.
    pub fn new(config: &SuiteConfig) -> Result<Self, HarnessError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| HarnessError::Client(e.to_string()))?;
        Ok(HttpExchange {
            client,
            auth: config
                .auth
                .as_ref()
                .map(|c| (c.username.clone(), c.password.clone())),
            default_headers: config.default_headers.clone(),
        })
    }

    /// Performs one exchange. Endpoint configuration (auth, default
    /// headers) is applied first, then the method-specific `headers`.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Transport`] on connection failure, timeout, or a
    /// response that cannot be read.
    pub fn execute(
        &self,
        method: Method,
        target: &str,
        headers: &[(&str, &str)],
        body: Option<&[u8]>,
        content_type: Option<&str>,
    ) -> Result<ExchangeResult, HarnessError> {
        let mut request = self.client.request(method.clone(), target);
        if let Some((username, password)) = &self.auth {
            request = request.basic_auth(username, Some(password));
        }
        for (name, value) in &self.default_headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(ct) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, ct);
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request
            .send()
            .map_err(|e| HarnessError::transport(&method, target, &e))?;

        let uri = response.url().to_string();
        let status = response.status().as_u16();
        let response_headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .map_err(|e| HarnessError::transport(&method, target, &e))?
            .to_vec();

        tracing::debug!(%method, %target, status, "exchange complete");
        Ok(ExchangeResult {
            uri,
            status,
            headers: response_headers,
            body,
        })
    }

    /// GET with an optional `Accept` header.
    ///
    /// # Errors
    ///
    /// See [`HttpExchange::execute`].
    pub fn get(&self, target: &str, accept: Option<&str>) -> Result<ExchangeResult, HarnessError> {
        let headers: Vec<(&str, &str)> = accept.map(|a| ("Accept", a)).into_iter().collect();
        self.execute(Method::GET, target, &headers, None, None)
    }

    /// HEAD with an optional `Accept` header.
    ///
    /// # Errors
    ///
    /// See [`HttpExchange::execute`].
    pub fn head(&self, target: &str, accept: Option<&str>) -> Result<ExchangeResult, HarnessError> {
        let headers: Vec<(&str, &str)> = accept.map(|a| ("Accept", a)).into_iter().collect();
        self.execute(Method::HEAD, target, &headers, None, None)
    }

    /// POST a body with an optional `Slug` naming hint.
    ///
    /// # Errors
    ///
    /// See [`HttpExchange::execute`].
    pub fn post(
        &self,
        target: &str,
        body: &[u8],
        content_type: &str,
        slug: Option<&str>,
    ) -> Result<ExchangeResult, HarnessError> {
        let headers: Vec<(&str, &str)> = slug.map(|s| (SLUG, s)).into_iter().collect();
        self.execute(Method::POST, target, &headers, Some(body), Some(content_type))
    }

    /// DELETE the target.
    ///
    /// # Errors
    ///
    /// See [`HttpExchange::execute`].
    pub fn delete(&self, target: &str) -> Result<ExchangeResult, HarnessError> {
        self.execute(Method::DELETE, target, &[], None, None)
    }
}

/// Everything a check may assert on from one exchange.
#[derive(Debug, Clone)]
pub struct ExchangeResult {
    /// Effective request URI (no redirects, so this is the target).
    pub uri: String,
    /// Response status code.
    pub status: u16,
    /// Response headers in wire order; names are lowercase and may repeat.
    pub headers: Vec<(String, String)>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl ExchangeResult {
    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of a header, by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values of a header, in response order.
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// All `Link` descriptors, concatenated across repeated header lines in
    /// response order.
    #[must_use]
    pub fn links(&self) -> Vec<LinkDescriptor> {
        let mut links = Vec::new();
        for value in self.header_values("link") {
            links.extend(link::parse_link_header(value));
        }
        links
    }

    /// True iff the response advertises this link.
    #[must_use]
    pub fn has_link(&self, target: &str, relation: &str) -> bool {
        link::contains_link(&self.links(), target, relation)
    }

    /// One-line rendering of every advertised link, for failure messages.
    #[must_use]
    pub fn link_summary(&self) -> String {
        let links = self.links();
        if links.is_empty() {
            return String::from("no Link header");
        }
        links
            .iter()
            .map(|l| format!("<{}>; rel=\"{}\"", l.target, l.rel))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Media-type essence of the `Content-Type` header, lowercased, without
    /// parameters.
    #[must_use]
    pub fn media_type(&self) -> Option<String> {
        self.header("content-type").map(media_essence)
    }

    /// Raw `ETag` header value.
    #[must_use]
    pub fn etag(&self) -> Option<&str> {
        self.header("etag")
    }

    /// Raw `Location` header value.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// Parses the body as RDF according to the response's own
    /// `Content-Type`, with the effective request URI as base.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Parse`] when the `Content-Type` is absent, not an
    /// RDF serialization, or the body does not parse.
    pub fn model(&self) -> Result<ResourceModel, HarnessError> {
        let content_type = self.header("content-type").ok_or_else(|| HarnessError::Parse {
            media_type: String::from("(none)"),
            reason: String::from("response carried no Content-Type"),
        })?;
        ResourceModel::parse(&self.body, content_type, &self.uri)
    }

    /// SHA-256 hex digest of the body, for binary round-trip comparison.
    #[must_use]
    pub fn body_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.body);
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

/// True iff `value` is a well-formed entity-tag per RFC 7232: an optional
/// `W/` prefix, then a quoted opaque tag without unescaped inner quotes.
#[must_use]
pub fn is_entity_tag(value: &str) -> bool {
    let value = value.trim();
    let opaque = value.strip_prefix("W/").unwrap_or(value);
    let Some(inner) = opaque
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };
    inner
        .bytes()
        .all(|b| b == 0x21 || (0x23..=0x7e).contains(&b) || b >= 0x80)
}

/// True iff `value` is a well-formed *strong* entity-tag (no `W/` prefix).
#[must_use]
pub fn is_strong_entity_tag(value: &str) -> bool {
    is_entity_tag(value) && !value.trim_start().starts_with("W/")
}
