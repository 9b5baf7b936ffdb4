//! `Link` header parsing and matching.
//!
//! Implements the subset of RFC 8288 the LDP assertions need: comma-separated
//! link-values of the form `<URI>; rel="relation"`, with other parameters
//! tolerated and ignored. Parsing is a character scan tracking `<...>` and
//! quoted-string state, so commas inside target URIs and inside quoted
//! parameter values do not split values.

/// IANA link relation asserting the LDP interaction model.
pub const REL_TYPE: &str = "type";
/// Link relation from a non-RDF source to its associated RDF source.
pub const REL_DESCRIBEDBY: &str = "describedby";

/// One parsed link-value: target URI and relation type.
///
/// A link-value with no `rel` parameter yields an empty relation, which
/// never matches a non-empty query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDescriptor {
    /// Target URI exactly as it appeared between `<` and `>`.
    pub target: String,
    /// The `rel` parameter value, unquoted. Multi-token relations are kept
    /// as one string.
    pub rel: String,
}

/// Parses one raw `Link` header value into descriptors, in order.
///
/// Malformed link-values (no `<URI>` part) are dropped rather than aborting
/// the scan; a server that mangles one link-value can still satisfy an
/// assertion through another.
#[must_use]
pub fn parse_link_header(raw: &str) -> Vec<LinkDescriptor> {
    split_outside_delimiters(raw, ',')
        .iter()
        .filter_map(|value| parse_link_value(value))
        .collect()
}

/// True iff some descriptor has exactly this target and this relation.
///
/// Targets compare by string equality (no URI normalization); relations
/// compare ASCII-case-insensitively.
#[must_use]
pub fn contains_link(descriptors: &[LinkDescriptor], target: &str, relation: &str) -> bool {
    descriptors
        .iter()
        .any(|d| d.target == target && d.rel.eq_ignore_ascii_case(relation))
}

fn parse_link_value(value: &str) -> Option<LinkDescriptor> {
    let value = value.trim();
    let rest = value.strip_prefix('<')?;
    let (target, params) = rest.split_once('>')?;
    let mut rel: Option<String> = None;
    for param in split_outside_delimiters(params, ';') {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }
        let (name, raw_value) = match param.split_once('=') {
            Some((n, v)) => (n.trim(), v.trim()),
            None => (param, ""),
        };
        // First rel wins, per RFC 8288 section 3.3.
        if name.eq_ignore_ascii_case("rel") && rel.is_none() {
            rel = Some(unquote(raw_value));
        }
    }
    Some(LinkDescriptor {
        target: target.to_owned(),
        rel: rel.unwrap_or_default(),
    })
}

/// Splits at `separator` occurrences that are outside `<...>` and outside
/// quoted strings. Always yields at least one (possibly empty) segment.
fn split_outside_delimiters(raw: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_angle = false;
    let mut in_quotes = false;
    let mut escaped = false;
    for c in raw.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => {
                current.push(c);
                escaped = true;
            }
            '"' if !in_angle => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '<' if !in_quotes && !in_angle => {
                in_angle = true;
                current.push(c);
            }
            '>' if in_angle => {
                in_angle = false;
                current.push(c);
            }
            c if c == separator && !in_angle && !in_quotes => {
                parts.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    parts.push(current);
    parts
}

fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        let inner = &raw[1..raw.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut escaped = false;
        for c in inner.chars() {
            if escaped {
                out.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else {
                out.push(c);
            }
        }
        out
    } else {
        raw.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quoted_value() {
        let links = parse_link_header("<http://www.w3.org/ns/ldp#Resource>; rel=\"type\"");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "http://www.w3.org/ns/ldp#Resource");
        assert_eq!(links[0].rel, "type");
    }

    #[test]
    fn unquoted_rel_and_loose_whitespace() {
        let links = parse_link_header("  <http://example.org/a> ;rel=type ,<http://example.org/b>;  rel = \"describedby\"  ");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].rel, "type");
        assert_eq!(links[1].target, "http://example.org/b");
        assert_eq!(links[1].rel, "describedby");
    }

    #[test]
    fn comma_inside_target_uri() {
        let links = parse_link_header("<http://example.org/a,b>; rel=\"type\", <http://example.org/c>; rel=\"next\"");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].target, "http://example.org/a,b");
        assert_eq!(links[1].target, "http://example.org/c");
    }

    #[test]
    fn separators_inside_quoted_params() {
        let links =
            parse_link_header("<http://example.org/a>; title=\"a, b; c\"; rel=\"describedby\"");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].rel, "describedby");
    }

    #[test]
    fn escaped_quote_inside_param() {
        let links = parse_link_header("<http://example.org/a>; title=\"say \\\"hi\\\"\"; rel=type");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].rel, "type");
    }

    #[test]
    fn value_without_rel_gets_empty_relation() {
        let links = parse_link_header("<http://example.org/a>");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].rel, "");
        assert!(!contains_link(&links, "http://example.org/a", "type"));
    }

    #[test]
    fn first_rel_wins() {
        let links = parse_link_header("<http://example.org/a>; rel=\"type\"; rel=\"next\"");
        assert_eq!(links[0].rel, "type");
    }

    #[test]
    fn multi_token_rel_kept_whole() {
        let links = parse_link_header("<http://example.org/a>; rel=\"type describedby\"");
        assert_eq!(links[0].rel, "type describedby");
        assert!(!contains_link(&links, "http://example.org/a", "type"));
        assert!(contains_link(
            &links,
            "http://example.org/a",
            "TYPE DESCRIBEDBY"
        ));
    }

    #[test]
    fn malformed_values_dropped() {
        let links = parse_link_header("garbage, <http://example.org/a>; rel=type, also-garbage");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "http://example.org/a");
    }

    #[test]
    fn contains_is_exact_on_target_insensitive_on_rel() {
        let links = parse_link_header("<http://example.org/A>; rel=\"type\"");
        assert!(contains_link(&links, "http://example.org/A", "Type"));
        assert!(!contains_link(&links, "http://example.org/a", "type"));
        assert!(!contains_link(&[], "http://example.org/A", "type"));
    }

    #[test]
    fn counts_match_comma_separated_values() {
        let raw = "<http://example.org/1>; rel=a, <http://example.org/2>; rel=b, <http://example.org/3>; rel=c";
        assert_eq!(parse_link_header(raw).len(), 3);
    }
}
