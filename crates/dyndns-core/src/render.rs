//! URL rendering
//!
//! Turns a provider's URL template plus validated fields into the exact
//! request URL. Rendering is pure: the same inputs always give the same URL.
//!
//! ## Template rules
//!
//! - `{field}` in the path or userinfo is replaced by the percent-encoded
//!   field value. A placeholder without a value is a [`Error::Template`].
//! - A template that is a single placeholder (`{url}`) takes the whole URL
//!   from that field; the result is then treated as a template itself.
//! - Literal query parameters in the template are kept as written. The
//!   provider's `params` are appended after them, in declared order, and only
//!   when their source field is present. A param with the same name as a
//!   literal one takes its place instead.
//!
//! ```rust
//! use dyndns_core::{FieldMap, Provider};
//!
//! let conf = Provider::Freedns.conf();
//! let data = FieldMap::from([("token".to_string(), "abcd1234".to_string())]);
//! let url = conf.render(&conf.validate(&data)?)?;
//! assert_eq!(url.as_str(), "https://sync.afraid.org/u/abcd1234/");
//! # Ok::<(), dyndns_core::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::fields;
use crate::provider::{ProviderConf, ValidatedData};
use url::{Url, form_urlencoded};

/// Marker written over secrets in log output
const REDACTED: &str = "REDACTED";

/// How secret field values are written into the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Secrets {
    Clear,
    Masked,
}

impl Secrets {
    fn apply<'a>(self, field: &str, value: &'a str) -> &'a str {
        if self == Secrets::Masked && fields::is_secret(field) {
            REDACTED
        } else {
            value
        }
    }
}

/// Render the request URL for `conf` from validated fields
pub fn render(conf: &ProviderConf, data: &ValidatedData) -> Result<Url> {
    build(conf, data, Secrets::Clear)
}

/// Loggable form of the request URL with credentials masked
///
/// Every spot filled from a secret field (userinfo, path segment or query
/// parameter) shows the marker instead of the value. A literal password in a
/// caller-supplied URL is masked as well.
pub fn redact(conf: &ProviderConf, data: &ValidatedData) -> Result<String> {
    let mut shown = build(conf, data, Secrets::Masked)?;
    if shown.password().is_some() {
        let _ = shown.set_password(Some(REDACTED));
    }
    Ok(shown.into())
}

fn build(conf: &ProviderConf, data: &ValidatedData, secrets: Secrets) -> Result<Url> {
    let template = match whole_placeholder(conf.base_url) {
        Some(field) => data.get(field).ok_or_else(|| {
            Error::template(format!("no value for URL placeholder '{{{}}}'", field))
        })?,
        None => conf.base_url,
    };

    let parts = split_template(template)?;
    let mut rendered = format!("{}://", parts.scheme);
    if let Some(userinfo) = parts.userinfo {
        rendered.push_str(&substitute(userinfo, data, secrets)?);
        rendered.push('@');
    }
    rendered.push_str(parts.host);
    rendered.push_str(&substitute(parts.path, data, secrets)?);

    let computed: Vec<(&str, &str)> = conf
        .params
        .iter()
        .filter_map(|&(param, field)| {
            data.get(field)
                .map(|value| (param, secrets.apply(field, value)))
        })
        .collect();
    if let Some(query) = merge_query(parts.query, &computed) {
        rendered.push('?');
        rendered.push_str(&query);
    }
    if let Some(fragment) = parts.fragment {
        rendered.push('#');
        rendered.push_str(fragment);
    }

    Url::parse(&rendered)
        .map_err(|e| Error::template(format!("rendered URL for {} is invalid: {}", conf.name, e)))
}

/// Combine the template's literal query with computed parameters
///
/// Literal pieces are kept byte for byte. A computed parameter replaces the
/// first literal piece with the same name and drops later ones; the rest are
/// appended in order.
fn merge_query(literal: Option<&str>, computed: &[(&str, &str)]) -> Option<String> {
    let mut pieces: Vec<String> = Vec::new();
    let mut placed = vec![false; computed.len()];

    for piece in literal.into_iter().flat_map(|query| query.split('&')) {
        let key = form_urlencoded::parse(piece.as_bytes())
            .next()
            .map(|(key, _)| key);
        match key.and_then(|key| computed.iter().position(|(param, _)| *param == key)) {
            Some(idx) if !placed[idx] => {
                pieces.push(encode_pair(computed[idx]));
                placed[idx] = true;
            }
            Some(_) => {}
            None => pieces.push(piece.to_string()),
        }
    }

    for (&pair, done) in computed.iter().zip(&placed) {
        if !done {
            pieces.push(encode_pair(pair));
        }
    }

    (literal.is_some() || !pieces.is_empty()).then(|| pieces.join("&"))
}

fn encode_pair((key, value): (&str, &str)) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish()
}

/// Field name when the template is exactly one placeholder
fn whole_placeholder(template: &str) -> Option<&str> {
    let inner = template.strip_prefix('{')?.strip_suffix('}')?;
    (!inner.is_empty() && !inner.contains(['{', '}'])).then_some(inner)
}

/// Raw pieces of an absolute URL template
#[derive(Debug, PartialEq, Eq)]
struct TemplateParts<'a> {
    scheme: &'a str,
    userinfo: Option<&'a str>,
    host: &'a str,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

fn split_template(template: &str) -> Result<TemplateParts<'_>> {
    let (scheme, rest) = template
        .split_once("://")
        .ok_or_else(|| Error::template("URL template is not absolute (missing scheme)"))?;

    let (rest, fragment) = match rest.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (rest, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((head, query)) => (head, Some(query)),
        None => (rest, None),
    };
    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    let (userinfo, host) = match authority.rsplit_once('@') {
        Some((userinfo, host)) => (Some(userinfo), host),
        None => (None, authority),
    };

    Ok(TemplateParts {
        scheme,
        userinfo,
        host,
        path,
        query,
        fragment,
    })
}

/// Replace every `{field}` in `segment` with the encoded field value
fn substitute(segment: &str, data: &ValidatedData, secrets: Secrets) -> Result<String> {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .ok_or_else(|| Error::template(format!("unclosed placeholder in '{}'", segment)))?;
        let field = &after[..end];
        let value = data.get(field).ok_or_else(|| {
            Error::template(format!("no value for URL placeholder '{{{}}}'", field))
        })?;
        out.push_str(&urlencoding::encode(secrets.apply(field, value)));
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
