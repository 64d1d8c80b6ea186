use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::{AllowedMethods, Method};
use crate::constants::WILDCARD_ORIGIN;
use crate::policy::Policy;
use crate::raw::RawPolicy;
use once_cell::sync::Lazy;
use regex_automata::meta::Regex;
use tracing::debug;
use url::Url;

/// Scheme plus host prefix. Accepts entries with trailing paths or ports that
/// a strict URL parse would reject.
static ORIGIN_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[a-zA-Z0-9.-]+").expect("origin prefix pattern is valid")
});

/// Normalizes a raw submission into a canonical [`Policy`].
///
/// Never fails: invalid origins and unknown methods are dropped, missing fields
/// fall back to their defaults.
pub fn sanitize(raw: &RawPolicy) -> Policy {
    let allowed_origins = raw
        .allowed_origins
        .as_deref()
        .map(sanitize_origins)
        .unwrap_or_default();

    let allowed_methods = match &raw.allowed_methods {
        Some(values) => {
            let dropped: Vec<&String> = values
                .iter()
                .filter(|value| Method::parse(value).is_none())
                .collect();
            if !dropped.is_empty() {
                debug!(?dropped, "dropped unsupported CORS methods");
            }
            let methods = AllowedMethods::intersect(values);
            if methods.is_empty() {
                AllowedMethods::default()
            } else {
                methods
            }
        }
        None => AllowedMethods::default(),
    };

    let allowed_headers = raw
        .allowed_headers
        .as_deref()
        .map(|text| AllowedHeaders::new(strip_control(text)))
        .unwrap_or_default();

    Policy {
        enabled: raw.cors_enabled,
        allowed_origins,
        allowed_methods,
        allowed_headers,
        allow_credentials: raw.allow_credentials,
    }
}

/// Splits origin text on newlines and keeps the acceptable entries in order.
pub fn sanitize_origins(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let keep = is_valid_origin_entry(line);
            if !keep {
                debug!(entry = %line, "dropped invalid CORS origin");
            }
            keep
        })
        .map(str::to_string)
        .collect()
}

/// `*`, an absolute http(s) URL with a host, or anything starting with a
/// scheme and host.
pub fn is_valid_origin_entry(entry: &str) -> bool {
    entry == WILDCARD_ORIGIN || is_http_url(entry) || ORIGIN_PREFIX.is_match(entry)
}

/// Header values cannot carry line breaks or other control characters.
fn strip_control(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !c.is_control()).collect();
    if stripped.len() != text.len() {
        debug!("stripped control characters from allowed headers");
    }
    stripped
}

fn is_http_url(entry: &str) -> bool {
    match Url::parse(entry) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod sanitize_test;
