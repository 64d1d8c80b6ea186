use crate::constants::WILDCARD_ORIGIN;

/// Outcome of matching a request `Origin` against the configured origin list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The list contains `*`; every request matches, with or without an origin.
    Wildcard,
    /// The request origin equals one configured entry byte for byte.
    Exact,
    None,
}

impl MatchResult {
    pub fn is_match(self) -> bool {
        !matches!(self, MatchResult::None)
    }
}

/// Membership test of `origin` in `allowed_origins`.
///
/// Comparison is exact: no case folding and no default-port or trailing-slash
/// normalization, so `https://example.com` does not match
/// `https://example.com:443`.
pub fn match_origin<S>(allowed_origins: &[S], origin: Option<&str>) -> MatchResult
where
    S: AsRef<str>,
{
    if allowed_origins
        .iter()
        .any(|entry| entry.as_ref() == WILDCARD_ORIGIN)
    {
        return MatchResult::Wildcard;
    }

    match origin {
        Some(origin) if allowed_origins.iter().any(|entry| entry.as_ref() == origin) => {
            MatchResult::Exact
        }
        _ => MatchResult::None,
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
