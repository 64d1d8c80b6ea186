use crate::constants::{PREFLIGHT_MAX_AGE, WILDCARD_ORIGIN, header};
use crate::context::RequestContext;
use crate::headers::{HeaderCollection, Headers};
use crate::origin::{MatchResult, match_origin};
use crate::policy::Policy;
use tracing::debug;

/// Computes the CORS response headers for one request.
pub struct HeaderBuilder<'a> {
    policy: &'a Policy,
}

impl<'a> HeaderBuilder<'a> {
    pub fn new(policy: &'a Policy) -> Self {
        Self { policy }
    }

    /// Full header set in wire order; empty when the policy is disabled.
    pub fn build(&self, request: &RequestContext<'_>) -> Headers {
        if !self.policy.enabled {
            return Headers::new();
        }

        let mut headers = HeaderCollection::new();
        headers.extend(self.build_origin_header(request));
        headers.extend(self.build_methods_header());
        headers.extend(self.build_allowed_headers());
        headers.extend(self.build_credentials_header());
        headers.extend(self.build_max_age_header());
        headers.into_headers()
    }

    pub(crate) fn build_origin_header(&self, request: &RequestContext<'_>) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        match match_origin(&self.policy.allowed_origins, request.origin) {
            MatchResult::Wildcard => {
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, WILDCARD_ORIGIN);
            }
            MatchResult::Exact => {
                if let Some(origin) = request.origin {
                    headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                }
            }
            MatchResult::None => {
                debug!(origin = ?request.origin, "origin not allowed by CORS policy");
            }
        }
        headers
    }

    pub(crate) fn build_methods_header(&self) -> HeaderCollection {
        if let Some(value) = self.policy.allowed_methods.header_value() {
            let mut headers = HeaderCollection::with_estimate(1);
            headers.push(header::ACCESS_CONTROL_ALLOW_METHODS, value);
            headers
        } else {
            HeaderCollection::new()
        }
    }

    pub(crate) fn build_allowed_headers(&self) -> HeaderCollection {
        if let Some(value) = self.policy.allowed_headers.header_value() {
            let mut headers = HeaderCollection::with_estimate(1);
            headers.push(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
            headers
        } else {
            HeaderCollection::new()
        }
    }

    // Emitted even when the origin did not match.
    pub(crate) fn build_credentials_header(&self) -> HeaderCollection {
        if self.policy.allow_credentials {
            let mut headers = HeaderCollection::with_estimate(1);
            headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
            headers
        } else {
            HeaderCollection::new()
        }
    }

    pub(crate) fn build_max_age_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE);
        headers
    }
}

/// Shorthand for `HeaderBuilder::new(policy).build(request)`.
pub fn build(policy: &Policy, request: &RequestContext<'_>) -> Headers {
    HeaderBuilder::new(policy).build(request)
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
