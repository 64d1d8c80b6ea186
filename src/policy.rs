use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::raw::RawPolicy;

/// Canonical CORS policy. Produced by [`crate::sanitize`] and read-only while
/// requests are evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
    pub allowed_methods: AllowedMethods,
    pub allowed_headers: AllowedHeaders,
    pub allow_credentials: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            allowed_methods: AllowedMethods::default(),
            allowed_headers: AllowedHeaders::default(),
            allow_credentials: false,
        }
    }
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn methods(mut self, methods: AllowedMethods) -> Self {
        self.allowed_methods = methods;
        self
    }

    pub fn headers(mut self, headers: AllowedHeaders) -> Self {
        self.allowed_headers = headers;
        self
    }

    pub fn credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = allow;
        self
    }

    /// Origins joined with `\n`, the form they are stored in.
    pub fn origins_text(&self) -> String {
        self.allowed_origins.join("\n")
    }

    /// Canonical stored record; sanitizing it yields `self` again.
    pub fn to_raw(&self) -> RawPolicy {
        RawPolicy {
            cors_enabled: self.enabled,
            allowed_origins: Some(self.origins_text()),
            allowed_methods: Some(
                self.allowed_methods
                    .iter()
                    .map(|method| method.as_str().to_string())
                    .collect(),
            ),
            allowed_headers: Some(self.allowed_headers.as_str().to_string()),
            allow_credentials: self.allow_credentials,
        }
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
