use crate::constants::DEFAULT_ALLOWED_HEADERS;

/// Value of the `Access-Control-Allow-Headers` response header.
///
/// Kept verbatim; header-name syntax is not validated.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AllowedHeaders(String);

impl AllowedHeaders {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn header_value(&self) -> Option<&str> {
        if self.0.is_empty() {
            None
        } else {
            Some(&self.0)
        }
    }
}

impl Default for AllowedHeaders {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_HEADERS)
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
