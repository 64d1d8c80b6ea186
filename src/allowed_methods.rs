use crate::constants::method;
use std::collections::BTreeSet;
use std::fmt;

/// The fixed universe of methods a policy may allow.
///
/// Variant order is the canonical order used when rendering
/// `Access-Control-Allow-Methods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Patch,
    Head,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Options,
        Method::Patch,
        Method::Head,
    ];

    /// Case-sensitive lookup; `"get"` is not a member of the universe.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => method::GET,
            Method::Post => method::POST,
            Method::Put => method::PUT,
            Method::Delete => method::DELETE,
            Method::Options => method::OPTIONS,
            Method::Patch => method::PATCH,
            Method::Head => method::HEAD,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the `Access-Control-Allow-Methods` response header.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AllowedMethods(BTreeSet<Method>);

impl AllowedMethods {
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        Self(values.into_iter().collect())
    }

    /// Keeps the names that belong to the method universe and drops the rest.
    pub fn intersect<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            values
                .into_iter()
                .filter_map(|value| Method::parse(value.as_ref()))
                .collect(),
        )
    }

    pub fn contains(&self, method: Method) -> bool {
        self.0.contains(&method)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Method> + '_ {
        self.0.iter().copied()
    }

    /// Comma-space join in canonical order, or `None` when empty.
    pub fn header_value(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }

        Some(
            self.iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self::list([Method::Get, Method::Post])
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
