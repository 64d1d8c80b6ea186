use crate::policy::Policy;
use std::fmt;

const NONE_SPECIFIED: &str = "None specified";

/// Summary of the effective policy for an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub enabled: bool,
    pub origins: Option<String>,
    pub methods: Option<String>,
    pub headers: Option<String>,
}

impl From<&Policy> for StatusReport {
    fn from(policy: &Policy) -> Self {
        let origins = (!policy.allowed_origins.is_empty())
            .then(|| policy.allowed_origins.join(", "));
        Self {
            enabled: policy.enabled,
            origins,
            methods: policy.allowed_methods.header_value(),
            headers: policy
                .allowed_headers
                .header_value()
                .map(str::to_string),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled {
            return f.write_str("CORS is currently disabled");
        }

        writeln!(f, "CORS is currently enabled")?;
        writeln!(
            f,
            "Allowed Origins: {}",
            self.origins.as_deref().unwrap_or(NONE_SPECIFIED)
        )?;
        writeln!(
            f,
            "Allowed Methods: {}",
            self.methods.as_deref().unwrap_or(NONE_SPECIFIED)
        )?;
        write!(
            f,
            "Allowed Headers: {}",
            self.headers.as_deref().unwrap_or(NONE_SPECIFIED)
        )
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;
