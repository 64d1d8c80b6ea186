#![allow(dead_code)]

use cors_manager::constants::method;
use cors_manager::{
    AllowedHeaders, AllowedMethods, CorsDecision, Method, Policy, PolicySource, RequestContext,
    RequestInterceptor, Transport,
};
use std::convert::Infallible;

#[derive(Default)]
pub struct PolicyBuilder {
    enabled: Option<bool>,
    origins: Option<Vec<String>>,
    methods: Option<AllowedMethods>,
    allowed_headers: Option<AllowedHeaders>,
    credentials: Option<bool>,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = Some(origins.into_iter().map(Into::into).collect());
        self
    }

    pub fn methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        self.methods = Some(AllowedMethods::list(methods));
        self
    }

    pub fn allowed_headers(mut self, value: impl Into<String>) -> Self {
        self.allowed_headers = Some(AllowedHeaders::new(value));
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.credentials = Some(enabled);
        self
    }

    /// Enabled unless told otherwise; every other field keeps the policy default.
    pub fn build(self) -> Policy {
        let Policy {
            enabled: _,
            allowed_origins: default_origins,
            allowed_methods: default_methods,
            allowed_headers: default_allowed_headers,
            allow_credentials: default_credentials,
        } = Policy::default();

        Policy {
            enabled: self.enabled.unwrap_or(true),
            allowed_origins: self.origins.unwrap_or(default_origins),
            allowed_methods: self.methods.unwrap_or(default_methods),
            allowed_headers: self.allowed_headers.unwrap_or(default_allowed_headers),
            allow_credentials: self.credentials.unwrap_or(default_credentials),
        }
    }

    pub fn interceptor(self) -> RequestInterceptor {
        RequestInterceptor::new(self.build())
    }
}

/// Response handle that records every call made by the interceptor.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub written: Vec<(String, String)>,
    pub terminated: bool,
}

impl Transport for RecordingTransport {
    type Error = Infallible;

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), Self::Error> {
        self.written.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn terminate(&mut self) -> Result<(), Self::Error> {
        self.terminated = true;
        Ok(())
    }
}

pub struct RequestBuilder {
    method: String,
    origin: Option<String>,
}

impl RequestBuilder {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            origin: None,
        }
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn build_headers(&self, policy: &Policy) -> cors_manager::Headers {
        cors_manager::build(policy, &self.context())
    }

    pub fn intercept<P: PolicySource>(
        self,
        interceptor: &RequestInterceptor<P>,
    ) -> (CorsDecision, RecordingTransport) {
        let mut transport = RecordingTransport::default();
        let decision = match interceptor.intercept(&self.context(), &mut transport) {
            Ok(decision) => decision,
            Err(never) => match never {},
        };
        (decision, transport)
    }

    fn context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
        }
    }
}

pub fn policy() -> PolicyBuilder {
    PolicyBuilder::new()
}

pub fn simple_request() -> RequestBuilder {
    RequestBuilder::new(method::GET)
}

pub fn preflight_request() -> RequestBuilder {
    RequestBuilder::new(method::OPTIONS)
}
