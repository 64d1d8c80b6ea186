use crate::constants::method;
use crate::context::RequestContext;
use crate::header_builder::HeaderBuilder;
use crate::policy::Policy;
use crate::result::{CorsDecision, InterceptorState};
use std::sync::Arc;
use tracing::trace;

/// Response handle of the host framework.
///
/// Errors are fatal transport failures; the interceptor returns them unchanged.
pub trait Transport {
    type Error;

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), Self::Error>;

    /// Ends the request now. No further handler may produce a body.
    fn terminate(&mut self) -> Result<(), Self::Error>;
}

/// Supplies the policy snapshot used for one request.
pub trait PolicySource {
    fn current(&self) -> Arc<Policy>;
}

impl PolicySource for Arc<Policy> {
    fn current(&self) -> Arc<Policy> {
        Arc::clone(self)
    }
}

/// Per-request CORS middleware: terminates preflight requests and hands the
/// header set of every other request back to the pipeline.
pub struct RequestInterceptor<P = Arc<Policy>> {
    source: P,
}

impl RequestInterceptor<Arc<Policy>> {
    pub fn new(policy: Policy) -> Self {
        Self {
            source: Arc::new(policy),
        }
    }
}

impl<P: PolicySource> RequestInterceptor<P> {
    pub fn with_source(source: P) -> Self {
        Self { source }
    }

    pub fn intercept<T>(
        &self,
        request: &RequestContext<'_>,
        transport: &mut T,
    ) -> Result<CorsDecision, T::Error>
    where
        T: Transport,
    {
        let policy = self.source.current();

        if !policy.enabled {
            transition(InterceptorState::Idle, InterceptorState::PassThrough);
            return Ok(CorsDecision::PassThrough {
                headers: Default::default(),
            });
        }

        transition(InterceptorState::Idle, InterceptorState::Evaluating);
        let headers = HeaderBuilder::new(&policy).build(request);

        if request.method == method::OPTIONS {
            for (name, value) in &headers {
                transport.set_header(name, value)?;
            }
            transport.terminate()?;
            transition(InterceptorState::Evaluating, InterceptorState::Terminated);
            return Ok(CorsDecision::Terminated { headers });
        }

        transition(InterceptorState::Evaluating, InterceptorState::PassThrough);
        Ok(CorsDecision::PassThrough { headers })
    }
}

fn transition(from: InterceptorState, to: InterceptorState) {
    trace!(?from, ?to, "cors interceptor transition");
}

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;
