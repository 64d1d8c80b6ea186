use crate::headers::{Headers, merge_headers};

/// Lifecycle of one request inside the interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptorState {
    Idle,
    Evaluating,
    Terminated,
    PassThrough,
}

/// Overall decision returned by the interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// Preflight: `headers` were written to the transport and the request was
    /// terminated. No downstream handler runs.
    Terminated { headers: Headers },
    /// Downstream handlers run; `headers` must be merged into their response.
    /// Empty when the policy is disabled.
    PassThrough { headers: Headers },
}

impl CorsDecision {
    pub fn state(&self) -> InterceptorState {
        match self {
            CorsDecision::Terminated { .. } => InterceptorState::Terminated,
            CorsDecision::PassThrough { .. } => InterceptorState::PassThrough,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, CorsDecision::Terminated { .. })
    }

    pub fn headers(&self) -> &Headers {
        match self {
            CorsDecision::Terminated { headers } | CorsDecision::PassThrough { headers } => headers,
        }
    }

    pub fn into_headers(self) -> Headers {
        match self {
            CorsDecision::Terminated { headers } | CorsDecision::PassThrough { headers } => headers,
        }
    }

    /// Merges pass-through headers into a downstream response; CORS values win
    /// on collision. Does nothing for a terminated request.
    pub fn apply_to(&self, response_headers: &mut Headers) {
        if let CorsDecision::PassThrough { headers } = self {
            merge_headers(response_headers, headers);
        }
    }
}
