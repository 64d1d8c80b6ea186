use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        HeaderMap, HeaderName, HeaderValue, StatusCode,
        header::{InvalidHeaderName, InvalidHeaderValue},
    },
    middleware::Next,
    response::Response,
};
use cors_manager::{CorsDecision, Headers, RequestContext, Transport, constants::header};
use thiserror::Error;

use super::AppState;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid header name")]
    Name(#[from] InvalidHeaderName),
    #[error("invalid header value")]
    Value(#[from] InvalidHeaderValue),
}

/// Collects preflight headers for the early response.
#[derive(Default)]
struct PreflightTransport {
    headers: HeaderMap,
    terminated: bool,
}

impl Transport for PreflightTransport {
    type Error = TransportError;

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), Self::Error> {
        self.headers
            .insert(HeaderName::try_from(name)?, HeaderValue::from_str(value)?);
        Ok(())
    }

    fn terminate(&mut self) -> Result<(), Self::Error> {
        self.terminated = true;
        Ok(())
    }
}

impl PreflightTransport {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::empty());
        *response.headers_mut() = self.headers;
        response
    }
}

pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().as_str().to_string();
    let origin = header_value(request.headers(), header::ORIGIN);
    let context = RequestContext::new(&method, origin.as_deref());

    let mut transport = PreflightTransport::default();
    match state.interceptor.intercept(&context, &mut transport) {
        Ok(CorsDecision::Terminated { .. }) => transport.into_response(),
        Ok(CorsDecision::PassThrough { headers }) => {
            let mut response = next.run(request).await;
            if let Err(err) = apply_headers(response.headers_mut(), &headers) {
                return transport_error_response(err);
            }
            response
        }
        Err(err) => transport_error_response(err),
    }
}

fn apply_headers(map: &mut HeaderMap, headers: &Headers) -> Result<(), TransportError> {
    for (name, value) in headers {
        map.insert(HeaderName::try_from(name.as_str())?, HeaderValue::from_str(value)?);
    }
    Ok(())
}

fn transport_error_response(err: TransportError) -> Response {
    tracing::error!(error = %err, "failed to write CORS headers");
    let mut response = Response::new(Body::from(format!("CORS transport error: {err}")));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
