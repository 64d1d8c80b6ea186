use super::*;
use crate::constants::header;
use crate::headers::Headers;

#[derive(Default)]
struct RecordingTransport {
    written: Vec<(String, String)>,
    terminated: bool,
}

impl Transport for RecordingTransport {
    type Error = std::convert::Infallible;

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), Self::Error> {
        self.written.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn terminate(&mut self) -> Result<(), Self::Error> {
        self.terminated = true;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
struct ConnectionClosed;

struct ClosedTransport {
    terminate_called: bool,
}

impl Transport for ClosedTransport {
    type Error = ConnectionClosed;

    fn set_header(&mut self, _name: &str, _value: &str) -> Result<(), Self::Error> {
        Err(ConnectionClosed)
    }

    fn terminate(&mut self) -> Result<(), Self::Error> {
        self.terminate_called = true;
        Ok(())
    }
}

fn wildcard_policy() -> Policy {
    Policy::new().enabled(true).origins(["*"])
}

fn request(method: &'static str) -> RequestContext<'static> {
    RequestContext::new(method, Some("https://foo.com"))
}

mod intercept {
    use super::*;

    #[test]
    fn should_pass_through_untouched_when_policy_disabled() {
        // Arrange
        let interceptor = RequestInterceptor::new(Policy::new().origins(["*"]));
        let mut transport = RecordingTransport::default();

        // Act
        let decision = interceptor
            .intercept(&request(method::OPTIONS), &mut transport)
            .unwrap();

        // Assert
        assert_eq!(
            decision,
            CorsDecision::PassThrough {
                headers: Headers::new()
            }
        );
        assert!(transport.written.is_empty());
        assert!(!transport.terminated);
    }

    #[test]
    fn should_write_headers_and_terminate_when_preflight() {
        // Arrange
        let interceptor = RequestInterceptor::new(wildcard_policy());
        let mut transport = RecordingTransport::default();

        // Act
        let decision = interceptor
            .intercept(&request(method::OPTIONS), &mut transport)
            .unwrap();

        // Assert
        assert!(transport.terminated);
        assert_eq!(decision.state(), InterceptorState::Terminated);
        let written: Headers = transport.written.into_iter().collect();
        assert_eq!(&written, decision.headers());
        assert_eq!(
            written.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&"*".to_string())
        );
    }

    #[test]
    fn should_return_headers_without_touching_transport_when_not_preflight() {
        // Arrange
        let interceptor = RequestInterceptor::new(wildcard_policy());
        let mut transport = RecordingTransport::default();

        // Act
        let decision = interceptor
            .intercept(&request(method::GET), &mut transport)
            .unwrap();

        // Assert
        assert_eq!(decision.state(), InterceptorState::PassThrough);
        assert_eq!(decision.headers().len(), 4);
        assert!(transport.written.is_empty());
        assert!(!transport.terminated);
    }

    #[test]
    fn should_not_treat_lowercase_options_as_preflight() {
        let interceptor = RequestInterceptor::new(wildcard_policy());
        let mut transport = RecordingTransport::default();

        let decision = interceptor
            .intercept(&request("options"), &mut transport)
            .unwrap();

        assert!(!decision.is_terminated());
        assert!(!transport.terminated);
    }

    #[test]
    fn should_terminate_with_headers_even_when_origin_rejected() {
        // Arrange
        let policy = Policy::new().enabled(true).origins(["https://trusted.com"]);
        let interceptor = RequestInterceptor::new(policy);
        let mut transport = RecordingTransport::default();

        // Act
        let decision = interceptor
            .intercept(
                &RequestContext::new(method::OPTIONS, Some("https://evil.com")),
                &mut transport,
            )
            .unwrap();

        // Assert
        assert!(decision.is_terminated());
        assert!(
            !decision
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
        assert!(transport.terminated);
    }

    #[test]
    fn should_propagate_transport_error_unchanged() {
        // Arrange
        let interceptor = RequestInterceptor::new(wildcard_policy());
        let mut transport = ClosedTransport {
            terminate_called: false,
        };

        // Act
        let result = interceptor.intercept(&request(method::OPTIONS), &mut transport);

        // Assert
        assert_eq!(result, Err(ConnectionClosed));
        assert!(!transport.terminate_called);
    }

    #[test]
    fn should_read_current_snapshot_when_source_is_shared() {
        // Arrange
        let shared = Arc::new(wildcard_policy());
        let interceptor = RequestInterceptor::with_source(Arc::clone(&shared));
        let mut transport = RecordingTransport::default();

        // Act
        let decision = interceptor
            .intercept(&request(method::GET), &mut transport)
            .unwrap();

        // Assert
        assert_eq!(
            decision.headers(),
            &HeaderBuilder::new(&shared).build(&request(method::GET))
        );
    }
}

mod apply_to {
    use super::*;

    #[test]
    fn should_merge_pass_through_headers_over_response_headers() {
        // Arrange
        let interceptor = RequestInterceptor::new(wildcard_policy());
        let decision = interceptor
            .intercept(&request(method::GET), &mut RecordingTransport::default())
            .unwrap();
        let mut response: Headers = [
            ("Content-Type".to_string(), "application/json".to_string()),
            ("access-control-max-age".to_string(), "5".to_string()),
        ]
        .into_iter()
        .collect();

        // Act
        decision.apply_to(&mut response);

        // Assert
        assert_eq!(response.len(), 5);
        assert_eq!(
            response.get("access-control-max-age"),
            Some(&"86400".to_string())
        );
        assert_eq!(
            response.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn should_leave_response_alone_when_terminated() {
        let interceptor = RequestInterceptor::new(wildcard_policy());
        let decision = interceptor
            .intercept(&request(method::OPTIONS), &mut RecordingTransport::default())
            .unwrap();
        let mut response = Headers::new();

        decision.apply_to(&mut response);

        assert!(response.is_empty());
    }
}
