//! Conversions from external infrastructure errors into domain errors.

use dealscope_domain::DealScopeError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DealScopeError);

impl From<InfraError> for DealScopeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DealScopeError> for InfraError {
    fn from(value: DealScopeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoDealScopeError {
    fn into_dealscope(self) -> DealScopeError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DealScopeError */
/* -------------------------------------------------------------------------- */

impl IntoDealScopeError for HttpError {
    fn into_dealscope(self) -> DealScopeError {
        if self.is_timeout() {
            return DealScopeError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return DealScopeError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return DealScopeError::Crm {
                status: self.status().map(|s| s.as_u16()).unwrap_or(200),
                message: format!("undecodable CRM response: {self}"),
            };
        }

        if let Some(status) = self.status() {
            return status_error(status.as_u16(), None, String::new());
        }

        DealScopeError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_dealscope())
    }
}

/* -------------------------------------------------------------------------- */
/* HTTP status → DealScopeError */
/* -------------------------------------------------------------------------- */

/// Map a non-success CRM status to the domain error.
///
/// `retry_after` is the `Retry-After` header in seconds, when the CRM sent
/// one; `body` is the response text used as the message for generic
/// failures.
pub fn status_error(status: u16, retry_after: Option<u64>, body: String) -> DealScopeError {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown status");
    let message = if body.trim().is_empty() {
        format!("HTTP {status} {reason}")
    } else {
        format!("HTTP {status} {reason}: {}", body.trim())
    };

    match status {
        401 | 403 => DealScopeError::Auth(message),
        404 => DealScopeError::NotFound(message),
        429 => DealScopeError::RateLimited(retry_after.unwrap_or(10)),
        _ => DealScopeError::Crm { status, message },
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use tokio::runtime::Runtime;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn status_codes_map_to_domain_errors() {
        assert!(matches!(status_error(401, None, String::new()), DealScopeError::Auth(_)));
        assert!(matches!(status_error(403, None, String::new()), DealScopeError::Auth(_)));
        assert!(matches!(status_error(404, None, String::new()), DealScopeError::NotFound(_)));
        assert_eq!(status_error(429, Some(3), String::new()), DealScopeError::RateLimited(3));
        assert_eq!(status_error(429, None, String::new()), DealScopeError::RateLimited(10));

        match status_error(400, None, r#"{"message":"bad property"}"#.into()) {
            DealScopeError::Crm { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("bad property"));
            }
            other => panic!("expected CRM error, got {:?}", other),
        }
    }

    #[test]
    fn http_status_401_maps_to_auth_error() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
                .mount(&server)
                .await;

            let client = Client::builder().no_proxy().build().unwrap();
            let error =
                client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

            let mapped: DealScopeError = InfraError::from(error).into();
            match mapped {
                DealScopeError::Auth(msg) => assert!(msg.contains("401")),
                other => panic!("expected auth error, got {:?}", other),
            }
        });
    }
}
