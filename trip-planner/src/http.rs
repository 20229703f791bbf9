//! Response handling shared by the provider HTTP clients.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{ProviderError, Service};

/// Map error statuses to `ProviderError` and return the body of a success.
pub(crate) async fn read_text(
    response: reqwest::Response,
    service: Service,
) -> Result<String, ProviderError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ProviderError::Unauthorized(service));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited(service));
    }

    if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::GATEWAY_TIMEOUT {
        return Err(ProviderError::Timeout(service));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            service,
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

/// Decode a JSON body, keeping the payload in the error if it fails.
pub(crate) fn decode_json<T: DeserializeOwned>(
    service: Service,
    body: &str,
) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(
            service = %service,
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Malformed provider response"
        );
        ProviderError::malformed(service, e.to_string(), Some(body))
    })
}

/// Map a reqwest send failure, keeping timeouts distinguishable.
pub(crate) fn send_error(service: Service, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(service)
    } else {
        ProviderError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        value: u32,
    }

    #[test]
    fn decode_valid_json() {
        let probe: Probe = decode_json(Service::Flights, r#"{"value": 3}"#).unwrap();
        assert_eq!(probe.value, 3);
    }

    #[test]
    fn decode_invalid_json_keeps_body() {
        let err = decode_json::<Probe>(Service::Flights, "<html>oops</html>").unwrap_err();
        match err {
            ProviderError::Malformed { service, body, .. } => {
                assert_eq!(service, Service::Flights);
                assert_eq!(body.as_deref(), Some("<html>oops</html>"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
