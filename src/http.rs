//! Blocking HTTP plumbing shared by the GitHub and Trello clients
//!
//! Every remote call goes through the [`HttpClient`] trait so client logic can
//! be exercised against a mock. The real implementation sits on `ureq`; calls
//! block, there are no retries and no timeouts beyond what the transport
//! defaults to.

use crate::errors::WorkflowError;
use anyhow::{Context, Result};

#[cfg(test)]
use mockall::automock;

/// HTTP response abstraction for testing
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP headers type
pub type Headers = Vec<(String, String)>;

/// Map a non-success response to the reported error.
///
/// Both GitHub and Trello put a human-readable `message` field in JSON error
/// bodies; plain-text bodies are passed through as-is.
pub fn api_error(response: &HttpResponse) -> WorkflowError {
    let message = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| response.body.trim().to_string());

    WorkflowError::Api {
        status: response.status,
        message,
    }
}

/// Whether a status code is in the 2xx range
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Trait for HTTP operations (allows mocking)
#[cfg_attr(test, automock)]
pub trait HttpClient {
    /// Send a GET request
    fn get(&self, url: &str, headers: Headers) -> Result<HttpResponse>;

    /// Send a POST request with a JSON body
    fn post(&self, url: &str, headers: Headers, body: String) -> Result<HttpResponse>;
}

/// Real HTTP client using ureq
///
/// Non-2xx statuses are returned as ordinary responses, not transport errors;
/// the callers decide what a given status means.
#[derive(Default)]
pub struct UreqHttpClient;

impl UreqHttpClient {
    fn finish(result: std::result::Result<ureq::Response, ureq::Error>) -> Result<HttpResponse> {
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(e).context("HTTP request failed"),
        };
        let status = response.status();
        let body = response
            .into_string()
            .context("Failed to read response body")?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &str, headers: Headers) -> Result<HttpResponse> {
        let mut request = ureq::get(url);
        for (key, value) in &headers {
            request = request.set(key, value);
        }
        Self::finish(request.call())
    }

    fn post(&self, url: &str, headers: Headers, body: String) -> Result<HttpResponse> {
        let mut request = ureq::post(url);
        for (key, value) in &headers {
            request = request.set(key, value);
        }
        Self::finish(request.send_string(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_struct() {
        let response = HttpResponse {
            status: 200,
            body: "test body".to_string(),
        };
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "test body");
    }

    #[test]
    fn test_api_error_json_message() {
        let response = HttpResponse {
            status: 422,
            body: r#"{"message": "Validation Failed"}"#.to_string(),
        };
        let err = api_error(&response);
        assert!(matches!(
            err,
            WorkflowError::Api { status: 422, ref message } if message == "Validation Failed"
        ));
    }

    #[test]
    fn test_api_error_plain_body() {
        let response = HttpResponse {
            status: 400,
            body: "invalid id\n".to_string(),
        };
        let err = api_error(&response);
        assert!(matches!(
            err,
            WorkflowError::Api { status: 400, ref message } if message == "invalid id"
        ));
    }

    #[test]
    fn test_is_success() {
        assert!(is_success(200));
        assert!(is_success(201));
        assert!(!is_success(301));
        assert!(!is_success(404));
    }
}
