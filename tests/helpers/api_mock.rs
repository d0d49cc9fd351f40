//! Mock contest backend for testing
//!
//! A wiremock server that answers with the backend's
//! `{success, data, message, errors}` envelope.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock backend API server
pub struct ApiMockServer {
    pub server: MockServer,
}

impl ApiMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL the client should be configured with
    pub fn api_url(&self) -> String {
        format!("{}/api/", self.server.uri())
    }

    /// Mount a response for `METHOD /api/<route>`.
    ///
    /// `times` caps how often this mock answers; `expect` is verified when the
    /// server is dropped.
    pub async fn mount(
        &self,
        http_method: &str,
        route: &str,
        response: ResponseTemplate,
        times: Option<u64>,
        expect: Option<u64>,
    ) {
        let mut mock = Mock::given(method(http_method))
            .and(path(format!("/api/{}", route)))
            .respond_with(response);
        if let Some(times) = times {
            mock = mock.up_to_n_times(times);
        }
        if let Some(expect) = expect {
            mock = mock.expect(expect);
        }
        mock.mount(&self.server).await;
    }

    pub async fn ok(&self, http_method: &str, route: &str, data: Value) {
        self.mount(http_method, route, ok_response(data), None, None).await;
    }

    /// Requests received for one route
    pub async fn requests_to(&self, http_method: &str, route: &str) -> Vec<wiremock::Request> {
        let full_path = format!("/api/{}", route);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == http_method && r.url.path() == full_path)
            .collect()
    }

    pub async fn request_count(&self, http_method: &str, route: &str) -> usize {
        self.requests_to(http_method, route).await.len()
    }
}

/// `200 {success: true, data}`
pub fn ok_response(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

/// `200 {success: true, message}` with no data
pub fn message_response(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": message }))
}

/// Error status with `{success: false, message, errors}`
pub fn error_response(status: u16, message: &str, errors: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "success": false,
        "message": message,
        "errors": errors,
    }))
}

pub fn delayed(response: ResponseTemplate, millis: u64) -> ResponseTemplate {
    response.set_delay(Duration::from_millis(millis))
}
