//! HTTP client for the contest backend
//!
//! Wraps one `reqwest::Client`, attaches bearer tokens from local storage
//! and decodes the shared response envelope into typed results.

use std::sync::Arc;
use std::time::Duration;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::Settings;
use crate::storage::{LocalStorage, TOKEN_KEY, VIP_TOKEN_KEY};
use crate::utils::errors::{FieldErrors, RetailChampionsError, Result};
use crate::utils::{helpers, logging};
use super::endpoints::Endpoints;
use super::envelope::{ApiEnvelope, ListPayload, Page};

/// Which stored token, if any, authorizes a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScope {
    Public,
    Admin,
    Vip,
}

/// Backend client shared by all services
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoints: Arc<Endpoints>,
    storage: LocalStorage,
}

impl ApiClient {
    /// Create a new client from settings and a storage handle
    pub fn new(settings: &Settings, storage: LocalStorage) -> Result<Self> {
        let mut builder = Client::builder().user_agent(settings.api.user_agent.clone());
        if let Some(timeout) = settings.api.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let http = builder.build().map_err(RetailChampionsError::Network)?;

        Ok(Self {
            http,
            endpoints: Arc::new(Endpoints::new(&settings.api.base_url)?),
            storage,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub async fn get<T: DeserializeOwned>(&self, url: Url, scope: AuthScope) -> Result<T> {
        let envelope = self.send::<T>(Method::GET, url, scope, |r| r).await?;
        require_data(envelope)
    }

    /// GET where an absent `data` is a valid answer
    pub async fn get_optional<T: DeserializeOwned>(&self, url: Url, scope: AuthScope) -> Result<Option<T>> {
        let envelope = self.send::<T>(Method::GET, url, scope, |r| r).await?;
        Ok(envelope.data)
    }

    /// GET a list endpoint and normalize it to a page
    pub async fn get_page<T: DeserializeOwned>(&self, url: Url, scope: AuthScope) -> Result<Page<T>> {
        let payload: ListPayload<T> = self.get(url, scope).await?;
        Ok(payload.into())
    }

    pub async fn post_json<B, T>(&self, url: Url, body: &B, scope: AuthScope) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let envelope = self.send::<T>(Method::POST, url, scope, |r| r.json(body)).await?;
        require_data(envelope)
    }

    /// POST expecting only a message back
    pub async fn post_action<B>(&self, url: Url, body: &B, scope: AuthScope) -> Result<Option<String>>
    where
        B: Serialize + ?Sized,
    {
        let envelope = self
            .send::<serde_json::Value>(Method::POST, url, scope, |r| r.json(body))
            .await?;
        Ok(envelope.message)
    }

    pub async fn put_json<B, T>(&self, url: Url, body: &B, scope: AuthScope) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let envelope = self.send::<T>(Method::PUT, url, scope, |r| r.json(body)).await?;
        require_data(envelope)
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: reqwest::multipart::Form,
        scope: AuthScope,
    ) -> Result<T> {
        let envelope = self.send::<T>(Method::POST, url, scope, |r| r.multipart(form)).await?;
        require_data(envelope)
    }

    /// DELETE returning the server's message, if any
    pub async fn delete(&self, url: Url, scope: AuthScope) -> Result<Option<String>> {
        let envelope = self
            .send::<serde_json::Value>(Method::DELETE, url, scope, |r| r)
            .await?;
        Ok(envelope.message)
    }

    fn bearer_token(&self, scope: AuthScope) -> Option<String> {
        match scope {
            AuthScope::Public => None,
            AuthScope::Admin => self.storage.get(TOKEN_KEY),
            AuthScope::Vip => self.storage.get(VIP_TOKEN_KEY),
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        scope: AuthScope,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<ApiEnvelope<T>> {
        let request_id = helpers::generate_request_id();
        logging::log_api_request(&request_id, method.as_str(), url.as_str());

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header("X-Request-Id", &request_id);

        if let Some(token) = self.bearer_token(scope) {
            request = request.bearer_auth(token);
        } else if scope != AuthScope::Public {
            debug!(request_id = %request_id, "No stored token for authenticated request");
        }

        let response = build(request).send().await.map_err(|e| {
            logging::log_api_error(url.path(), &e.to_string(), Some("transport"));
            RetailChampionsError::Network(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(RetailChampionsError::Network)?;
        debug!(request_id = %request_id, status = status.as_u16(), bytes = body.len(), "API response");

        decode_response(status, &body)
    }
}

/// Map an HTTP status and body onto the envelope or a typed error
pub(crate) fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<ApiEnvelope<T>> {
    if !status.is_success() {
        let (message, field_errors) = match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body) {
            Ok(envelope) => {
                let fields = envelope.field_errors();
                (envelope.message, fields)
            }
            Err(_) => (None, FieldErrors::new()),
        };
        let message = message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

        warn!(status = status.as_u16(), message = %message, "API request failed");

        return Err(match status {
            StatusCode::CONFLICT => RetailChampionsError::Conflict(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                RetailChampionsError::Unauthorized(message)
            }
            _ => RetailChampionsError::Api {
                status: status.as_u16(),
                message,
                field_errors,
            },
        });
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(body)?;
    if !envelope.success {
        let message = envelope
            .message
            .clone()
            .unwrap_or_else(|| "Request was not successful".to_string());
        warn!(status = status.as_u16(), message = %message, "API reported failure");
        return Err(RetailChampionsError::Api {
            status: status.as_u16(),
            field_errors: envelope.field_errors(),
            message,
        });
    }

    Ok(envelope)
}

fn require_data<T>(envelope: ApiEnvelope<T>) -> Result<T> {
    envelope.data.ok_or_else(|| {
        RetailChampionsError::api(
            200,
            envelope
                .message
                .unwrap_or_else(|| "Response contained no data".to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_conflict_maps_to_duplicate() {
        let body = r#"{"success": false, "message": "Phone number already registered"}"#;
        let result = decode_response::<serde_json::Value>(StatusCode::CONFLICT, body);
        assert_matches!(result, Err(RetailChampionsError::Conflict(msg)) if msg == "Phone number already registered");
    }

    #[test]
    fn test_success_false_with_ok_status() {
        let body = r#"{"success": false, "message": "Invalid PIN", "errors": [{"field": "pin", "message": "PIN already used"}]}"#;
        let err = decode_response::<serde_json::Value>(StatusCode::OK, body).unwrap_err();
        assert_eq!(err.field_errors().and_then(|f| f.get("pin")), Some("PIN already used"));
    }

    #[test]
    fn test_unauthorized_without_json_body() {
        let result = decode_response::<serde_json::Value>(StatusCode::UNAUTHORIZED, "nope");
        assert_matches!(result, Err(RetailChampionsError::Unauthorized(msg)) if msg == "Unauthorized");
    }

    #[test]
    fn test_success_envelope() {
        let envelope = decode_response::<u32>(StatusCode::OK, r#"{"success": true, "data": 7}"#).unwrap();
        assert_eq!(envelope.data, Some(7));
    }
}
