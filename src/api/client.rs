//! HTTP client for the restaurant backend.

use std::{
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

use reqwest::{
    Client, Method, RequestBuilder, StatusCode, Url,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{api::ApiError, config::ApiConfig};

/// Shared connection to the backend.
///
/// Clones share the session token, so a token adopted after logging in is
/// sent by every service built from the same client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.api_url.trim_end_matches('/').to_string();

        Url::parse(&base_url).map_err(|error| ApiError::InvalidUrl(format!("{base_url}: {error}")))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_seconds))
            .build()?;

        Ok(Self {
            base_url,
            http,
            token: Arc::new(RwLock::new(non_empty(config.api_token.clone()))),
        })
    }

    /// Base URL every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current session token.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the session token; `None` or an empty token signs out.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = non_empty(token);
    }

    /// Full URL for `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let url = format!("{}{path}", self.base_url);

        Url::parse(&url).map_err(|error| ApiError::InvalidUrl(format!("{url}: {error}")))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path)?.query(query);

        required(self.fetch(request).await?)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);

        required(self.fetch(request).await?)
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path)?.json(body);

        required(self.fetch(request).await?)
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut request = self.request(Method::PATCH, path)?;

        if let Some(body) = body {
            request = request.json(body);
        }

        required(self.fetch(request).await?)
    }

    /// Send a DELETE and discard whatever the backend answers with.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, path)?;

        self.send(request).await.map(|_body| ())
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let mut request = self
            .http
            .request(method, self.url(path)?)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }

        Ok(request)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>, ApiError> {
        let Some(body) = self.send(request).await? else {
            return Ok(None);
        };

        if body.is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_slice(&body)?;

        Ok(Some(serde_json::from_value(unwrap_envelope(value))?))
    }

    // Ok(None) means 204 No Content.
    async fn send(&self, request: RequestBuilder) -> Result<Option<Vec<u8>>, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!(%method, %url, "sending api request");

        let response = self
            .http
            .execute(request)
            .await
            .inspect_err(|error| warn!(%method, %url, %error, "api request failed to send"))?;

        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            debug!(%method, %url, status = status.as_u16(), "api request returned no content");

            return Ok(None);
        }

        let body = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(status, &body);

            warn!(%method, %url, status = status.as_u16(), %message, "api request rejected");

            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        debug!(%method, %url, status = status.as_u16(), "api request succeeded");

        Ok(Some(body.to_vec()))
    }
}

fn required<T>(payload: Option<T>) -> Result<T, ApiError> {
    payload.ok_or(ApiError::EmptyBody)
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|token| !token.trim().is_empty())
}

/// Payload of a response body: the `data` member when present and not null,
/// otherwise the whole body.
pub(crate) fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(|data| !data.is_null()) => {
            map.remove("data").unwrap_or_default()
        }
        body => body,
    }
}

/// Human-readable text for a rejected request.
///
/// Prefers the body's `message`, then its `msg`, then the body itself. Only
/// non-empty strings count as a `message` or `msg`; any other value, such as
/// a number or an object, falls through to the serialized body. A body that
/// is not JSON yields a generic text naming the status code.
pub(crate) fn error_message(status: StatusCode, body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return format!("HTTP error, status {}", status.as_u16());
    };

    ["message", "msg"]
        .into_iter()
        .filter_map(|key| value.get(key))
        .find_map(|field| match field {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn envelope_data_is_unwrapped() {
        let body = json!({ "status": "success", "data": [1, 2] });

        assert_eq!(unwrap_envelope(body), json!([1, 2]));
    }

    #[test]
    fn bare_body_is_kept() {
        assert_eq!(
            unwrap_envelope(json!({ "access_token": "abc" })),
            json!({ "access_token": "abc" })
        );
        assert_eq!(unwrap_envelope(json!(["carne"])), json!(["carne"]));
    }

    #[test]
    fn null_data_falls_back_to_whole_body() {
        let body = json!({ "status": "success", "data": null });

        assert_eq!(unwrap_envelope(body.clone()), body);
    }

    #[test]
    fn error_message_prefers_message_then_msg() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, br#"{"message":"not found","msg":"x"}"#),
            "not found"
        );
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, br#"{"msg":"Token has expired"}"#),
            "Token has expired"
        );
    }

    #[test]
    fn error_message_falls_back_to_serialized_body() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, br#"{"message":"","error":"bad"}"#),
            r#"{"error":"bad","message":""}"#
        );
    }

    #[test]
    fn non_string_message_falls_back_to_serialized_body() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, br#"{"message":{"nome":"required"}}"#),
            r#"{"message":{"nome":"required"}}"#
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, br#"{"message":42,"msg":"bad id"}"#),
            "bad id"
        );
    }

    #[test]
    fn error_message_for_non_json_body_names_the_status() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, b"<html>Bad Gateway</html>"),
            "HTTP error, status 502"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, b""),
            "HTTP error, status 500"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() -> TestResult {
        let client = ApiClient::new(&ApiConfig::new("http://localhost:5000/api/"))?;

        assert_eq!(client.url("/esfihas")?.as_str(), "http://localhost:5000/api/esfihas");

        Ok(())
    }

    #[test]
    fn relative_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new(&ApiConfig::new("/api")),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn clones_share_the_session_token() -> TestResult {
        let client = ApiClient::new(&ApiConfig::default())?;
        let clone = client.clone();

        client.set_token(Some("jwt".to_string()));
        assert_eq!(clone.token().as_deref(), Some("jwt"));

        clone.set_token(Some(String::new()));
        assert_eq!(client.token(), None);

        Ok(())
    }
}
