use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use theradmin_core::TokenSource;
use theradmin_domain::{AdminError, ApiConfig, ApiResponse, FormPart, FormPayload};
use tracing::{debug, instrument, warn};

use crate::errors::InfraError;

/// Body of an outgoing request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(FormPayload),
}

/// HTTP client returning the response envelope for every call.
///
/// Requests carry `Authorization: Bearer <token>` when the token source has
/// one. Failures of any kind come back as `success == false`; nothing is
/// retried here. A 401 additionally notifies the token source so the session
/// can be torn down.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    tokens: Option<Arc<dyn TokenSource>>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client for the configured backend.
    pub fn from_config(
        config: &ApiConfig,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, AdminError> {
        Self::builder()
            .base_url(&config.base_url)
            .timeout(config.timeout())
            .token_source(tokens)
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET` `path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResponse<T> {
        self.request(Method::GET, path, &[], RequestBody::Empty).await
    }

    /// `GET` `path` with query-string pairs.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResponse<T> {
        self.request(Method::GET, path, query, RequestBody::Empty).await
    }

    /// `POST` `body` as JSON. A body that fails to serialize becomes a failed envelope.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match json_body(body) {
            Ok(body) => self.request(Method::POST, path, &[], body).await,
            Err(err) => ApiResponse::failure(err.to_string(), None),
        }
    }

    /// `PUT` `body` as JSON.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match json_body(body) {
            Ok(body) => self.request(Method::PUT, path, &[], body).await,
            Err(err) => ApiResponse::failure(err.to_string(), None),
        }
    }

    /// `POST` a multipart form.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormPayload,
    ) -> ApiResponse<T> {
        self.request(Method::POST, path, &[], RequestBody::Multipart(form)).await
    }

    /// `PUT` a multipart form.
    pub async fn put_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormPayload,
    ) -> ApiResponse<T> {
        self.request(Method::PUT, path, &[], RequestBody::Multipart(form)).await
    }

    /// Send a request and shape whatever happens into an envelope.
    #[instrument(skip_all, fields(%method, path = %path))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: RequestBody,
    ) -> ApiResponse<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(token) = self.tokens.as_ref().and_then(|t| t.access_token()) {
            builder = builder.bearer_auth(token);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => match multipart_form(form) {
                Ok(form) => builder.multipart(form),
                Err(err) => return ApiResponse::failure(err.to_string(), None),
            },
        };

        debug!(%url, "sending HTTP request");
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                let err = AdminError::from(InfraError::from(err));
                debug!(error = %err, "HTTP request failed");
                return ApiResponse::failure(err.to_string(), None);
            }
        };

        let status = response.status();
        debug!(%status, "received HTTP response");

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                let err = AdminError::from(InfraError::from(err));
                return ApiResponse::failure(err.to_string(), None);
            }
        };

        if status.is_success() {
            return decode_success(status, &bytes);
        }

        if status == StatusCode::UNAUTHORIZED {
            if let Some(tokens) = &self.tokens {
                warn!("backend rejected the session token");
                tokens.on_unauthorized().await;
            }
        }
        ApiResponse::failure(error_message(status, &bytes), Some(status.as_u16()))
    }
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    tokens: Option<Arc<dyn TokenSource>>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        let api = ApiConfig::default();
        let timeout = api.timeout();
        Self { base_url: api.base_url, timeout, user_agent: None, tokens: None }
    }
}

impl HttpClientBuilder {
    /// Origin every request path is joined onto.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Where the bearer token comes from, read on every request.
    pub fn token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Fails with a config error when the base URL does not parse or cannot take paths.
    pub fn build(self) -> Result<HttpClient, AdminError> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| AdminError::Config(format!("invalid API base URL: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(AdminError::Config(format!(
                "API base URL cannot take paths: {}",
                self.base_url
            )));
        }

        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        let client = builder.build().map_err(|err| AdminError::from(InfraError::from(err)))?;

        Ok(HttpClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            tokens: self.tokens,
        })
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, AdminError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| AdminError::Internal(format!("failed to serialize request body: {e}")))
}

fn multipart_form(payload: FormPayload) -> Result<Form, AdminError> {
    let mut form = Form::new();
    for part in payload.parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, attachment } => {
                let mut file = Part::bytes(attachment.bytes).file_name(attachment.file_name);
                if let Some(mime) = attachment.mime_type {
                    file = file
                        .mime_str(&mime)
                        .map_err(|e| AdminError::Validation(format!("invalid MIME type: {e}")))?;
                }
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

/// Shape a 2xx body.
///
/// A body that already is an envelope (a JSON object with a boolean
/// `success`) passes through. Any other JSON becomes the payload, with its
/// `message` field lifted onto the envelope. An empty body is a payload-less
/// success.
fn decode_success<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> ApiResponse<T> {
    let code = status.as_u16();
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return ApiResponse::empty().with_status(code);
    }

    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(err) => {
            return ApiResponse::failure(format!("Invalid response body: {err}"), Some(code));
        }
    };

    if value.get("success").is_some_and(Value::is_boolean) {
        return match serde_json::from_value::<ApiResponse<T>>(value) {
            Ok(mut envelope) => {
                if !envelope.success && envelope.error.is_none() {
                    envelope.error = envelope.message.clone();
                }
                envelope.with_status(code)
            }
            Err(err) => ApiResponse::failure(format!("Invalid response body: {err}"), Some(code)),
        };
    }

    let message = value.get("message").and_then(Value::as_str).map(str::to_string);
    match serde_json::from_value::<T>(value) {
        Ok(data) => ApiResponse::ok(data).with_message(message).with_status(code),
        Err(err) => ApiResponse::failure(format!("Invalid response body: {err}"), Some(code)),
    }
}

/// The backend's `message` field, or the generic status text.
fn error_message(status: StatusCode, bytes: &[u8]) -> String {
    serde_json::from_slice::<Value>(bytes)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}
