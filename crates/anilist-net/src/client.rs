//! GraphQL client implementation.

use std::sync::Arc;
use std::time::Duration;

use anilist_core::Operation;
use anilist_core::logging::targets;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::error::{Error, RemoteError, Result, TransportError};
use crate::rate_limit::{RateLimitInfo, RateLimiter};
use crate::request::GraphQLRequest;
use crate::response::{GraphQLError, GraphQLResponse};

/// The public AniList GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co";

/// Configuration for the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Client-side throttle; `None` disables it.
    pub requests_per_minute: Option<u32>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            user_agent: format!("anilist-rs/{}", env!("CARGO_PKG_VERSION")),
            requests_per_minute: None,
        }
    }
}

/// Builder for creating a [`GraphQLClient`].
pub struct GraphQLClientBuilder {
    config: TransportConfig,
    default_headers: http::HeaderMap,
    token: Option<String>,
}

impl Default for GraphQLClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphQLClientBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::from_config(TransportConfig::default())
    }

    /// Create a builder from an existing configuration.
    pub fn from_config(config: TransportConfig) -> Self {
        Self {
            config,
            default_headers: http::HeaderMap::new(),
            token: None,
        }
    }

    /// Set the GraphQL endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Disable request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Throttle to at most `requests` per minute.
    pub fn requests_per_minute(mut self, requests: u32) -> Self {
        self.config.requests_per_minute = Some(requests);
        self
    }

    /// Attach a bearer token from the start.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add a default header that will be sent with every request.
    pub fn default_header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Result<Self> {
        let name = name
            .try_into()
            .map_err(|_| Error::Config("invalid header name".to_string()))?;
        let value = value
            .try_into()
            .map_err(|_| Error::Config("invalid header value".to_string()))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Build the client.
    pub fn build(self) -> Result<GraphQLClient> {
        let endpoint = url::Url::parse(&self.config.endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "unsupported endpoint scheme `{}`",
                endpoint.scheme()
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        builder = builder
            .user_agent(&self.config.user_agent)
            .default_headers(self.default_headers);

        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        let limiter = self.config.requests_per_minute.map(RateLimiter::per_minute);

        Ok(GraphQLClient {
            inner: Arc::new(GraphQLClientInner {
                http,
                endpoint,
                config: self.config,
                token: RwLock::new(self.token),
                rate_limit: Mutex::new(None),
                limiter,
            }),
        })
    }
}

struct GraphQLClientInner {
    http: reqwest::Client,
    endpoint: url::Url,
    config: TransportConfig,
    token: RwLock<Option<String>>,
    rate_limit: Mutex<Option<RateLimitInfo>>,
    limiter: Option<RateLimiter>,
}

/// A GraphQL-over-HTTP client.
///
/// The client is cheaply cloneable; clones share the connection pool, the
/// bearer token and the last seen rate limit information.
///
/// # Example
///
/// ```ignore
/// use anilist_net::{GraphQLClient, GraphQLRequest};
///
/// let client = GraphQLClient::builder().build()?;
///
/// let request = GraphQLRequest::query("query { Media(id: 1) { id } }");
/// let data = client.execute(request, false).await?;
/// ```
#[derive(Clone)]
pub struct GraphQLClient {
    inner: Arc<GraphQLClientInner>,
}

impl GraphQLClient {
    /// Create a builder for configuring a new client.
    pub fn builder() -> GraphQLClientBuilder {
        GraphQLClientBuilder::new()
    }

    /// The endpoint URL.
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint.as_str()
    }

    /// The configuration the client was built with.
    pub fn config(&self) -> &TransportConfig {
        &self.inner.config
    }

    /// Attach or clear the bearer token.
    pub fn set_token(&self, token: Option<String>) {
        *self.inner.token.write() = token;
    }

    /// Whether a bearer token is attached.
    pub fn has_token(&self) -> bool {
        self.inner.token.read().is_some()
    }

    /// Rate limit information from the most recent response that carried it.
    pub fn rate_limit(&self) -> Option<RateLimitInfo> {
        self.inner.rate_limit.lock().clone()
    }

    /// Render and execute a composed operation.
    pub async fn execute_operation(&self, operation: &Operation, requires_auth: bool) -> Result<Value> {
        self.execute(GraphQLRequest::from(operation), requires_auth).await
    }

    /// Execute a request and return its `data` document.
    ///
    /// Fails with [`Error::AuthenticationRequired`] before sending anything
    /// when `requires_auth` is set and no token is attached. A response with
    /// any GraphQL errors fails as a whole, even if it also carries data.
    pub async fn execute(&self, request: GraphQLRequest, requires_auth: bool) -> Result<Value> {
        let label = request.label().to_owned();
        let token = self.inner.token.read().clone();

        if requires_auth && token.is_none() {
            tracing::debug!(
                target: targets::TRANSPORT,
                operation = %label,
                "refusing authenticated operation without a token"
            );
            return Err(Error::authentication_required(label));
        }

        if let Some(ref limiter) = self.inner.limiter {
            limiter.acquire().await;
        }

        tracing::trace!(target: targets::TRANSPORT, query = %request.query, "composed document");
        tracing::debug!(
            target: targets::TRANSPORT,
            operation = %label,
            kind = %request.operation_type(),
            authenticated = token.is_some(),
            "sending GraphQL request"
        );

        let mut http_request = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .header(http::header::CONTENT_TYPE, "application/json")
            .header(http::header::ACCEPT, "application/json")
            .json(&request);
        if let Some(token) = token.as_deref() {
            http_request = http_request.bearer_auth(token);
        }

        let response = http_request.send().await.map_err(|e| {
            let err = TransportError::from(e);
            tracing::warn!(target: targets::TRANSPORT, operation = %label, error = %err, "request failed");
            Error::Transport(err)
        })?;

        let status = response.status();
        let rate_limit = RateLimitInfo::from_headers(response.headers());
        if rate_limit.is_present() {
            tracing::debug!(
                target: targets::TRANSPORT,
                remaining = rate_limit.remaining,
                limit = rate_limit.limit,
                "rate limit"
            );
            *self.inner.rate_limit.lock() = Some(rate_limit.clone());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(TransportError::from(e)))?;

        tracing::debug!(
            target: targets::TRANSPORT,
            operation = %label,
            status = status.as_u16(),
            bytes = body.len(),
            "received response"
        );

        let parsed = serde_json::from_slice::<GraphQLResponse>(&body);

        if !status.is_success() {
            let errors = match parsed {
                Ok(response) if response.has_errors() => response.errors,
                _ => vec![GraphQLError::new(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    String::from_utf8_lossy(&body).trim()
                ))],
            };
            return Err(Error::Remote(RemoteError {
                status: Some(status.as_u16()),
                errors,
                retry_after: rate_limit.retry_after,
            }));
        }

        let response = parsed.map_err(|e| Error::Transport(TransportError::Body(e.to_string())))?;

        if response.has_errors() {
            tracing::debug!(
                target: targets::TRANSPORT,
                operation = %label,
                errors = response.errors.len(),
                partial_data = response.data.is_some(),
                "GraphQL errors in response"
            );
            return Err(Error::Remote(RemoteError {
                status: None,
                errors: response.errors,
                retry_after: rate_limit.retry_after,
            }));
        }

        match response.data {
            Some(data @ Value::Object(_)) => Ok(data),
            Some(other) => Err(Error::Mapping(anilist_core::MappingError::unexpected(
                "data object",
                &other,
            ))),
            None => Err(Error::Mapping(anilist_core::MappingError::missing(
                "response", "data",
            ))),
        }
    }
}

impl std::fmt::Debug for GraphQLClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("has_token", &self.has_token())
            .field("throttled", &self.inner.limiter.is_some())
            .finish()
    }
}
