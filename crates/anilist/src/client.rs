//! The AniList client and its authentication state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anilist_core::logging::targets;
use anilist_core::{Operation, Pagination, Selection, mapper};
use anilist_net::{GraphQLClient, GraphQLClientBuilder, RateLimitInfo, Result};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::objects::User;

/// Builder for an [`AniClient`].
pub struct AniClientBuilder {
    transport: GraphQLClientBuilder,
    default_pagination: Pagination,
}

impl Default for AniClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AniClientBuilder {
    pub fn new() -> Self {
        Self {
            transport: GraphQLClient::builder(),
            default_pagination: Pagination::default(),
        }
    }

    /// Start from file-level settings. The configured token is not used;
    /// see [`AniClient::connect`].
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            transport: GraphQLClientBuilder::from_config(config.transport()),
            default_pagination: config.default_pagination(),
        }
    }

    /// Set the GraphQL endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.transport = self.transport.endpoint(endpoint);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.timeout(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport = self.transport.user_agent(user_agent);
        self
    }

    /// Throttle to at most `requests` per minute.
    pub fn requests_per_minute(mut self, requests: u32) -> Self {
        self.transport = self.transport.requests_per_minute(requests);
        self
    }

    /// Page size for searches called without pagination.
    pub fn default_per_page(mut self, per_page: u32) -> Self {
        self.default_pagination = Pagination::first(per_page);
        self
    }

    pub fn build(self) -> Result<AniClient> {
        Ok(AniClient {
            inner: Arc::new(AniClientInner {
                transport: self.transport.build()?,
                authenticated: AtomicBool::new(false),
                default_pagination: self.default_pagination,
            }),
        })
    }
}

struct AniClientInner {
    transport: GraphQLClient,
    authenticated: AtomicBool,
    default_pagination: Pagination,
}

/// A typed client for the AniList GraphQL API.
///
/// Clones share the transport and the authentication state. Calling
/// [`try_authenticate`](Self::try_authenticate) or
/// [`sign_out`](Self::sign_out) while other authenticated calls are in
/// flight is racy: those calls may go out with either token.
///
/// # Example
///
/// ```ignore
/// use anilist::{AniClient, MediaFilter, MediaType, Pagination};
///
/// let client = AniClient::new()?;
/// let media = client.get_media(1).await?;
///
/// let page = client
///     .search_media(
///         &MediaFilter::new().query("demon slayer").media_type(MediaType::Anime),
///         Some(Pagination::new(1, 5)),
///     )
///     .await?;
///
/// if client.try_authenticate(token).await {
///     client.toggle_media_favorite(media.id, MediaType::Anime).await?;
/// }
/// ```
#[derive(Clone)]
pub struct AniClient {
    inner: Arc<AniClientInner>,
}

impl AniClient {
    /// A client for the public endpoint with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> AniClientBuilder {
        AniClientBuilder::new()
    }

    /// Build a client from file-level settings without authenticating.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        AniClientBuilder::from_config(config).build()
    }

    /// Build a client from file-level settings and, when a token is
    /// configured, try to authenticate with it.
    ///
    /// A rejected token does not fail the call; check
    /// [`is_authenticated`](Self::is_authenticated).
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let client = Self::from_config(&config)?;
        if let Some(token) = config.token {
            client.try_authenticate(token).await;
        }
        Ok(client)
    }

    /// The GraphQL endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        self.inner.transport.endpoint()
    }

    /// Whether a token is attached to outgoing requests.
    pub fn has_token(&self) -> bool {
        self.inner.transport.has_token()
    }

    /// Rate limit information from the most recent response.
    pub fn rate_limit(&self) -> Option<RateLimitInfo> {
        self.inner.transport.rate_limit()
    }

    /// Pagination used by searches called without one.
    pub fn default_pagination(&self) -> Pagination {
        self.inner.default_pagination
    }

    /// Whether the last [`try_authenticate`](Self::try_authenticate)
    /// succeeded and its token is still attached.
    pub fn is_authenticated(&self) -> bool {
        self.inner.authenticated.load(Ordering::Acquire) && self.has_token()
    }

    /// Attach `token` and check it with a `Viewer` query.
    ///
    /// On success the token stays attached and the client is authenticated.
    /// On any failure the token is removed, the client is not
    /// authenticated, and `false` is returned; this never fails.
    pub async fn try_authenticate(&self, token: impl Into<String>) -> bool {
        let token = token.into();
        if token.trim().is_empty() {
            tracing::warn!(target: targets::CLIENT, "empty token, not authenticating");
            self.sign_out();
            return false;
        }

        self.inner.transport.set_token(Some(token));
        match self.get_authenticated_user().await {
            Ok(user) => {
                self.inner.authenticated.store(true, Ordering::Release);
                tracing::info!(
                    target: targets::CLIENT,
                    user_id = user.id,
                    user = %user.name,
                    "authenticated"
                );
                true
            }
            Err(err) => {
                self.sign_out();
                tracing::warn!(target: targets::CLIENT, error = %err, "authentication failed");
                false
            }
        }
    }

    /// Detach the token and drop the authenticated state.
    pub fn sign_out(&self) {
        self.inner.transport.set_token(None);
        self.inner.authenticated.store(false, Ordering::Release);
    }

    /// The user the attached token belongs to.
    pub async fn get_authenticated_user(&self) -> Result<User> {
        let operation = Operation::query(Selection::entity::<User>("Viewer"));
        let data = self.execute(&operation, true).await?;
        Ok(mapper::require_field(&data, "Viewer")?)
    }

    /// Send a composed operation and return its `data` object.
    ///
    /// This is the entry point for result types defined outside this crate.
    /// The token attached by [`try_authenticate`](Self::try_authenticate) is
    /// sent when present; with `requires_auth` and no token the call fails
    /// without sending.
    pub async fn execute_operation(&self, operation: &Operation, requires_auth: bool) -> Result<Value> {
        self.execute(operation, requires_auth).await
    }

    pub(crate) async fn execute(&self, operation: &Operation, requires_auth: bool) -> Result<Value> {
        self.inner
            .transport
            .execute_operation(operation, requires_auth)
            .await
    }
}

impl std::fmt::Debug for AniClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AniClient")
            .field("transport", &self.inner.transport)
            .field("authenticated", &self.is_authenticated())
            .field("default_pagination", &self.inner.default_pagination)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let client = AniClient::new().unwrap();
        assert!(!client.is_authenticated());
        assert!(!client.has_token());
        assert_eq!(client.default_pagination(), Pagination::new(1, 10));
        assert_eq!(client.endpoint(), "https://graphql.anilist.co/");
    }

    #[test]
    fn test_builder_page_size_is_clamped() {
        let client = AniClient::builder().default_per_page(500).build().unwrap();
        assert_eq!(client.default_pagination().per_page(), 50);
    }

    #[test]
    fn test_from_config_ignores_token() {
        let config = ClientConfig {
            token: Some("abc".into()),
            default_per_page: 20,
            ..Default::default()
        };
        let client = AniClient::from_config(&config).unwrap();
        assert!(!client.has_token());
        assert_eq!(client.default_pagination().per_page(), 20);
    }

    #[test]
    fn test_unverified_token_is_not_authenticated() {
        let client = AniClient::new().unwrap();
        client.inner.transport.set_token(Some("abc".into()));
        assert!(client.has_token());
        assert!(!client.is_authenticated());

        client.inner.authenticated.store(true, Ordering::Release);
        assert!(client.is_authenticated());
        client.sign_out();
        assert!(!client.has_token());
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected_locally() {
        let client = AniClient::builder()
            .endpoint("http://127.0.0.1:9/graphql")
            .build()
            .unwrap();
        assert!(!client.try_authenticate("   ").await);
        assert!(!client.has_token());
    }
}
