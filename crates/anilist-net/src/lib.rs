//! GraphQL-over-HTTP transport for the AniList client.
//!
//! This crate sends composed operations to the GraphQL endpoint and hands
//! back the decoded `data` document:
//!
//! - **Client**: [`GraphQLClient`], configured through
//!   [`GraphQLClientBuilder`] / [`TransportConfig`]
//! - **Requests**: [`GraphQLRequest`], built from an
//!   [`anilist_core::Operation`] or a raw document
//! - **Responses**: [`GraphQLResponse`] and [`GraphQLError`]
//! - **Rate limits**: [`RateLimitInfo`] parsed from response headers and an
//!   optional client-side [`RateLimiter`]
//! - **Errors**: the workspace-wide [`Error`]
//!
//! # Example
//!
//! ```ignore
//! use anilist_net::GraphQLClient;
//!
//! let client = GraphQLClient::builder().build()?;
//! let data = client
//!     .execute_operation(&operation, false)
//!     .await?;
//! ```

mod client;
mod error;
mod rate_limit;
mod request;
mod response;

pub use client::{DEFAULT_ENDPOINT, GraphQLClient, GraphQLClientBuilder, TransportConfig};
pub use error::{Error, RemoteError, Result, TransportError};
pub use rate_limit::{RateLimitInfo, RateLimiter};
pub use request::GraphQLRequest;
pub use response::{GraphQLError, GraphQLLocation, GraphQLResponse, PathSegment};
