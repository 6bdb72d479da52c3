//! A typed client for the AniList GraphQL API.
//!
//! This is the umbrella crate: it re-exports the selection and mapping
//! machinery from `anilist-core`, the transport from `anilist-net`, and adds
//! the AniList objects and [`AniClient`].
//!
//! # Example
//!
//! ```no_run
//! use anilist::{AniClient, MediaFilter, MediaType, Pagination};
//!
//! # async fn run() -> anilist::Result<()> {
//! let client = AniClient::new()?;
//!
//! let page = client
//!     .search_media(
//!         &MediaFilter::new().query("demon slayer").media_type(MediaType::Anime),
//!         Some(Pagination::new(1, 5)),
//!     )
//!     .await?;
//! for media in &page {
//!     println!("{:?}", media.title.as_ref().and_then(|t| t.preferred()));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Custom result types derive [`Entity`](derive@Entity) and are requested
//! with [`Selection::entity`]:
//!
//! ```ignore
//! #[derive(Debug, anilist::Entity)]
//! #[entity(name = "Media")]
//! struct Episodes {
//!     id: i32,
//!     episodes: Option<i32>,
//! }
//!
//! let operation = Operation::query(Selection::entity::<Episodes>("Media").argument("id", 1));
//! let data = client.execute_operation(&operation, false).await?;
//! let episodes: Option<Episodes> = anilist::mapper::map_field(&data, "Media")?;
//! ```

mod client;
mod config;
mod input;
mod mutations;
pub mod objects;
mod queries;

pub use client::{AniClient, AniClientBuilder};
pub use config::ClientConfig;
pub use input::{FavoriteKind, MediaEntryMutation, MediaFilter};
pub use objects::*;

pub use anilist_core::{
    ArgValue, Argument, Entity, EntityDescriptor, FieldDescriptor, FieldType, GqlEnum,
    MappingError, Operation, OperationType, Page, PageInfo, Pagination, Selection, Shape,
    logging, mapper,
};
pub use anilist_macros::{Entity, GqlEnum};
pub use anilist_net::{
    Error, GraphQLClient, GraphQLError, GraphQLRequest, RateLimitInfo, RemoteError, Result,
    TransportConfig, TransportError,
};
