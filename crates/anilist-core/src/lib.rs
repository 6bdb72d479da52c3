//! Core building blocks for the AniList client.
//!
//! This crate turns typed Rust structs into GraphQL selection sets and maps
//! GraphQL responses back onto those structs:
//!
//! - **Descriptors**: every remote type has a static [`EntityDescriptor`]
//!   listing its fields, usually generated by `#[derive(Entity)]`
//! - **Selections**: [`Selection`] trees, built by hand or derived from a
//!   descriptor with [`selections_for`]
//! - **Composition**: [`Operation`] renders a selection tree into a query or
//!   mutation string
//! - **Mapping**: [`mapper::map`] converts a JSON node into a typed value,
//!   keeping absent nullable fields distinct from zero values
//!
//! # Example
//!
//! ```ignore
//! use anilist_core::{Operation, Selection};
//!
//! let operation = Operation::query(
//!     Selection::entity::<Media>("Media").argument("id", 1),
//! );
//!
//! // query { Media(id: 1) { id title { romaji english } ... } }
//! println!("{}", operation.render());
//!
//! // Later, with the decoded `data` object:
//! let media: Option<Media> = anilist_core::mapper::map_field(&data, "Media")?;
//! ```

// Lets generated `::anilist_core::...` paths resolve inside this crate's own tests.
extern crate self as anilist_core;

pub mod argument;
pub mod compose;
pub mod descriptor;
mod error;
pub mod logging;
pub mod mapper;
pub mod page;
pub mod selection;

pub use argument::{ArgValue, Argument};
pub use compose::{Operation, OperationType, VariableDefinition};
pub use descriptor::{Entity, EntityDescriptor, FieldDescriptor, FieldType, GqlEnum, Shape};
pub use error::{DescriptorError, MappingError};
pub use mapper::ObjectNode;
pub use page::{DEFAULT_PER_PAGE, MAX_PER_PAGE, Page, PageInfo, Pagination};
pub use selection::{Selection, selections_for};

// Re-exported for code generated by `anilist-macros`.
pub use serde_json;
