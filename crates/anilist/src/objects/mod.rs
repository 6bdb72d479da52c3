//! Typed mirrors of the remote AniList objects.
//!
//! Every struct derives [`Entity`](anilist_core::Entity), so its default
//! selection and its response mapping come from the same static descriptor.

mod character;
mod common;
mod entry;
mod enums;
mod media;
mod staff;
mod studio;
mod user;

pub use character::Character;
pub use common::{FuzzyDate, Image, Name};
pub use entry::{Deleted, EntryMedia, MediaEntry, MediaListEntry};
pub use enums::{
    MediaEntryStatus, MediaFormat, MediaSeason, MediaSort, MediaSource, MediaStatus, MediaType,
};
pub use media::{Media, MediaCoverImage, MediaTitle};
pub use staff::Staff;
pub use studio::Studio;
pub use user::User;
