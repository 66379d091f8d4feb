//! Core data model definitions shared across Seerr discovery crates.
#![allow(missing_docs)]

pub mod details;
pub mod error;
pub mod image;
pub mod item;
pub mod media_kind;
pub mod page;
#[cfg(feature = "serde")]
pub mod raw;
pub mod subject;

// Intentionally curated re-exports for downstream consumers.
pub use details::{PersonDetails, StudioDetails};
pub use error::{ModelError, Result as ModelResult};
pub use image::{BackdropSize, PosterSize};
pub use item::{DiscoveryItem, MediaInfo, MediaStatus, RequestInfo};
pub use media_kind::{ItemKey, MediaKind};
pub use page::{CatalogPage, PersonCreditSet};
#[cfg(feature = "serde")]
pub use raw::{RawCatalogPage, RawGenre, RawItem, RawPersonCredits};
pub use subject::{Subject, SubjectKind};
