//! Upstream record shapes as returned by the recommendation service.
//!
//! These mirror the wire format loosely: every field is optional so a single
//! malformed entry never fails a whole page. The normalizer turns them into
//! [`DiscoveryItem`](crate::DiscoveryItem)s.

use serde::Deserialize;

use crate::item::MediaInfo;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub id: Option<u64>,
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<RawGenre>,
    pub media_info: Option<MediaInfo>,
    pub character: Option<String>,
    pub department: Option<String>,
    pub job: Option<String>,
}

/// Genres arrive either as bare names or as `{id, name}` objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawGenre {
    Name(String),
    Object {
        id: Option<u32>,
        name: Option<String>,
    },
}

impl RawGenre {
    pub fn name(&self) -> Option<&str> {
        match self {
            RawGenre::Name(name) => Some(name),
            RawGenre::Object { name, .. } => name.as_deref(),
        }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            RawGenre::Name(_) => None,
            RawGenre::Object { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalogPage {
    pub page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u64>,
    #[serde(default)]
    pub results: Vec<RawItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPersonCredits {
    #[serde(default)]
    pub cast: Vec<RawItem>,
    #[serde(default)]
    pub crew: Vec<RawItem>,
}
