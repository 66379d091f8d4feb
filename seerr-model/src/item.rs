use chrono::{Datelike, NaiveDate};

use crate::image::PosterSize;
use crate::media_kind::{ItemKey, MediaKind};

const UNKNOWN_TITLE: &str = "Unknown";

/// Availability status reported by the recommendation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaStatus {
    Unknown = 1,
    Pending = 2,
    Processing = 3,
    PartiallyAvailable = 4,
    Available = 5,
}

impl MediaStatus {
    /// Unrecognized codes collapse to [`MediaStatus::Unknown`].
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => MediaStatus::Pending,
            3 => MediaStatus::Processing,
            4 => MediaStatus::PartiallyAvailable,
            5 => MediaStatus::Available,
            _ => MediaStatus::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaStatus::Unknown => "Unknown",
            MediaStatus::Pending => "Pending",
            MediaStatus::Processing => "Processing",
            MediaStatus::PartiallyAvailable => "Partially Available",
            MediaStatus::Available => "Available",
        }
    }
}

/// A request record linked to an item's availability entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestInfo {
    pub id: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MediaInfo {
    pub id: Option<u64>,
    pub tmdb_id: Option<u64>,
    /// Raw status code, `1..=5`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requests: Vec<RequestInfo>,
}

impl MediaInfo {
    pub fn status(&self) -> MediaStatus {
        MediaStatus::from_code(self.status)
    }

    pub fn is_available(&self) -> bool {
        self.status == 5
    }

    pub fn is_requested(&self) -> bool {
        (2..=4).contains(&self.status)
    }
}

/// A normalized catalog entry.
///
/// Built once by the normalizer from a single upstream record. `media_type`
/// is fixed at that point and, together with `tmdb_id`, forms the item's
/// [`ItemKey`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DiscoveryItem {
    #[cfg_attr(feature = "serde", serde(rename = "id"))]
    pub tmdb_id: u64,
    pub media_type: MediaKind,
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
    #[cfg_attr(feature = "serde", serde(default))]
    pub genre_ids: Vec<u32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub genre_names: Vec<String>,
    pub media_info: Option<MediaInfo>,
    /// Character played, for cast credits.
    pub character: Option<String>,
    /// Department, for crew credits (e.g. "Directing").
    pub department: Option<String>,
    /// Job title, for crew credits (e.g. "Director").
    pub job: Option<String>,
}

impl DiscoveryItem {
    /// Minimal item with only identity populated.
    pub fn new(media_type: MediaKind, tmdb_id: u64) -> Self {
        Self {
            tmdb_id,
            media_type,
            title: None,
            name: None,
            original_title: None,
            original_name: None,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            first_air_date: None,
            vote_average: None,
            vote_count: None,
            popularity: None,
            genre_ids: Vec::new(),
            genre_names: Vec::new(),
            media_info: None,
            character: None,
            department: None,
            job: None,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.media_type, self.tmdb_id)
    }

    /// Title in priority order: title, name, original title, original name.
    pub fn display_title(&self) -> &str {
        [
            &self.title,
            &self.name,
            &self.original_title,
            &self.original_name,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_TITLE)
    }

    /// Release date for movies, first-air date for series.
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.first_air_date.as_deref().filter(|d| !d.is_empty()))
    }

    pub fn release_year(&self) -> Option<i32> {
        let date = self.date()?;
        if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            return Some(parsed.year());
        }
        date.split('-').next().and_then(|year| year.parse().ok())
    }

    pub fn has_poster(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Complete items carry both a poster and a release/air date.
    pub fn is_complete(&self) -> bool {
        self.has_poster() && self.date().is_some()
    }

    pub fn popularity_or_zero(&self) -> f64 {
        self.popularity.filter(|p| p.is_finite()).unwrap_or(0.0)
    }

    pub fn vote_count_or_zero(&self) -> u64 {
        self.vote_count.unwrap_or(0)
    }

    pub fn is_available(&self) -> bool {
        self.media_info.as_ref().is_some_and(MediaInfo::is_available)
    }

    pub fn is_requested(&self) -> bool {
        self.media_info.as_ref().is_some_and(MediaInfo::is_requested)
    }

    pub fn poster_url(&self, size: PosterSize) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|path| size.url_for(path))
    }
}
