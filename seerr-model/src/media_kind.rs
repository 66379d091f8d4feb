use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Canonical media kind tag carried by every discovery item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    /// Feature films, discovered per studio.
    Movie,
    /// Series, discovered per network.
    Tv,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            other => Err(ModelError::UnknownMediaKind(other.to_string())),
        }
    }
}

/// Identity of a discoverable item: `(media kind, provider id)`.
///
/// Two items with the same key are the same title regardless of which
/// credit list or catalog page they arrived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub kind: MediaKind,
    pub tmdb_id: u64,
}

impl ItemKey {
    pub const fn new(kind: MediaKind, tmdb_id: u64) -> Self {
        Self { kind, tmdb_id }
    }
}

impl Display for ItemKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.tmdb_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags_case_insensitively() {
        assert_eq!("Movie".parse::<MediaKind>(), Ok(MediaKind::Movie));
        assert_eq!(" tv ".parse::<MediaKind>(), Ok(MediaKind::Tv));
        assert!(matches!(
            "person".parse::<MediaKind>(),
            Err(ModelError::UnknownMediaKind(_))
        ));
    }

    #[test]
    fn key_display_matches_client_format() {
        let key = ItemKey::new(MediaKind::Tv, 1399);
        assert_eq!(key.to_string(), "tv-1399");
    }
}
