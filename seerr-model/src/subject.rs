use std::fmt;

use crate::media_kind::MediaKind;

/// What kind of detail page a subject was selected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SubjectKind {
    Person,
    Studio,
    Network,
}

impl SubjectKind {
    /// Media kind of the catalog endpoint queried for this subject.
    /// People have no single catalog kind.
    pub fn catalog_kind(&self) -> Option<MediaKind> {
        match self {
            SubjectKind::Person => None,
            SubjectKind::Studio => Some(MediaKind::Movie),
            SubjectKind::Network => Some(MediaKind::Tv),
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectKind::Person => f.write_str("person"),
            SubjectKind::Studio => f.write_str("studio"),
            SubjectKind::Network => f.write_str("network"),
        }
    }
}

/// The person, studio, or network whose supplementary catalog is shown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Subject {
    pub kind: SubjectKind,
    /// Provider id. Studios reached from the host's own studio list carry
    /// only a display name and are resolved by name.
    pub id: Option<u64>,
    pub display_name: String,
}

impl Subject {
    pub fn new(
        kind: SubjectKind,
        id: Option<u64>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            id,
            display_name: display_name.into(),
        }
    }

    pub fn person(id: u64, display_name: impl Into<String>) -> Self {
        Self::new(SubjectKind::Person, Some(id), display_name)
    }

    pub fn studio_named(display_name: impl Into<String>) -> Self {
        Self::new(SubjectKind::Studio, None, display_name)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{} {} ({})", self.kind, self.display_name, id),
            None => write!(f, "{} {}", self.kind, self.display_name),
        }
    }
}
