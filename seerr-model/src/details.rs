/// Person (actor/crew) details.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PersonDetails {
    pub id: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub biography: Option<String>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
}

impl PersonDetails {
    /// Performers only get their cast credits; crew credits would repeat
    /// the same titles.
    pub fn is_performer(&self) -> bool {
        self.known_for_department.as_deref() == Some("Acting")
    }
}

/// Studio/company details. Networks are reported through the same shape.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StudioDetails {
    pub id: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub description: Option<String>,
    pub headquarters: Option<String>,
    pub homepage: Option<String>,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
    pub parent_company: Option<Box<StudioDetails>>,
}

impl StudioDetails {
    /// Stand-in record for a network matched by name only.
    pub fn pseudo(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }
}
