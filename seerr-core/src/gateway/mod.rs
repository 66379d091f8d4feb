//! Boundary to the recommendation proxy.
//!
//! Every fetch reports failure as absence. The cause is logged by the
//! implementation and never reaches the aggregation code.

mod jellyseerr;

pub use jellyseerr::JellyseerrGateway;

use async_trait::async_trait;
use seerr_model::{
    MediaKind, PersonDetails, RawCatalogPage, RawPersonCredits, StudioDetails,
};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid upstream base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("no upstream URL configured")]
    NotConfigured,
}

/// A studio or network found by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedMatch {
    pub id: u64,
    pub name: String,
}

/// Outcome of resolving a display name. Either side, both, or neither may
/// be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectMatch {
    pub studio: Option<NamedMatch>,
    pub network: Option<NamedMatch>,
}

impl SubjectMatch {
    pub fn is_empty(&self) -> bool {
        self.studio.is_none() && self.network.is_none()
    }
}

/// First person hit of a free-text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonSearchHit {
    pub id: u64,
    pub name: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamGateway: Send + Sync {
    /// Whether a usable upstream endpoint is configured at all.
    fn is_configured(&self) -> bool;

    /// Connectivity probe.
    async fn test_connection(&self) -> Result<(), GatewayError>;

    async fn fetch_person(&self, person_id: u64) -> Option<PersonDetails>;

    async fn fetch_person_credits(
        &self,
        person_id: u64,
    ) -> Option<RawPersonCredits>;

    async fn fetch_studio(&self, studio_id: u64) -> Option<StudioDetails>;

    /// One page of a studio (movie) or network (tv) catalog. `page` is
    /// 1-based.
    async fn fetch_catalog_page(
        &self,
        subject_id: u64,
        kind: MediaKind,
        page: u32,
    ) -> Option<RawCatalogPage>;

    async fn search_person(&self, name: &str) -> Option<PersonSearchHit>;

    async fn resolve_subject_by_name(&self, name: &str) -> SubjectMatch;
}
