//! Response bodies for the discovery API.
//!
//! Envelope fields are PascalCase; embedded items and details keep their
//! own camelCase shape.

use seerr_config::Config;
use seerr_core::{CatalogDiscovery, HealthReport, PersonDiscovery};
use seerr_model::{DiscoveryItem, PersonDetails, StudioDetails};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonDiscoveryResponse {
    pub person: PersonDetails,
    pub credits: Vec<DiscoveryItem>,
    pub cast: Vec<DiscoveryItem>,
    pub crew: Vec<DiscoveryItem>,
    pub total_results: usize,
}

impl From<PersonDiscovery> for PersonDiscoveryResponse {
    fn from(found: PersonDiscovery) -> Self {
        Self {
            person: found.person,
            credits: found.credits,
            cast: found.cast,
            crew: found.crew,
            total_results: found.total_results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudioDiscoveryResponse {
    pub studio: Option<StudioDetails>,
    pub items: Vec<DiscoveryItem>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

impl From<CatalogDiscovery> for StudioDiscoveryResponse {
    fn from(catalog: CatalogDiscovery) -> Self {
        Self {
            studio: catalog.studio,
            items: catalog.items,
            page: catalog.page,
            total_pages: catalog.total_pages,
            total_results: catalog.total_results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub enabled: bool,
    pub upstream_configured: bool,
    pub upstream_connected: bool,
    pub error_message: Option<String>,
    pub version: &'static str,
    pub exclude_talk_shows: bool,
    pub debug_mode: bool,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            status: report.status,
            enabled: report.enabled,
            upstream_configured: report.upstream_configured,
            upstream_connected: report.upstream_connected,
            error_message: report.error_message,
            version: report.version,
            exclude_talk_shows: report.exclude_talk_shows,
            debug_mode: report.debug_mode,
        }
    }
}

/// Settings the browser-side engine needs at startup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientConfigResponse {
    pub enabled: bool,
    pub upstream_url: Option<String>,
    pub exclude_talk_shows: bool,
    pub strict_title_filter: bool,
    pub debug_mode: bool,
    pub enable_infinite_scroll: bool,
    pub max_results: usize,
    pub show_person_discovery: bool,
    pub show_cast_credits: bool,
    pub show_crew_credits: bool,
    pub show_studio_discovery: bool,
    pub show_media_status: bool,
    pub show_media_type_badge: bool,
    pub show_ratings: bool,
    pub show_year: bool,
    pub show_overview_on_hover: bool,
    pub show_collection_badge: bool,
    pub show_role_name: bool,
}

impl From<&Config> for ClientConfigResponse {
    fn from(config: &Config) -> Self {
        let discovery = &config.discovery;
        let display = &config.display;
        Self {
            enabled: discovery.enabled,
            upstream_url: config.upstream.url.clone(),
            exclude_talk_shows: discovery.exclude_talk_shows,
            strict_title_filter: discovery.strict_title_filter,
            debug_mode: discovery.debug_mode,
            enable_infinite_scroll: discovery.enable_infinite_scroll,
            max_results: discovery.max_results,
            show_person_discovery: display.show_person_discovery,
            show_cast_credits: display.show_cast_credits,
            show_crew_credits: display.show_crew_credits,
            show_studio_discovery: display.show_studio_discovery,
            show_media_status: display.show_media_status,
            show_media_type_badge: display.show_media_type_badge,
            show_ratings: display.show_ratings,
            show_year: display.show_year,
            show_overview_on_hover: display.show_overview_on_hover,
            show_collection_badge: display.show_collection_badge,
            show_role_name: display.show_role_name,
        }
    }
}

/// `?page=`; absent or below 1 means the first page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameQuery {
    pub name: String,
    pub page: Option<i64>,
}

/// Clamp a client-supplied page number into `1..=u32::MAX`.
pub fn clamp_page(page: Option<i64>) -> u32 {
    let page = page.unwrap_or(1).max(1);
    u32::try_from(page).unwrap_or(u32::MAX)
}
