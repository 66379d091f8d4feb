//! Request/response discovery operations backing the HTTP API.

use std::sync::Arc;

use seerr_config::Config;
use seerr_model::{
    CatalogPage, DiscoveryItem, MediaKind, PersonDetails, StudioDetails,
};
use tracing::{info, warn};

use crate::aggregate::{merge_catalogs, merge_credits, rank_by_popularity};
use crate::error::{DiscoveryError, Result};
use crate::filter::ExclusionPolicy;
use crate::gateway::UpstreamGateway;
use crate::normalize::{normalize_credits, normalize_page};

/// A person and their filmography.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonDiscovery {
    pub person: PersonDetails,
    /// Merged, ranked credit list (cast first, crew for non-performers).
    pub credits: Vec<DiscoveryItem>,
    pub cast: Vec<DiscoveryItem>,
    pub crew: Vec<DiscoveryItem>,
    pub total_results: usize,
}

/// One page of a studio, network, or merged name-search catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDiscovery {
    pub studio: Option<StudioDetails>,
    pub items: Vec<DiscoveryItem>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: &'static str,
    pub enabled: bool,
    pub upstream_configured: bool,
    pub upstream_connected: bool,
    pub error_message: Option<String>,
    pub version: &'static str,
    pub exclude_talk_shows: bool,
    pub debug_mode: bool,
}

#[derive(Clone)]
pub struct DiscoveryService {
    gateway: Arc<dyn UpstreamGateway>,
    config: Arc<Config>,
}

impl std::fmt::Debug for DiscoveryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryService")
            .field("enabled", &self.config.discovery.enabled)
            .field("upstream_configured", &self.gateway.is_configured())
            .finish()
    }
}

impl DiscoveryService {
    pub fn new(gateway: Arc<dyn UpstreamGateway>, config: Arc<Config>) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn gateway(&self) -> &Arc<dyn UpstreamGateway> {
        &self.gateway
    }

    pub async fn person_filmography(
        &self,
        person_id: u64,
    ) -> Result<PersonDiscovery> {
        self.ensure_enabled()?;
        self.ensure_configured()?;
        info!(person_id, "fetching filmography");

        let (person, credits) = tokio::join!(
            self.gateway.fetch_person(person_id),
            self.gateway.fetch_person_credits(person_id),
        );
        let Some(person) = person else {
            return Err(DiscoveryError::NoSubjectMatch(format!(
                "person {person_id}"
            )));
        };

        let credits = credits.map(normalize_credits).unwrap_or_default();
        let mut cast = self.visible(credits.cast.clone());
        let mut crew = self.visible(credits.crew.clone());
        rank_by_popularity(&mut cast);
        rank_by_popularity(&mut crew);

        let merged = merge_credits(
            credits,
            person.is_performer(),
            self.config.discovery.max_results,
        );
        let credits = self.visible(merged);

        Ok(PersonDiscovery {
            person,
            total_results: credits.len(),
            credits,
            cast,
            crew,
        })
    }

    pub async fn search_person(&self, name: &str) -> Result<PersonDiscovery> {
        self.ensure_enabled()?;
        self.ensure_configured()?;
        info!(name, "searching person");

        let hit = self
            .gateway
            .search_person(name)
            .await
            .ok_or_else(|| {
                DiscoveryError::NoSubjectMatch(format!("person named {name:?}"))
            })?;
        self.person_filmography(hit.id).await
    }

    pub async fn studio_catalog(
        &self,
        studio_id: u64,
        page: u32,
    ) -> Result<CatalogDiscovery> {
        self.ensure_enabled()?;
        self.ensure_configured()?;
        let page = page.max(1);
        info!(studio_id, page, "fetching studio catalog");

        let (studio, catalog) = tokio::join!(
            self.gateway.fetch_studio(studio_id),
            self.gateway
                .fetch_catalog_page(studio_id, MediaKind::Movie, page),
        );
        if studio.is_none() && catalog.is_none() {
            return Err(DiscoveryError::NoSubjectMatch(format!(
                "studio {studio_id}"
            )));
        }

        let catalog = catalog
            .map(|raw| normalize_page(raw, MediaKind::Movie, page))
            .unwrap_or_else(|| CatalogPage::empty(page));
        Ok(self.catalog_response(studio, catalog))
    }

    pub async fn network_catalog(
        &self,
        network_id: u64,
        page: u32,
    ) -> Result<CatalogDiscovery> {
        self.ensure_enabled()?;
        self.ensure_configured()?;
        let page = page.max(1);
        info!(network_id, page, "fetching network catalog");

        let catalog = self
            .gateway
            .fetch_catalog_page(network_id, MediaKind::Tv, page)
            .await
            .ok_or_else(|| {
                DiscoveryError::NoSubjectMatch(format!("network {network_id}"))
            })?;
        let catalog = normalize_page(catalog, MediaKind::Tv, page);
        Ok(self.catalog_response(None, catalog))
    }

    /// Catalog for a studio or network known only by name. Network and
    /// studio results are merged when the name matches both.
    pub async fn search_catalog(
        &self,
        name: &str,
        page: u32,
    ) -> Result<CatalogDiscovery> {
        self.ensure_enabled()?;
        self.ensure_configured()?;
        let page = page.max(1);

        let matched = self.gateway.resolve_subject_by_name(name).await;
        if matched.is_empty() {
            return Err(DiscoveryError::NoSubjectMatch(format!(
                "studio or network named {name:?}"
            )));
        }

        let fetch = |target: Option<(u64, MediaKind)>| async move {
            let (id, kind) = target?;
            let raw = self.gateway.fetch_catalog_page(id, kind, page).await?;
            Some(normalize_page(raw, kind, page))
        };
        let (network_page, studio_page) = tokio::join!(
            fetch(matched.network.as_ref().map(|n| (n.id, MediaKind::Tv))),
            fetch(matched.studio.as_ref().map(|s| (s.id, MediaKind::Movie))),
        );

        let studio = match (&matched.network, &matched.studio) {
            (Some(network), _) => Some(StudioDetails::pseudo(network.id, name)),
            (None, Some(studio)) => {
                Some(StudioDetails::pseudo(studio.id, studio.name.clone()))
            }
            (None, None) => None,
        };

        let merged = match merge_catalogs(network_page, studio_page) {
            Some(merged) => merged,
            None => {
                warn!(name, "matched subject but no catalog page was returned");
                CatalogPage::empty(page)
            }
        };

        let items = self.visible(merged.items);
        let total_results = if merged.total_results > 0 {
            merged.total_results
        } else {
            items.len() as u64
        };
        Ok(CatalogDiscovery {
            studio,
            items,
            page,
            total_pages: merged.total_pages.max(1),
            total_results,
        })
    }

    /// Never fails; problems are reported in the body.
    pub async fn health(&self) -> HealthReport {
        let configured = self.gateway.is_configured();
        let (connected, error_message) = if configured {
            match self.gateway.test_connection().await {
                Ok(()) => (true, None),
                Err(err) => {
                    let err = DiscoveryError::from(err);
                    warn!(error = %err, "health check failed");
                    (false, Some(err.to_string()))
                }
            }
        } else {
            (false, None)
        };

        HealthReport {
            status: if connected { "ok" } else { "error" },
            enabled: self.config.discovery.enabled,
            upstream_configured: configured,
            upstream_connected: connected,
            error_message,
            version: env!("CARGO_PKG_VERSION"),
            exclude_talk_shows: self.config.discovery.exclude_talk_shows,
            debug_mode: self.config.discovery.debug_mode,
        }
    }

    fn ensure_enabled(&self) -> Result<()> {
        if self.config.discovery.enabled {
            Ok(())
        } else {
            Err(DiscoveryError::Disabled)
        }
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.gateway.is_configured() {
            Ok(())
        } else {
            Err(DiscoveryError::ConfigurationMissing)
        }
    }

    fn catalog_response(
        &self,
        studio: Option<StudioDetails>,
        catalog: CatalogPage,
    ) -> CatalogDiscovery {
        let items = self.visible(catalog.items);
        CatalogDiscovery {
            studio,
            items,
            page: catalog.page.max(1),
            total_pages: catalog.total_pages.max(1),
            total_results: catalog.total_results,
        }
    }

    /// Exclusion policy plus, when configured, hiding titles already in the
    /// library.
    fn visible(&self, items: Vec<DiscoveryItem>) -> Vec<DiscoveryItem> {
        let discovery = &self.config.discovery;
        let policy = ExclusionPolicy {
            exclude_talk_shows: discovery.exclude_talk_shows,
            strict_titles: discovery.strict_title_filter,
        };
        let mut items = policy.apply(items);
        if !discovery.include_library_items {
            items.retain(|item| !item.is_available());
        }
        items
    }
}
