//! # Seerr Core
//!
//! Discovery engine for titles that are *not* in the local library: a
//! person's filmography, a studio's movies, or a network's shows, pulled
//! from a Jellyseerr/Overseerr instance.
//!
//! ## Overview
//!
//! - **Gateway**: [`gateway::UpstreamGateway`] and its reqwest-backed
//!   [`gateway::JellyseerrGateway`]. Failures surface as absence.
//! - **Normalization**: raw upstream records become
//!   [`seerr_model::DiscoveryItem`]s with a fixed media kind.
//! - **Aggregation**: identity-key dedup, credit merge and catalog merge.
//! - **Filtering**: talk/news exclusion and the completeness partition.
//! - **Incremental loading**: [`loader::CatalogLoader`] pages through a
//!   studio or network catalog with an adaptive throttle, driven by
//!   [`loader::CatalogLoaderHandle`].
//! - **Service**: [`service::DiscoveryService`] answers one-shot requests
//!   for the HTTP API.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use seerr_config::Config;
//! use seerr_core::{DiscoveryService, JellyseerrGateway};
//!
//! async fn filmography(config: Config) -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = JellyseerrGateway::new(&config.upstream)?;
//!     let service = DiscoveryService::new(Arc::new(gateway), Arc::new(config));
//!
//!     let found = service.person_filmography(31).await?;
//!     for item in &found.credits {
//!         println!("{} ({:?})", item.display_title(), item.release_year());
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod loader;
pub mod navigation;
pub mod networks;
pub mod normalize;
pub mod readiness;
pub mod service;

pub use error::{DiscoveryError, Result};
pub use filter::ExclusionPolicy;
pub use gateway::{JellyseerrGateway, UpstreamGateway};
pub use loader::{CatalogLoader, CatalogLoaderHandle, CatalogView, PresentationSink};
pub use navigation::{NavigationController, NavigationOutcome, SubjectSelected};
pub use readiness::{ReadinessPolicy, wait_until_ready};
pub use service::{
    CatalogDiscovery, DiscoveryService, HealthReport, PersonDiscovery,
};
