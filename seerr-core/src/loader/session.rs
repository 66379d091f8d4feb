use seerr_config::{LoaderSettings, LoaderTiming};
use seerr_model::{CatalogPage, DiscoveryItem, MediaKind, Subject};

use crate::aggregate::AcceptedItems;
use crate::filter::{ExclusionPolicy, catalog_display_order};
use crate::gateway::SubjectMatch;

use super::throttle::FetchThrottle;
use super::view::CatalogView;

pub type TimerId = u64;

/// Which upstream catalogs a session pages through.
///
/// A subject known only by name can match a network and a studio at the
/// same time; each page then combines page N of both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogTarget {
    pub network: Option<u64>,
    pub studio: Option<u64>,
}

impl CatalogTarget {
    pub fn network(id: u64) -> Self {
        Self {
            network: Some(id),
            studio: None,
        }
    }

    pub fn studio(id: u64) -> Self {
        Self {
            network: None,
            studio: Some(id),
        }
    }

    /// Series catalogs belong to networks, movie catalogs to studios.
    pub fn for_kind(kind: MediaKind, id: u64) -> Self {
        match kind {
            MediaKind::Tv => Self::network(id),
            MediaKind::Movie => Self::studio(id),
        }
    }

    /// Every side of a name lookup that matched; `None` when neither did.
    pub fn from_match(matched: &SubjectMatch) -> Option<Self> {
        let target = Self {
            network: matched.network.as_ref().map(|network| network.id),
            studio: matched.studio.as_ref().map(|studio| studio.id),
        };
        (!target.is_empty()).then_some(target)
    }

    pub fn is_empty(&self) -> bool {
        self.network.is_none() && self.studio.is_none()
    }
}

/// Incremental-loading state for one subject.
///
/// Owned by [`CatalogLoader`](super::CatalogLoader) and replaced wholesale
/// when a new subject is selected.
#[derive(Debug)]
pub struct CatalogSession {
    generation: u64,
    subject: Subject,
    settings: LoaderSettings,
    target: Option<CatalogTarget>,
    current_page: u32,
    total_pages: u32,
    accepted: AcceptedItems,
    pub(super) in_flight: bool,
    pub(super) trigger_visible: bool,
    pub(super) throttle: FetchThrottle,
    pub(super) pending_retry: Option<TimerId>,
}

impl CatalogSession {
    pub fn new(
        generation: u64,
        subject: Subject,
        settings: LoaderSettings,
        timing: &LoaderTiming,
    ) -> Self {
        Self {
            generation,
            subject,
            settings,
            target: None,
            current_page: 0,
            total_pages: 1,
            accepted: AcceptedItems::new(),
            in_flight: false,
            trigger_visible: false,
            throttle: FetchThrottle::new(timing),
            pending_retry: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    pub fn target(&self) -> Option<CatalogTarget> {
        self.target
    }

    pub(super) fn set_target(&mut self, target: CatalogTarget) {
        self.target = Some(target);
    }

    /// Pages merged so far; `0` before the first page arrives.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn next_page(&self) -> u32 {
        self.current_page + 1
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn pending_retry(&self) -> Option<TimerId> {
        self.pending_retry
    }

    /// Accepted items in arrival order.
    pub fn accepted(&self) -> &[DiscoveryItem] {
        self.accepted.as_slice()
    }

    /// Merge the response for `next_page()`. Novel keys are appended in
    /// page order and the page counter advances even when nothing was new.
    pub(super) fn merge_page(&mut self, page: CatalogPage) -> usize {
        let added = self.accepted.extend_novel(page.items);
        self.current_page = self.next_page();
        self.total_pages = page.total_pages.max(1).max(self.current_page);
        added
    }

    pub fn view(&self) -> CatalogView {
        CatalogView {
            subject_name: self.subject.display_name.clone(),
            ordered_items: catalog_display_order(
                self.accepted.as_slice(),
                ExclusionPolicy::from(&self.settings),
            ),
            has_more: self.has_more() && self.settings.enable_infinite_scroll,
        }
    }
}
