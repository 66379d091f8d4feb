use std::sync::Mutex;

use seerr_model::DiscoveryItem;
use tokio::sync::mpsc;

/// Snapshot handed to the presentation layer whenever the visible set
/// changes. An empty `ordered_items` means the section should be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub subject_name: String,
    pub ordered_items: Vec<DiscoveryItem>,
    pub has_more: bool,
}

impl CatalogView {
    pub fn empty(subject_name: impl Into<String>) -> Self {
        Self {
            subject_name: subject_name.into(),
            ordered_items: Vec::new(),
            has_more: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_items.is_empty()
    }
}

/// One-way outlet from the loader to whatever renders it.
///
/// The renderer wires its own viewport mechanism to the trigger marker while
/// `set_trigger_observed(true)` is in effect and reports back through the
/// loader's `trigger_visible`/`trigger_hidden` entry points.
pub trait PresentationSink: Send + Sync {
    fn publish(&self, view: CatalogView);

    fn set_trigger_observed(&self, observed: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresentationUpdate {
    View(CatalogView),
    TriggerObserved(bool),
}

/// Forwards every update into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<PresentationUpdate>,
}

impl ChannelSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PresentationUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PresentationSink for ChannelSink {
    fn publish(&self, view: CatalogView) {
        // A dropped receiver just means nobody is rendering any more.
        let _ = self.tx.send(PresentationUpdate::View(view));
    }

    fn set_trigger_observed(&self, observed: bool) {
        let _ = self.tx.send(PresentationUpdate::TriggerObserved(observed));
    }
}

/// Keeps every update in memory; handy for embedding and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    updates: Mutex<Vec<PresentationUpdate>>,
}

impl RecordingSink {
    pub fn updates(&self) -> Vec<PresentationUpdate> {
        self.updates
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn views(&self) -> Vec<CatalogView> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                PresentationUpdate::View(view) => Some(view),
                PresentationUpdate::TriggerObserved(_) => None,
            })
            .collect()
    }

    pub fn last_view(&self) -> Option<CatalogView> {
        self.views().pop()
    }

    fn push(&self, update: PresentationUpdate) {
        if let Ok(mut guard) = self.updates.lock() {
            guard.push(update);
        }
    }
}

impl PresentationSink for RecordingSink {
    fn publish(&self, view: CatalogView) {
        self.push(PresentationUpdate::View(view));
    }

    fn set_trigger_observed(&self, observed: bool) {
        self.push(PresentationUpdate::TriggerObserved(observed));
    }
}
