use std::sync::Arc;

use seerr_config::{LoaderSettings, LoaderTiming};
use seerr_model::{CatalogPage, MediaKind, Subject};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::aggregate::merge_catalogs;
use crate::gateway::UpstreamGateway;
use crate::normalize::normalize_page;

use super::session::{CatalogTarget, TimerId};
use super::state::{CatalogLoader, LoaderEffect, LoaderEvent};
use super::view::PresentationSink;

/// Handle to a running catalog loader task.
///
/// Dropping the handle stops the task and aborts any fetch or timer it
/// still owns.
#[derive(Debug)]
pub struct CatalogLoaderHandle {
    events: mpsc::UnboundedSender<LoaderEvent>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CatalogLoaderHandle {
    /// Start the loader on the current tokio runtime.
    pub fn spawn(
        gateway: Arc<dyn UpstreamGateway>,
        sink: Arc<dyn PresentationSink>,
        timing: LoaderTiming,
    ) -> Self {
        let (events, rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let driver = Driver {
            machine: CatalogLoader::new(timing),
            gateway,
            sink,
            events: events.clone(),
            fetch: None,
            retry: None,
        };
        let task = tokio::spawn(driver.run(rx, shutdown.clone()));

        Self {
            events,
            shutdown,
            task: Some(task),
        }
    }

    pub fn select_subject(&self, subject: Subject, settings: LoaderSettings) {
        self.send(LoaderEvent::SubjectSelected { subject, settings });
    }

    /// The trigger marker entered the viewport.
    pub fn trigger_visible(&self) {
        self.send(LoaderEvent::TriggerVisible);
    }

    pub fn trigger_hidden(&self) {
        self.send(LoaderEvent::TriggerHidden);
    }

    /// Drop the current session, e.g. when a person page replaces it.
    pub fn clear(&self) {
        self.send(LoaderEvent::Teardown);
    }

    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn send(&self, event: LoaderEvent) {
        if self.events.send(event).is_err() {
            debug!("catalog loader task has stopped; event dropped");
        }
    }
}

impl Drop for CatalogLoaderHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

struct Driver {
    machine: CatalogLoader,
    gateway: Arc<dyn UpstreamGateway>,
    sink: Arc<dyn PresentationSink>,
    events: mpsc::UnboundedSender<LoaderEvent>,
    fetch: Option<JoinHandle<()>>,
    retry: Option<(TimerId, JoinHandle<()>)>,
}

impl Driver {
    async fn run(
        mut self,
        mut rx: mpsc::UnboundedReceiver<LoaderEvent>,
        shutdown: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("catalog loader shutting down");
                    break;
                }
                event = rx.recv() => match event {
                    Some(event) => {
                        for effect in self.machine.handle(event, Instant::now()) {
                            self.apply(effect);
                        }
                    }
                    None => break,
                }
            }
        }

        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
        }
        if let Some((_, retry)) = self.retry.take() {
            retry.abort();
        }
    }

    fn apply(&mut self, effect: LoaderEffect) {
        match effect {
            LoaderEffect::Resolve { generation, name } => {
                let gateway = self.gateway.clone();
                let events = self.events.clone();
                self.replace_fetch(tokio::spawn(async move {
                    let matched = gateway.resolve_subject_by_name(&name).await;
                    let target = CatalogTarget::from_match(&matched);
                    let _ = events
                        .send(LoaderEvent::SubjectResolved { generation, target });
                }));
            }
            LoaderEffect::Fetch {
                generation,
                target,
                page,
            } => {
                let gateway = self.gateway.clone();
                let events = self.events.clone();
                self.replace_fetch(tokio::spawn(async move {
                    let event =
                        match fetch_target_page(gateway.as_ref(), target, page).await {
                            Some(page) => LoaderEvent::PageLoaded { generation, page },
                            None => LoaderEvent::PageFailed {
                                generation,
                                page,
                                reason: "upstream returned no page".to_string(),
                            },
                        };
                    let _ = events.send(event);
                }));
            }
            LoaderEffect::ScheduleRetry {
                generation,
                timer,
                delay,
            } => {
                if let Some((_, previous)) = self.retry.take() {
                    previous.abort();
                }
                let events = self.events.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = events.send(LoaderEvent::RetryElapsed { generation, timer });
                });
                self.retry = Some((timer, handle));
            }
            LoaderEffect::CancelRetry { timer } => {
                if let Some((pending, handle)) = self.retry.take() {
                    if pending == timer {
                        handle.abort();
                    } else {
                        self.retry = Some((pending, handle));
                    }
                }
            }
            LoaderEffect::Publish(view) => self.sink.publish(view),
            LoaderEffect::ObserveTrigger(observe) => {
                self.sink.set_trigger_observed(observe)
            }
        }
    }

    fn replace_fetch(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.fetch.replace(handle) {
            previous.abort();
        }
    }
}

/// Page `page` of every catalog behind `target`, fetched concurrently.
///
/// With both sides present the pages are merged network first and re-ranked;
/// a lone side keeps its upstream order. `None` only when nothing came back.
async fn fetch_target_page(
    gateway: &dyn UpstreamGateway,
    target: CatalogTarget,
    page: u32,
) -> Option<CatalogPage> {
    let side = move |id: Option<u64>, kind: MediaKind| async move {
        let raw = gateway.fetch_catalog_page(id?, kind, page).await?;
        Some(normalize_page(raw, kind, page))
    };
    let (network, studio) = tokio::join!(
        side(target.network, MediaKind::Tv),
        side(target.studio, MediaKind::Movie),
    );

    match (network, studio) {
        (Some(network), Some(studio)) => merge_catalogs(Some(network), Some(studio)),
        (network, studio) => network.or(studio),
    }
}
