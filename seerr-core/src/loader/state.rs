//! Incremental catalog loader state machine.
//!
//! The machine performs no I/O. Each [`LoaderEvent`] is folded into the
//! current state and answered with the [`LoaderEffect`]s the caller must
//! carry out, in order. Responses for a superseded session are recognized by
//! their generation and ignored.

use std::time::Duration;

use seerr_config::{LoaderSettings, LoaderTiming};
use seerr_model::{CatalogPage, Subject};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::session::{CatalogSession, CatalogTarget, TimerId};
use super::view::CatalogView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// No session, or the first page could not be loaded.
    Idle,
    /// Resolving the subject or fetching page 1.
    Initializing,
    /// Items published; more pages remain.
    Ready,
    /// A follow-up page is in flight.
    LoadingMore,
    /// Every page has been consumed.
    Exhausted,
}

#[derive(Debug, Clone)]
pub enum LoaderEvent {
    SubjectSelected {
        subject: Subject,
        settings: LoaderSettings,
    },
    SubjectResolved {
        generation: u64,
        target: Option<CatalogTarget>,
    },
    PageLoaded {
        generation: u64,
        page: CatalogPage,
    },
    PageFailed {
        generation: u64,
        page: u32,
        reason: String,
    },
    TriggerVisible,
    TriggerHidden,
    RetryElapsed {
        generation: u64,
        timer: TimerId,
    },
    /// Drop the session without selecting a new one.
    Teardown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoaderEffect {
    /// Look the subject up by display name.
    Resolve { generation: u64, name: String },
    Fetch {
        generation: u64,
        target: CatalogTarget,
        page: u32,
    },
    ScheduleRetry {
        generation: u64,
        timer: TimerId,
        delay: Duration,
    },
    CancelRetry { timer: TimerId },
    Publish(CatalogView),
    ObserveTrigger(bool),
}

#[derive(Debug)]
pub struct CatalogLoader {
    timing: LoaderTiming,
    state: LoaderState,
    session: Option<CatalogSession>,
    generation: u64,
    next_timer: TimerId,
    observing: bool,
}

impl CatalogLoader {
    pub fn new(timing: LoaderTiming) -> Self {
        Self {
            timing,
            state: LoaderState::Idle,
            session: None,
            generation: 0,
            next_timer: 1,
            observing: false,
        }
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn session(&self) -> Option<&CatalogSession> {
        self.session.as_ref()
    }

    pub fn is_observing_trigger(&self) -> bool {
        self.observing
    }

    pub fn handle(
        &mut self,
        event: LoaderEvent,
        now: Instant,
    ) -> Vec<LoaderEffect> {
        let mut effects = Vec::new();

        match event {
            LoaderEvent::SubjectSelected { subject, settings } => {
                self.select(subject, settings, &mut effects);
            }
            LoaderEvent::SubjectResolved { generation, target } => {
                if self.is_current(generation, "resolution") {
                    self.on_resolved(target, &mut effects);
                }
            }
            LoaderEvent::PageLoaded { generation, page } => {
                if self.is_current(generation, "page") {
                    self.on_page_loaded(page, now, &mut effects);
                }
            }
            LoaderEvent::PageFailed {
                generation,
                page,
                reason,
            } => {
                if self.is_current(generation, "page failure") {
                    self.on_page_failed(page, &reason, now);
                }
            }
            LoaderEvent::TriggerVisible => {
                if let Some(session) = self.session.as_mut() {
                    session.trigger_visible = true;
                    self.request_load(now, &mut effects);
                }
            }
            LoaderEvent::TriggerHidden => {
                if let Some(session) = self.session.as_mut() {
                    session.trigger_visible = false;
                    session.throttle.note_trigger_left();
                }
            }
            LoaderEvent::RetryElapsed { generation, timer } => {
                let due = self.session.as_mut().filter(|s| {
                    s.generation() == generation
                        && s.pending_retry == Some(timer)
                });
                if let Some(session) = due {
                    session.pending_retry = None;
                    self.request_load(now, &mut effects);
                } else {
                    debug!(timer, "ignoring stale retry timer");
                }
            }
            LoaderEvent::Teardown => self.teardown(&mut effects),
        }

        effects
    }

    fn is_current(&self, generation: u64, what: &str) -> bool {
        let current = self.session.is_some() && generation == self.generation;
        if !current {
            debug!(
                generation,
                current = self.generation,
                what,
                "discarding response for superseded session"
            );
        }
        current
    }

    fn select(
        &mut self,
        subject: Subject,
        settings: LoaderSettings,
        effects: &mut Vec<LoaderEffect>,
    ) {
        self.teardown(effects);
        self.generation += 1;

        effects.push(LoaderEffect::Publish(CatalogView::empty(
            subject.display_name.clone(),
        )));

        let Some(kind) = subject.kind.catalog_kind() else {
            warn!(%subject, "catalog loader only pages studios and networks");
            return;
        };

        info!(%subject, generation = self.generation, "starting catalog session");
        let mut session = CatalogSession::new(
            self.generation,
            subject,
            settings,
            &self.timing,
        );
        self.state = LoaderState::Initializing;

        let subject_id = session.subject().id;
        match subject_id {
            Some(id) => {
                session.set_target(CatalogTarget::for_kind(kind, id));
                effects.extend(start_fetch(&mut session));
            }
            None => effects.push(LoaderEffect::Resolve {
                generation: self.generation,
                name: session.subject().display_name.clone(),
            }),
        }

        self.session = Some(session);
    }

    fn on_resolved(
        &mut self,
        target: Option<CatalogTarget>,
        effects: &mut Vec<LoaderEffect>,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if self.state != LoaderState::Initializing || session.target().is_some() {
            debug!("ignoring resolution outside initialization");
            return;
        }

        match target.filter(|target| !target.is_empty()) {
            Some(target) => {
                debug!(
                    subject = %session.subject(),
                    network = ?target.network,
                    studio = ?target.studio,
                    "subject resolved"
                );
                session.set_target(target);
                effects.extend(start_fetch(session));
            }
            None => {
                warn!(subject = %session.subject(), "no studio or network matches subject");
                self.state = LoaderState::Idle;
            }
        }
    }

    fn on_page_loaded(
        &mut self,
        page: CatalogPage,
        now: Instant,
        effects: &mut Vec<LoaderEffect>,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.in_flight {
            debug!("ignoring page with no fetch in flight");
            return;
        }

        let first_page = self.state == LoaderState::Initializing;
        session.in_flight = false;
        let added = session.merge_page(page);
        session.throttle.record_completion(now, session.trigger_visible);

        info!(
            subject = %session.subject().display_name,
            page = session.current_page(),
            total_pages = session.total_pages(),
            added,
            accepted = session.accepted().len(),
            "catalog page merged"
        );
        effects.push(LoaderEffect::Publish(session.view()));

        if !session.has_more() {
            let pending = session.pending_retry.take();
            self.state = LoaderState::Exhausted;
            if let Some(timer) = pending {
                effects.push(LoaderEffect::CancelRetry { timer });
            }
            self.set_observing(false, effects);
            return;
        }

        self.state = LoaderState::Ready;
        let scroll_enabled = session.settings().enable_infinite_scroll;
        let still_visible = session.trigger_visible;
        if scroll_enabled {
            self.set_observing(true, effects);
            // Intersection callbacks can be missed while a page is in
            // flight; keep going if the trigger never left.
            if !first_page && still_visible {
                self.request_load(now, effects);
            }
        }
    }

    fn on_page_failed(&mut self, page: u32, reason: &str, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.in_flight {
            return;
        }
        session.in_flight = false;
        session.throttle.record_completion(now, session.trigger_visible);

        warn!(
            subject = %session.subject().display_name,
            page,
            kept_page = session.current_page(),
            reason,
            "catalog page fetch failed"
        );

        self.state = match self.state {
            LoaderState::Initializing => LoaderState::Idle,
            LoaderState::LoadingMore => LoaderState::Ready,
            other => other,
        };
    }

    /// Start the next fetch now, or defer it until the throttle allows.
    fn request_load(&mut self, now: Instant, effects: &mut Vec<LoaderEffect>) {
        if self.state != LoaderState::Ready {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.in_flight
            || !session.has_more()
            || session.target().is_none()
            || !session.settings().enable_infinite_scroll
        {
            return;
        }

        match session.throttle.remaining(now) {
            Some(delay) => {
                if session.pending_retry.is_some() {
                    debug!("load already deferred; coalescing request");
                    return;
                }
                let timer = self.next_timer;
                self.next_timer += 1;
                session.pending_retry = Some(timer);
                debug!(timer, ?delay, "deferring load");
                effects.push(LoaderEffect::ScheduleRetry {
                    generation: session.generation(),
                    timer,
                    delay,
                });
            }
            None => {
                if let Some(timer) = session.pending_retry.take() {
                    effects.push(LoaderEffect::CancelRetry { timer });
                }
                if let Some(fetch) = start_fetch(session) {
                    self.state = LoaderState::LoadingMore;
                    effects.push(fetch);
                }
            }
        }
    }

    fn teardown(&mut self, effects: &mut Vec<LoaderEffect>) {
        if let Some(session) = self.session.take() {
            if let Some(timer) = session.pending_retry() {
                effects.push(LoaderEffect::CancelRetry { timer });
            }
            debug!(subject = %session.subject(), "catalog session torn down");
        }
        self.set_observing(false, effects);
        self.state = LoaderState::Idle;
    }

    fn set_observing(&mut self, observe: bool, effects: &mut Vec<LoaderEffect>) {
        if self.observing != observe {
            self.observing = observe;
            effects.push(LoaderEffect::ObserveTrigger(observe));
        }
    }
}

fn start_fetch(session: &mut CatalogSession) -> Option<LoaderEffect> {
    let target = session.target()?;
    session.in_flight = true;
    session.throttle.record_start();
    Some(LoaderEffect::Fetch {
        generation: session.generation(),
        target,
        page: session.next_page(),
    })
}
