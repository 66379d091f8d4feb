//! Reacts to host navigation by showing the matching discovery section.
//!
//! Person pages get a single ranked credit list. Studio and network pages
//! are handed to the incremental [`CatalogLoaderHandle`].

use std::sync::Arc;
use std::time::Duration;

use seerr_config::{Config, LoaderSettings};
use seerr_model::{PersonCreditSet, Subject, SubjectKind};
use tracing::{debug, info};

use crate::aggregate::merge_credits;
use crate::filter::ExclusionPolicy;
use crate::gateway::UpstreamGateway;
use crate::loader::{CatalogLoaderHandle, CatalogView, PresentationSink};
use crate::normalize::normalize_credits;

/// Host signal: the user landed on a person, studio or network page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSelected {
    pub subject: Subject,
    /// Handle the signal even if it repeats the previous one.
    pub force: bool,
}

impl SubjectSelected {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            force: false,
        }
    }

    pub fn forced(subject: Subject) -> Self {
        Self {
            subject,
            force: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Same subject as last time.
    Ignored,
    PersonPublished { items: usize },
    CatalogRequested,
}

pub struct NavigationController {
    gateway: Arc<dyn UpstreamGateway>,
    sink: Arc<dyn PresentationSink>,
    loader: CatalogLoaderHandle,
    settle_delay: Duration,
    settings: LoaderSettings,
    last: Option<Subject>,
}

impl NavigationController {
    /// Build a controller and start its catalog loader on the current
    /// runtime. Settings are snapshotted here.
    pub fn new(
        gateway: Arc<dyn UpstreamGateway>,
        sink: Arc<dyn PresentationSink>,
        config: &Config,
    ) -> Self {
        let loader = CatalogLoaderHandle::spawn(
            gateway.clone(),
            sink.clone(),
            config.loader,
        );
        Self {
            gateway,
            sink,
            loader,
            settle_delay: config.loader.settle_delay,
            settings: config.loader_settings(),
            last: None,
        }
    }

    /// The loader, for forwarding trigger visibility from the renderer.
    pub fn loader(&self) -> &CatalogLoaderHandle {
        &self.loader
    }

    pub async fn handle(&mut self, signal: SubjectSelected) -> NavigationOutcome {
        let SubjectSelected { subject, force } = signal;

        if !force && self.last.as_ref().is_some_and(|last| same_subject(last, &subject)) {
            debug!(%subject, "subject unchanged; ignoring navigation");
            return NavigationOutcome::Ignored;
        }
        self.last = Some(subject.clone());

        // Let the host finish rendering the page first.
        tokio::time::sleep(self.settle_delay).await;

        match (subject.kind, subject.id) {
            (SubjectKind::Person, Some(person_id)) => {
                self.loader.clear();
                let items = self.publish_person(person_id, &subject).await;
                NavigationOutcome::PersonPublished { items }
            }
            (SubjectKind::Person, None) => {
                debug!(%subject, "person without id; nothing to show");
                self.loader.clear();
                self.sink.publish(CatalogView::empty(subject.display_name));
                NavigationOutcome::PersonPublished { items: 0 }
            }
            (SubjectKind::Studio | SubjectKind::Network, _) => {
                self.loader.select_subject(subject, self.settings);
                NavigationOutcome::CatalogRequested
            }
        }
    }

    async fn publish_person(&self, person_id: u64, subject: &Subject) -> usize {
        let (person, credits) = tokio::join!(
            self.gateway.fetch_person(person_id),
            self.gateway.fetch_person_credits(person_id),
        );

        let is_performer = person.as_ref().is_some_and(|p| p.is_performer());
        let credits = credits.map(normalize_credits).unwrap_or_default();
        let items = person_credit_items(credits, is_performer, &self.settings);

        info!(
            subject = %subject.display_name,
            performer = is_performer,
            items = items.len(),
            "publishing person credits"
        );

        let count = items.len();
        self.sink.publish(CatalogView {
            subject_name: subject.display_name.clone(),
            ordered_items: items,
            has_more: false,
        });
        count
    }

    pub async fn shutdown(self) {
        self.loader.shutdown().await;
    }
}

/// Ranked, filtered credit list for a person page.
fn person_credit_items(
    credits: PersonCreditSet,
    is_performer: bool,
    settings: &LoaderSettings,
) -> Vec<seerr_model::DiscoveryItem> {
    let merged = merge_credits(credits, is_performer, 0);
    let mut items = ExclusionPolicy::from(settings).apply(merged);
    if settings.max_results > 0 {
        items.truncate(settings.max_results);
    }
    items
}

fn same_subject(a: &Subject, b: &Subject) -> bool {
    a.kind == b.kind
        && match (a.id, b.id) {
            (Some(x), Some(y)) => x == y,
            (None, None) => a.display_name == b.display_name,
            _ => false,
        }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seerr_model::{PersonDetails, RawCatalogPage, RawItem, RawPersonCredits};
    use tokio::time::Instant;

    use crate::gateway::MockUpstreamGateway;
    use crate::loader::RecordingSink;

    fn credit(id: u64, popularity: f64) -> RawItem {
        RawItem {
            id: Some(id),
            title: Some(format!("Film {id}")),
            popularity: Some(popularity),
            ..RawItem::default()
        }
    }

    fn director() -> PersonDetails {
        PersonDetails {
            id: 525,
            name: "Christopher Nolan".into(),
            known_for_department: Some("Directing".into()),
            ..PersonDetails::default()
        }
    }

    fn controller(
        gateway: MockUpstreamGateway,
        config: &Config,
    ) -> (NavigationController, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let nav = NavigationController::new(Arc::new(gateway), sink.clone(), config);
        (nav, sink)
    }

    fn person_gateway() -> MockUpstreamGateway {
        let mut gateway = MockUpstreamGateway::new();
        gateway.expect_fetch_person().returning(|_| Some(director()));
        gateway.expect_fetch_person_credits().returning(|_| {
            Some(RawPersonCredits {
                cast: vec![credit(1, 5.0), credit(2, 9.0)],
                crew: vec![credit(2, 9.0)],
            })
        });
        gateway
    }

    #[tokio::test(start_paused = true)]
    async fn person_credits_are_merged_and_ranked() {
        let (mut nav, sink) = controller(person_gateway(), &Config::default());
        let started = Instant::now();

        let outcome = nav
            .handle(SubjectSelected::new(Subject::person(525, "Christopher Nolan")))
            .await;

        assert_eq!(outcome, NavigationOutcome::PersonPublished { items: 2 });
        assert!(started.elapsed() >= Config::default().loader.settle_delay);
        let ids: Vec<_> = sink
            .last_view()
            .unwrap()
            .ordered_items
            .iter()
            .map(|item| item.tmdb_id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_subject_is_ignored_unless_forced() {
        let (mut nav, sink) = controller(person_gateway(), &Config::default());
        let subject = Subject::person(525, "Christopher Nolan");

        nav.handle(SubjectSelected::new(subject.clone())).await;
        let again = nav.handle(SubjectSelected::new(subject.clone())).await;
        assert_eq!(again, NavigationOutcome::Ignored);
        assert_eq!(sink.views().len(), 1);

        let forced = nav.handle(SubjectSelected::forced(subject)).await;
        assert_eq!(forced, NavigationOutcome::PersonPublished { items: 2 });
        assert_eq!(sink.views().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn talk_credits_are_hidden_and_list_is_capped() {
        let mut gateway = MockUpstreamGateway::new();
        gateway.expect_fetch_person().returning(|_| None);
        gateway.expect_fetch_person_credits().returning(|_| {
            let talk = RawItem {
                genre_ids: vec![10767],
                ..credit(3, 99.0)
            };
            Some(RawPersonCredits {
                cast: vec![talk, credit(1, 5.0), credit(2, 9.0), credit(4, 1.0)],
                crew: Vec::new(),
            })
        });

        let mut config = Config::default();
        config.discovery.max_results = 2;
        let (mut nav, sink) = controller(gateway, &config);
        nav.handle(SubjectSelected::new(Subject::person(1, "Guest"))).await;

        let ids: Vec<_> = sink
            .last_view()
            .unwrap()
            .ordered_items
            .iter()
            .map(|item| item.tmdb_id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_credits_publish_empty_section() {
        let mut gateway = MockUpstreamGateway::new();
        gateway.expect_fetch_person().returning(|_| None);
        gateway.expect_fetch_person_credits().returning(|_| None);

        let (mut nav, sink) = controller(gateway, &Config::default());
        let outcome = nav.handle(SubjectSelected::new(Subject::person(9, "Nobody"))).await;

        assert_eq!(outcome, NavigationOutcome::PersonPublished { items: 0 });
        assert!(sink.last_view().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn network_page_is_handed_to_loader() {
        let mut gateway = MockUpstreamGateway::new();
        gateway
            .expect_fetch_catalog_page()
            .withf(|id, _, page| *id == 49 && *page == 1)
            .times(1)
            .returning(|_, _, _| {
                Some(RawCatalogPage {
                    page: Some(1),
                    total_pages: Some(1),
                    total_results: Some(1),
                    results: vec![RawItem {
                        id: Some(1399),
                        name: Some("Game of Thrones".into()),
                        ..RawItem::default()
                    }],
                })
            });

        let (mut nav, sink) = controller(gateway, &Config::default());
        let outcome = nav
            .handle(SubjectSelected::new(Subject::new(SubjectKind::Network, Some(49), "HBO")))
            .await;
        assert_eq!(outcome, NavigationOutcome::CatalogRequested);

        tokio::time::sleep(Duration::from_millis(10)).await;
        let view = sink.last_view().unwrap();
        assert_eq!(view.subject_name, "HBO");
        assert_eq!(view.ordered_items[0].tmdb_id, 1399);
        nav.shutdown().await;
    }

    #[test]
    fn name_only_subjects_compare_by_name() {
        assert!(same_subject(&Subject::studio_named("A24"), &Subject::studio_named("A24")));
        assert!(!same_subject(&Subject::studio_named("A24"), &Subject::studio_named("Neon")));
        assert!(!same_subject(
            &Subject::new(SubjectKind::Studio, Some(1), "X"),
            &Subject::new(SubjectKind::Network, Some(1), "X"),
        ));
    }
}
