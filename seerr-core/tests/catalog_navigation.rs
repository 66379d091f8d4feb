use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use seerr_config::Config;
use seerr_core::gateway::{
    GatewayError, NamedMatch, PersonSearchHit, SubjectMatch, UpstreamGateway,
};
use seerr_core::loader::{PresentationUpdate, RecordingSink};
use seerr_core::{NavigationController, NavigationOutcome, SubjectSelected};
use seerr_model::{
    MediaKind, PersonDetails, RawCatalogPage, RawItem, RawPersonCredits,
    StudioDetails, Subject, SubjectKind,
};

/// Network 71 has three pages; page 2 repeats an item from page 1.
#[derive(Default)]
struct StaticGateway {
    pages: HashMap<u32, RawCatalogPage>,
    credits: Option<RawPersonCredits>,
}

fn raw(id: u64, popularity: f64) -> RawItem {
    RawItem {
        id: Some(id),
        name: Some(format!("Series {id}")),
        poster_path: Some(format!("/{id}.jpg")),
        first_air_date: Some("2019-09-01".into()),
        popularity: Some(popularity),
        ..RawItem::default()
    }
}

fn network_pages() -> HashMap<u32, RawCatalogPage> {
    let page = |n: u32, results: Vec<RawItem>| RawCatalogPage {
        page: Some(n),
        total_pages: Some(3),
        total_results: Some(6),
        results,
    };
    HashMap::from([
        (1, page(1, vec![raw(1, 3.0), raw(2, 9.0)])),
        (2, page(2, vec![raw(2, 9.0), raw(3, 1.0)])),
        (3, page(3, vec![raw(4, 2.0)])),
    ])
}

#[async_trait]
impl UpstreamGateway for StaticGateway {
    fn is_configured(&self) -> bool {
        true
    }

    async fn test_connection(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn fetch_person(&self, person_id: u64) -> Option<PersonDetails> {
        Some(PersonDetails {
            id: person_id,
            name: "Someone".into(),
            known_for_department: Some("Acting".into()),
            ..PersonDetails::default()
        })
    }

    async fn fetch_person_credits(&self, _: u64) -> Option<RawPersonCredits> {
        self.credits.clone()
    }

    async fn fetch_studio(&self, _: u64) -> Option<StudioDetails> {
        None
    }

    async fn fetch_catalog_page(
        &self,
        subject_id: u64,
        kind: MediaKind,
        page: u32,
    ) -> Option<RawCatalogPage> {
        if subject_id != 71 || kind != MediaKind::Tv {
            return None;
        }
        self.pages.get(&page).cloned()
    }

    async fn search_person(&self, _: &str) -> Option<PersonSearchHit> {
        None
    }

    async fn resolve_subject_by_name(&self, name: &str) -> SubjectMatch {
        if name.eq_ignore_ascii_case("the cw") {
            SubjectMatch {
                network: Some(NamedMatch {
                    id: 71,
                    name: "The CW".into(),
                }),
                studio: None,
            }
        } else {
            SubjectMatch::default()
        }
    }
}

fn ids(sink: &RecordingSink) -> Vec<u64> {
    sink.last_view()
        .map(|view| view.ordered_items.iter().map(|i| i.tmdb_id).collect())
        .unwrap_or_default()
}

fn controller(gateway: StaticGateway) -> (NavigationController, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let nav = NavigationController::new(
        Arc::new(gateway),
        sink.clone(),
        &Config::default(),
    );
    (nav, sink)
}

#[tokio::test(start_paused = true)]
async fn network_page_scrolls_to_exhaustion() {
    let (mut nav, sink) = controller(StaticGateway {
        pages: network_pages(),
        ..StaticGateway::default()
    });

    let network = Subject::new(SubjectKind::Network, Some(71), "The CW");
    let outcome = nav.handle(SubjectSelected::new(network.clone())).await;
    assert_eq!(outcome, NavigationOutcome::CatalogRequested);

    tokio::time::sleep(Duration::from_millis(50)).await;
    let first = sink.last_view().unwrap();
    assert_eq!(first.subject_name, "The CW");
    assert!(first.has_more);
    assert_eq!(ids(&sink), vec![1, 2]);
    assert!(
        sink.updates()
            .contains(&PresentationUpdate::TriggerObserved(true))
    );

    // Parked at the bottom: page 2 and then page 3 follow without new
    // visibility events.
    nav.loader().trigger_visible();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(ids(&sink), vec![1, 2, 3]);

    tokio::time::sleep(Duration::from_secs(5)).await;
    let last = sink.last_view().unwrap();
    assert_eq!(ids(&sink), vec![1, 2, 3, 4]);
    assert!(!last.has_more);
    assert_eq!(
        sink.updates().last(),
        Some(&PresentationUpdate::TriggerObserved(false))
    );

    // Same page again is ignored.
    let repeat = nav.handle(SubjectSelected::new(network)).await;
    assert_eq!(repeat, NavigationOutcome::Ignored);

    nav.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn studio_list_name_resolves_to_network_catalog() {
    let (mut nav, sink) = controller(StaticGateway {
        pages: network_pages(),
        ..StaticGateway::default()
    });

    nav.handle(SubjectSelected::new(Subject::studio_named("The CW")))
        .await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(ids(&sink), vec![1, 2]);

    nav.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn person_page_replaces_catalog_with_ranked_cast() {
    let (mut nav, sink) = controller(StaticGateway {
        pages: network_pages(),
        credits: Some(RawPersonCredits {
            cast: vec![raw(10, 1.0), raw(11, 8.0)],
            crew: vec![raw(12, 50.0)],
        }),
    });

    nav.handle(SubjectSelected::new(Subject::new(
        SubjectKind::Network,
        Some(71),
        "The CW",
    )))
    .await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let outcome = nav
        .handle(SubjectSelected::new(Subject::person(7, "Someone")))
        .await;
    // Performers only get cast credits.
    assert_eq!(outcome, NavigationOutcome::PersonPublished { items: 2 });
    assert_eq!(ids(&sink), vec![11, 10]);

    // The superseded network session publishes nothing further.
    nav.loader().trigger_visible();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(ids(&sink), vec![11, 10]);

    nav.shutdown().await;
}
