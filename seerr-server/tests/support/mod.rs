use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use axum_test::TestServer;
use seerr_config::Config;
use seerr_core::gateway::{
    GatewayError, NamedMatch, PersonSearchHit, SubjectMatch, UpstreamGateway,
};
use seerr_model::{
    MediaInfo, MediaKind, PersonDetails, RawCatalogPage, RawItem,
    RawPersonCredits, StudioDetails,
};
use seerr_server::{AppState, create_app};

/// Canned upstream keyed the same way the real proxy is.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGateway {
    pub configured: bool,
    pub connected: bool,
    pub people: HashMap<u64, PersonDetails>,
    pub credits: HashMap<u64, RawPersonCredits>,
    pub studios: HashMap<u64, StudioDetails>,
    pub pages: HashMap<(u64, MediaKind, u32), RawCatalogPage>,
    pub person_names: HashMap<String, u64>,
    pub subjects: HashMap<String, SubjectMatch>,
}

#[async_trait]
impl UpstreamGateway for InMemoryGateway {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn test_connection(&self) -> Result<(), GatewayError> {
        if self.connected {
            Ok(())
        } else {
            Err(GatewayError::Status {
                status: 503,
                message: "offline".into(),
            })
        }
    }

    async fn fetch_person(&self, person_id: u64) -> Option<PersonDetails> {
        self.people.get(&person_id).cloned()
    }

    async fn fetch_person_credits(
        &self,
        person_id: u64,
    ) -> Option<RawPersonCredits> {
        self.credits.get(&person_id).cloned()
    }

    async fn fetch_studio(&self, studio_id: u64) -> Option<StudioDetails> {
        self.studios.get(&studio_id).cloned()
    }

    async fn fetch_catalog_page(
        &self,
        subject_id: u64,
        kind: MediaKind,
        page: u32,
    ) -> Option<RawCatalogPage> {
        self.pages.get(&(subject_id, kind, page)).cloned()
    }

    async fn search_person(&self, name: &str) -> Option<PersonSearchHit> {
        let id = *self.person_names.get(&name.to_lowercase())?;
        let person = self.people.get(&id)?;
        Some(PersonSearchHit {
            id,
            name: person.name.clone(),
        })
    }

    async fn resolve_subject_by_name(&self, name: &str) -> SubjectMatch {
        self.subjects
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

pub fn item(id: u64, popularity: f64) -> RawItem {
    RawItem {
        id: Some(id),
        title: Some(format!("Feature {id}")),
        poster_path: Some(format!("/{id}.jpg")),
        release_date: Some("2015-06-12".into()),
        popularity: Some(popularity),
        ..RawItem::default()
    }
}

pub fn talk_show(id: u64) -> RawItem {
    RawItem {
        genre_ids: vec![10767],
        ..item(id, 500.0)
    }
}

pub fn owned(id: u64, popularity: f64) -> RawItem {
    RawItem {
        media_info: Some(MediaInfo {
            status: 5,
            ..MediaInfo::default()
        }),
        ..item(id, popularity)
    }
}

pub fn page(
    page: u32,
    total_pages: u32,
    total_results: u64,
    results: Vec<RawItem>,
) -> RawCatalogPage {
    RawCatalogPage {
        page: Some(page),
        total_pages: Some(total_pages),
        total_results: Some(total_results),
        results,
    }
}

/// A small library of fixtures shared by the API tests.
pub fn fixture_gateway() -> InMemoryGateway {
    let mut gateway = InMemoryGateway {
        configured: true,
        connected: true,
        ..InMemoryGateway::default()
    };

    gateway.people.insert(
        525,
        PersonDetails {
            id: 525,
            name: "Christopher Nolan".into(),
            known_for_department: Some("Directing".into()),
            ..PersonDetails::default()
        },
    );
    gateway.credits.insert(
        525,
        RawPersonCredits {
            cast: vec![item(1, 5.0), item(2, 9.0)],
            crew: vec![item(2, 9.0), item(3, 7.0), talk_show(4)],
        },
    );
    gateway.person_names.insert("christopher nolan".into(), 525);

    gateway.studios.insert(
        41077,
        StudioDetails {
            id: 41077,
            name: "A24".into(),
            ..StudioDetails::default()
        },
    );
    gateway.pages.insert(
        (41077, MediaKind::Movie, 1),
        page(1, 3, 60, vec![item(10, 4.0), owned(11, 8.0)]),
    );

    gateway.pages.insert(
        (71, MediaKind::Tv, 1),
        page(1, 6, 120, vec![item(20, 2.0), item(21, 6.0)]),
    );
    gateway.pages.insert(
        (900, MediaKind::Movie, 1),
        page(1, 2, 30, vec![item(21, 6.0), item(30, 4.0)]),
    );
    gateway.subjects.insert(
        "cw".into(),
        SubjectMatch {
            studio: Some(NamedMatch {
                id: 900,
                name: "CW Studios".into(),
            }),
            network: Some(NamedMatch {
                id: 71,
                name: "The CW".into(),
            }),
        },
    );

    gateway
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.upstream.url = Some("http://seerr.test".into());
    config.upstream.api_key = Some("test-key".into());
    config
}

pub fn build_test_server(gateway: InMemoryGateway, config: Config) -> TestServer {
    let state = AppState::new(Arc::new(config), Arc::new(gateway));
    match TestServer::new(create_app(state)) {
        Ok(server) => server,
        Err(err) => panic!("failed to start test server: {err}"),
    }
}
