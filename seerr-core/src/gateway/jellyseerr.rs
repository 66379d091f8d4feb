use async_trait::async_trait;
use reqwest::{Client, Response, header};
use seerr_config::UpstreamConfig;
use seerr_model::{
    MediaKind, PersonDetails, RawCatalogPage, RawPersonCredits, StudioDetails,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use super::{
    GatewayError, NamedMatch, PersonSearchHit, SubjectMatch, UpstreamGateway,
};
use crate::networks::find_network;

const API_KEY_HEADER: &str = "X-Api-Key";

/// HTTP client for a Jellyseerr/Overseerr instance.
#[derive(Debug, Clone)]
pub struct JellyseerrGateway {
    client: Client,
    base_url: BaseUrl,
    api_key: Option<String>,
}

#[derive(Debug, Clone)]
enum BaseUrl {
    Missing,
    Invalid(String),
    Valid(Url),
}

#[derive(Debug, Deserialize)]
struct SearchResults<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    id: Option<u64>,
    media_type: Option<String>,
    name: Option<String>,
}

impl JellyseerrGateway {
    pub fn new(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("seerr-discovery/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(
            client,
            config.url.as_deref(),
            config.api_key.clone(),
        ))
    }

    pub fn with_client(
        client: Client,
        base_url: Option<&str>,
        api_key: Option<String>,
    ) -> Self {
        let base_url = match base_url.map(str::trim).filter(|u| !u.is_empty()) {
            None => BaseUrl::Missing,
            Some(raw) => match Url::parse(raw) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {
                    BaseUrl::Valid(url)
                }
                Ok(url) => BaseUrl::Invalid(format!(
                    "{raw} (unsupported scheme {})",
                    url.scheme()
                )),
                Err(err) => BaseUrl::Invalid(format!("{raw} ({err})")),
            },
        };

        Self {
            client,
            base_url,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    fn endpoint(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Url, GatewayError> {
        let base = match &self.base_url {
            BaseUrl::Valid(url) => url,
            BaseUrl::Invalid(reason) => {
                return Err(GatewayError::InvalidBaseUrl(reason.clone()));
            }
            BaseUrl::Missing => return Err(GatewayError::NotConfigured),
        };

        // Keep any path prefix on the base (reverse-proxy mounts).
        let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
        let mut url = Url::parse(&joined)
            .map_err(|err| GatewayError::InvalidBaseUrl(err.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let url = self.endpoint(path, query)?;
        debug!(%url, "upstream request");

        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        Self::handle_response(path, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| GatewayError::Decode {
            what: path.to_string(),
            source,
        })
    }

    /// Collapse a failed call into absence, logging the cause.
    fn absent<T>(what: &str, result: Result<T, GatewayError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(GatewayError::Status { status: 404, .. }) => {
                debug!(what, "upstream has no record");
                None
            }
            Err(err) => {
                warn!(what, error = %err, "upstream request failed");
                None
            }
        }
    }

    async fn search_companies(&self, query: &str) -> Vec<StudioDetails> {
        let result: Result<SearchResults<StudioDetails>, _> = self
            .get_json("/api/v1/search/company", &[("query", query.to_string())])
            .await;
        Self::absent("company search", result)
            .map(|found| found.results)
            .unwrap_or_default()
    }
}

#[async_trait]
impl UpstreamGateway for JellyseerrGateway {
    fn is_configured(&self) -> bool {
        matches!(self.base_url, BaseUrl::Valid(_))
    }

    async fn test_connection(&self) -> Result<(), GatewayError> {
        let _: serde_json::Value = self.get_json("/api/v1/status", &[]).await?;
        Ok(())
    }

    async fn fetch_person(&self, person_id: u64) -> Option<PersonDetails> {
        let path = format!("/api/v1/person/{person_id}");
        Self::absent("person", self.get_json(&path, &[]).await)
    }

    async fn fetch_person_credits(
        &self,
        person_id: u64,
    ) -> Option<RawPersonCredits> {
        let path = format!("/api/v1/person/{person_id}/combined_credits");
        Self::absent("person credits", self.get_json(&path, &[]).await)
    }

    async fn fetch_studio(&self, studio_id: u64) -> Option<StudioDetails> {
        let path = format!("/api/v1/studio/{studio_id}");
        Self::absent("studio", self.get_json(&path, &[]).await)
    }

    async fn fetch_catalog_page(
        &self,
        subject_id: u64,
        kind: MediaKind,
        page: u32,
    ) -> Option<RawCatalogPage> {
        let (path, subject_param) = match kind {
            MediaKind::Movie => ("/api/v1/discover/movies", "studio"),
            MediaKind::Tv => ("/api/v1/discover/tv", "network"),
        };
        let query = [
            ("page", page.max(1).to_string()),
            (subject_param, subject_id.to_string()),
        ];
        Self::absent("catalog page", self.get_json(path, &query).await)
    }

    async fn search_person(&self, name: &str) -> Option<PersonSearchHit> {
        let query = [("query", name.to_string()), ("page", "1".to_string())];
        let found: SearchResults<SearchHit> =
            Self::absent("search", self.get_json("/api/v1/search", &query).await)?;

        found.results.into_iter().find_map(|hit| {
            if hit.media_type.as_deref() != Some("person") {
                return None;
            }
            Some(PersonSearchHit {
                id: hit.id?,
                name: hit.name.unwrap_or_default(),
            })
        })
    }

    async fn resolve_subject_by_name(&self, name: &str) -> SubjectMatch {
        if name.trim().is_empty() {
            return SubjectMatch::default();
        }

        let network = find_network(name).map(|entry| NamedMatch {
            id: entry.id,
            name: entry.name.to_string(),
        });
        let studio = self
            .search_companies(name)
            .await
            .into_iter()
            .next()
            .map(|studio| NamedMatch {
                id: studio.id,
                name: studio.name,
            });

        info!(
            subject = name,
            network = ?network.as_ref().map(|n| n.id),
            studio = ?studio.as_ref().map(|s| s.id),
            "resolved subject by name"
        );
        SubjectMatch { studio, network }
    }
}
