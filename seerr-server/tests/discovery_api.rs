use anyhow::Result;
use axum::http::StatusCode;
use serde_json::Value;

mod support;
use support::{build_test_server, fixture_gateway, test_config};

fn ids(items: &Value) -> Vec<u64> {
    items
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"].as_u64())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn person_filmography_merges_and_ranks_credits() -> Result<()> {
    let server = build_test_server(fixture_gateway(), test_config());

    let response = server.get("/discovery/person/525").await;
    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["Person"]["name"], "Christopher Nolan");
    assert_eq!(body["Person"]["knownForDepartment"], "Directing");
    // Talk show crew credit is excluded; duplicate cast/crew entry collapses.
    assert_eq!(ids(&body["Credits"]), vec![2, 3, 1]);
    assert_eq!(ids(&body["Cast"]), vec![2, 1]);
    assert_eq!(ids(&body["Crew"]), vec![2, 3]);
    assert_eq!(body["TotalResults"], 3);
    assert_eq!(body["Credits"][0]["mediaType"], "movie");
    Ok(())
}

#[tokio::test]
async fn unknown_person_is_not_found() -> Result<()> {
    let server = build_test_server(fixture_gateway(), test_config());

    let response = server.get("/discovery/person/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 404);
    Ok(())
}

#[tokio::test]
async fn person_search_resolves_the_first_hit() -> Result<()> {
    let server = build_test_server(fixture_gateway(), test_config());

    let response = server
        .get("/discovery/person/search")
        .add_query_param("name", "Christopher Nolan")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["Person"]["id"], 525);

    let missing = server
        .get("/discovery/person/search")
        .add_query_param("name", "Nobody")
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn blank_names_are_rejected() -> Result<()> {
    let server = build_test_server(fixture_gateway(), test_config());

    let person = server
        .get("/discovery/person/search")
        .add_query_param("name", "   ")
        .await;
    person.assert_status(StatusCode::BAD_REQUEST);

    let studio = server
        .get("/discovery/studio/search")
        .add_query_param("name", "")
        .await;
    studio.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = studio.json();
    assert_eq!(body["error"]["message"], "name must not be empty");
    Ok(())
}

#[tokio::test]
async fn studio_catalog_clamps_page_and_keeps_arrival_order() -> Result<()> {
    let server = build_test_server(fixture_gateway(), test_config());

    let response = server
        .get("/discovery/studio/41077")
        .add_query_param("page", 0)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["Studio"]["name"], "A24");
    assert_eq!(body["Page"], 1);
    assert_eq!(body["TotalPages"], 3);
    assert_eq!(body["TotalResults"], 60);
    assert_eq!(ids(&body["Items"]), vec![10, 11]);
    assert_eq!(body["Items"][1]["mediaInfo"]["status"], 5);
    Ok(())
}

#[tokio::test]
async fn library_items_can_be_hidden() -> Result<()> {
    let mut config = test_config();
    config.discovery.include_library_items = false;
    let server = build_test_server(fixture_gateway(), config);

    let response = server.get("/discovery/studio/41077").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body["Items"]), vec![10]);
    Ok(())
}

#[tokio::test]
async fn network_catalog_reports_series() -> Result<()> {
    let server = build_test_server(fixture_gateway(), test_config());

    let response = server.get("/discovery/network/71").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["Studio"].is_null());
    assert_eq!(body["TotalPages"], 6);
    assert_eq!(body["Items"][0]["mediaType"], "tv");

    server
        .get("/discovery/network/72")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn catalog_search_merges_network_and_studio() -> Result<()> {
    let server = build_test_server(fixture_gateway(), test_config());

    let response = server
        .get("/discovery/studio/search")
        .add_query_param("name", "CW")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();

    // The network wins the reported subject and the page counts.
    assert_eq!(body["Studio"]["id"], 71);
    assert_eq!(body["Studio"]["name"], "CW");
    assert_eq!(body["TotalPages"], 6);
    assert_eq!(body["TotalResults"], 120);

    // Same provider id on both sides is two different titles.
    let items = body["Items"].as_array().cloned().unwrap_or_default();
    let keys: Vec<(u64, String)> = items
        .iter()
        .map(|item| {
            (
                item["id"].as_u64().unwrap_or_default(),
                item["mediaType"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            (21, "tv".to_string()),
            (21, "movie".to_string()),
            (30, "movie".to_string()),
            (20, "tv".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn unmatched_catalog_name_is_not_found() -> Result<()> {
    let server = build_test_server(fixture_gateway(), test_config());

    server
        .get("/discovery/studio/search")
        .add_query_param("name", "Nonexistent Pictures")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn disabled_discovery_returns_service_unavailable() -> Result<()> {
    let mut config = test_config();
    config.discovery.enabled = false;
    let server = build_test_server(fixture_gateway(), config);

    let response = server.get("/discovery/person/525").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Jellyseerr discovery is disabled");
    assert_eq!(body["error"]["status"], 503);

    server
        .get("/discovery/studio/41077")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn unconfigured_upstream_returns_service_unavailable() -> Result<()> {
    let mut gateway = fixture_gateway();
    gateway.configured = false;
    let server = build_test_server(gateway, test_config());

    let response = server.get("/discovery/person/525").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 503);
    assert_eq!(body["error"]["message"], "no upstream endpoint configured");

    server
        .get("/discovery/studio/search")
        .add_query_param("name", "CW")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn health_is_always_ok_at_the_http_level() -> Result<()> {
    let server = build_test_server(fixture_gateway(), test_config());
    let response = server.get("/discovery/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["Status"], "ok");
    assert_eq!(body["UpstreamConnected"], true);
    assert!(body["ErrorMessage"].is_null());

    let mut offline = fixture_gateway();
    offline.connected = false;
    let server = build_test_server(offline, test_config());
    let response = server.get("/discovery/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["Status"], "error");
    assert_eq!(body["UpstreamConfigured"], true);
    assert_eq!(body["UpstreamConnected"], false);
    assert!(body["ErrorMessage"].as_str().is_some());
    Ok(())
}

#[tokio::test]
async fn client_config_exposes_flags() -> Result<()> {
    let mut config = test_config();
    config.discovery.max_results = 25;
    config.discovery.enable_infinite_scroll = false;
    config.display.show_ratings = false;
    let server = build_test_server(fixture_gateway(), config);

    let response = server.get("/discovery/config").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["Enabled"], true);
    assert_eq!(body["UpstreamUrl"], "http://seerr.test");
    assert_eq!(body["MaxResults"], 25);
    assert_eq!(body["EnableInfiniteScroll"], false);
    assert_eq!(body["ShowRatings"], false);
    assert_eq!(body["ShowYear"], true);
    assert_eq!(body["ExcludeTalkShows"], true);
    Ok(())
}
