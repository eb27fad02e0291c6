/// Common test utilities and fixtures
use aria_catalog::{CatalogClient, CatalogConfig};
use aria_cli::{AriaSettings, Session};
use aria_storage::MemoryKeyValueStore;
use aria_transport::SilentBackend;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Settings with a fast status interval so real-clock tests stay short
pub fn test_settings() -> AriaSettings {
    let mut settings = AriaSettings::default();
    settings.transport.status_interval_ms = 50;
    settings
}

pub fn catalog_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(CatalogConfig::new(server.uri())).unwrap()
}

pub fn song_json(id: &str, seconds: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Song {id}"),
        "duration": seconds,
        "primaryArtists": "Test Artist",
        "downloadUrl": [
            {"quality": "96kbps", "url": format!("https://cdn.test/{id}_96.mp4")},
            {"quality": "320kbps", "url": format!("https://cdn.test/{id}_320.mp4")}
        ]
    })
}

/// Serve `/api/songs/{id}` for each id
pub async fn mount_songs(server: &MockServer, ids: &[&str]) {
    for id in ids {
        Mock::given(method("GET"))
            .and(path(format!("/api/songs/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [song_json(id, 180)]
            })))
            .mount(server)
            .await;
    }
}

pub async fn start_session(
    server: &MockServer,
    store: &MemoryKeyValueStore,
    backend: SilentBackend,
) -> Session {
    Session::start(
        &test_settings(),
        Arc::new(store.clone()),
        catalog_for(server),
        backend,
    )
    .await
}

pub fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}
