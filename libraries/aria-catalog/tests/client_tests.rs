//! Tests for the catalog client.
//!
//! These tests use mock servers to verify request shapes, error mapping and
//! normalization without a real catalog.

use aria_catalog::{CatalogClient, CatalogConfig, CatalogError, UNKNOWN_ARTIST};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_client() -> (MockServer, CatalogClient) {
    let mock_server = MockServer::start().await;
    let client = CatalogClient::new(CatalogConfig::new(mock_server.uri())).unwrap();
    (mock_server, client)
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.base_url, "https://saavn.sumit.co");
        assert_eq!(config.page_size, 20);
        assert!(CatalogClient::new(config).is_ok());
    }

    #[test]
    fn test_valid_http_url() {
        let client = CatalogClient::new(CatalogConfig::new("http://localhost:8080")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_empty_url_rejected() {
        match CatalogClient::new(CatalogConfig::new("  ")) {
            Err(CatalogError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = CatalogClient::new(CatalogConfig::new("saavn.sumit.co"));
        assert!(matches!(result, Err(CatalogError::InvalidUrl(_))));
    }

    #[test]
    fn test_ftp_scheme_rejected() {
        let result = CatalogClient::new(CatalogConfig::new("ftp://example.com"));
        assert!(matches!(result, Err(CatalogError::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_page_size_is_raised() {
        let config = CatalogConfig {
            page_size: 0,
            ..CatalogConfig::default()
        };
        assert_eq!(CatalogClient::new(config).unwrap().page_size(), 1);
    }
}

// =============================================================================
// Search Tests
// =============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn test_search_songs_sends_paging_params() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search/songs"))
            .and(query_param("query", "kesariya"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "total": 41,
                    "start": 21,
                    "results": [
                        {
                            "id": "abc",
                            "name": "Kesariya",
                            "duration": "268",
                            "primaryArtists": "Arijit Singh",
                            "image": [
                                {"quality": "50x50", "url": "https://img/50"},
                                {"quality": "150x150", "url": "https://img/150"},
                                {"quality": "500x500", "url": "https://img/500"}
                            ],
                            "downloadUrl": [
                                {"quality": "96kbps", "url": "https://aac/96.mp4"},
                                {"quality": "320kbps", "url": "https://aac/320.mp4"}
                            ]
                        }
                    ]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let page = client.search_songs("kesariya", 2).await.unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total, 41);
        assert!(page.has_more(client.page_size()));
        assert_eq!(page.items.len(), 1);

        let track = &page.items[0];
        assert_eq!(track.id, "abc");
        assert_eq!(track.duration_seconds, 268);
        assert_eq!(track.artist_display_name, "Arijit Singh");
        assert_eq!(track.artwork_url(), Some("https://img/500"));
        assert_eq!(track.stream_url(), Some("https://aac/320.mp4"));
    }

    #[tokio::test]
    async fn test_search_query_is_url_encoded() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search/songs"))
            .and(query_param("query", "rock & roll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"total": 0, "start": 0, "results": []}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let page = client.search_songs("rock & roll", 1).await.unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more(client.page_size()));
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_request() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let page = client.search_songs("   ", 0).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
    }

    #[tokio::test]
    async fn test_search_artists() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search/artists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "total": 1,
                    "start": 1,
                    "results": [
                        {
                            "id": "459320",
                            "name": "Arijit Singh",
                            "role": "singer",
                            "image": [{"quality": "500x500", "url": "https://img/arijit"}],
                            "url": "https://www.jiosaavn.com/artist/arijit-singh"
                        }
                    ]
                }
            })))
            .mount(&mock_server)
            .await;

        let page = client.search_artists("arijit", 1).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Arijit Singh");
        assert_eq!(page.items[0].role.as_deref(), Some("singer"));
        assert_eq!(page.items[0].artwork_url(), Some("https://img/arijit"));
    }

    #[tokio::test]
    async fn test_search_albums_with_credit_list() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search/albums"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "total": 2,
                    "start": 1,
                    "results": [
                        {
                            "id": "al1",
                            "name": "Brahmastra",
                            "year": "2022",
                            "songCount": 5,
                            "primaryArtists": [{"name": "Pritam"}, {"name": "Amitabh Bhattacharya"}],
                            "image": "https://img/brahmastra.jpg"
                        },
                        {
                            "id": "al2",
                            "name": "Untitled",
                            "primaryArtists": ""
                        }
                    ]
                }
            })))
            .mount(&mock_server)
            .await;

        let page = client.search_albums("brahmastra", 1).await.unwrap();
        assert_eq!(page.items.len(), 2);

        let album = &page.items[0];
        assert_eq!(album.artist_display_name, "Pritam, Amitabh Bhattacharya");
        assert_eq!(album.year.as_deref(), Some("2022"));
        assert_eq!(album.song_count, Some(5));
        assert_eq!(album.artwork_url(), Some("https://img/brahmastra.jpg"));

        assert_eq!(page.items[1].artist_display_name, UNKNOWN_ARTIST);
        assert_eq!(page.items[1].year, None);
    }

    #[tokio::test]
    async fn test_search_without_data_is_empty() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&mock_server)
            .await;

        let page = client.search_songs("nothing", 1).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}

// =============================================================================
// Song Detail Tests
// =============================================================================

mod song_detail {
    use super::*;

    #[tokio::test]
    async fn test_get_song() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/songs/IHrIFLbJ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [
                    {
                        "id": "IHrIFLbJ",
                        "name": "Believer",
                        "duration": 204,
                        "artists": {
                            "primary": [{"id": "1", "name": "Imagine Dragons"}],
                            "featured": [],
                            "all": []
                        },
                        "downloadUrl": [
                            {"quality": "12kbps", "url": "https://aac/12.mp4"},
                            {"quality": "160kbps", "url": "https://aac/160.mp4"}
                        ]
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        let track = client.get_song("IHrIFLbJ").await.unwrap().unwrap();
        assert_eq!(track.name, "Believer");
        assert_eq!(track.artist_display_name, "Imagine Dragons");
        assert_eq!(track.duration_seconds, 204);
        assert_eq!(track.stream_url(), Some("https://aac/160.mp4"));
        assert_eq!(track.artwork_url(), None);
    }

    #[tokio::test]
    async fn test_get_song_empty_data_is_none() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/songs/missing"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})),
            )
            .mount(&mock_server)
            .await;

        assert!(client.get_song("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_song_unsuccessful_is_none() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/songs/gone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "song not found"
            })))
            .mount(&mock_server)
            .await;

        assert!(client.get_song("gone").await.unwrap().is_none());
    }
}

// =============================================================================
// Error Handling Tests
// =============================================================================

mod error_handling {
    use super::*;

    #[tokio::test]
    async fn test_server_error_status() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search/songs"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&mock_server)
            .await;

        match client.search_songs("anything", 1).await {
            Err(CatalogError::ServerError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "upstream down");
            }
            other => panic!("Expected ServerError, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_unsuccessful_search_is_api_failure() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search/artists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "rate limited"
            })))
            .mount(&mock_server)
            .await;

        match client.search_artists("anyone", 1).await {
            Err(CatalogError::ApiFailure(message)) => assert_eq!(message, "rate limited"),
            other => panic!("Expected ApiFailure, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("GET"))
            .and(path("/api/search/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let result = client.search_songs("anything", 1).await;
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_error() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let client = CatalogClient::new(CatalogConfig::new(uri)).unwrap();
        let result = client.get_song("abc").await;
        assert!(matches!(result, Err(CatalogError::Request(_))));
    }
}
