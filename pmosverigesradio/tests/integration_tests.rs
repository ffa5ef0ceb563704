//! Integration tests for pmosverigesradio

use pmosverigesradio::{
    Context, Error, Gateway, MemoryCache, RecordingNotifier, Route, SverigesRadioClient,
    SverigesRadioSource,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(mock_server: &MockServer) -> SverigesRadioClient {
    SverigesRadioClient::builder()
        .base_url(format!("{}/api/v2", mock_server.uri()))
        .build()
        .await
        .unwrap()
}

fn mock_channels_json() -> serde_json::Value {
    json!({
        "copyright": "Copyright Sveriges Radio 2015. All rights reserved.",
        "channels": [
            {
                "id": 132,
                "name": "P1",
                "image": "https://static-cdn.sr.se/images/132/p1.png",
                "liveaudio": { "id": 132, "url": "https://sverigesradio.se/topsy/direkt/132-hi.mp3" }
            },
            {
                "id": 164,
                "name": "P3",
                "image": "https://static-cdn.sr.se/images/164/p3.png",
                "liveaudio": { "id": 164, "url": "https://sverigesradio.se/topsy/direkt/164-hi.mp3" }
            }
        ]
    })
}

#[tokio::test]
async fn test_fetch_sends_common_parameters_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/channels"))
        .and(query_param("format", "json"))
        .and(query_param("pagination", "false"))
        .and(query_param("audioquality", "hi"))
        .and(query_param("liveaudiotemplateid", "5"))
        .and(header("accept", "application/json"))
        .and(header("accept-charset", "utf-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_channels_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let body = client
        .fetch(
            "channels",
            &[
                ("audioquality", "hi".to_string()),
                ("liveaudiotemplateid", "5".to_string()),
            ],
        )
        .await
        .unwrap();

    assert_eq!(body["channels"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_server_error_is_transport_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/sport/leagues"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client.fetch("sport/leagues", &[]).await;

    assert!(matches!(result, Err(Error::Transport { .. })));
}

#[tokio::test]
async fn test_invalid_body_is_parse_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/programcategories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client.fetch("programcategories", &[]).await;

    assert!(matches!(result, Err(Error::Parse { .. })));
}

#[tokio::test]
async fn test_live_listing_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/channels"))
        .and(query_param("audioquality", "normal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_channels_json()))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let source = SverigesRadioSource::new(Context::builder(Arc::new(client)).build());

    let listing = source.open(&Route::Live).await.unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing.items[0].label, "P1");
    assert_eq!(
        listing.items[1].target.url(),
        "https://sverigesradio.se/topsy/direkt/164-hi.mp3"
    );
}

#[tokio::test]
async fn test_program_listing_uses_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/episodes"))
        .and(query_param("programid", "4540"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "episodes": [{
                "title": "Ekot 16.45",
                "description": "Senaste nytt",
                "imageurl": "https://static-cdn.sr.se/images/4540/ekot.jpg",
                "downloadpodfile": {
                    "url": "https://sverigesradio.se/topsy/ljudfil/5678.mp3",
                    "publishdateutc": "/Date(1445869200000)/",
                    "duration": 900,
                    "filesizeinbytes": 7200000
                }
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/programs/4540"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "program": { "id": 4540, "name": "Ekot" } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let source = SverigesRadioSource::new(
        Context::builder(Arc::new(client))
            .cache(Arc::new(MemoryCache::default()))
            .notifier(notifier.clone())
            .build(),
    );

    for _ in 0..2 {
        let listing = source.browse("/program/4540").await.unwrap();
        assert_eq!(listing.len(), 1);
        let item = &listing.items[0];
        assert_eq!(item.label, "Ekot 16.45 - Senaste nytt");
        let info = item.info.as_ref().unwrap();
        assert_eq!(info.album.as_deref(), Some("Ekot"));
        assert_eq!(info.date.as_deref(), Some("26.10.2015"));
        assert_eq!(info.size_bytes, Some(7200000));
    }

    assert!(notifier.notices().is_empty());
}
