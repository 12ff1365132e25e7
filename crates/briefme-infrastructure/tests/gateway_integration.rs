use std::sync::Arc;
use std::time::Duration;

use briefme_core::BriefMeError;
use briefme_core::api::{ApiGateway, HttpMethod, RequestOptions};
use briefme_core::session::{Navigator, SessionStore, User};
use briefme_core::focus::{CloseApps, FocusDuration, FocusModeClient, FocusModeRequest, StatusUpdates};
use briefme_core::storage::{ClientStorage, MemoryClientStorage, TOKEN_KEY};
use briefme_core::summaries::UnreadCountStore;
use briefme_infrastructure::ReqwestApiGateway;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> Arc<ReqwestApiGateway> {
    Arc::new(ReqwestApiGateway::new(&server.uri()).unwrap())
}

#[tokio::test]
async fn every_call_carries_the_bypass_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("ngrok-skip-browser-warning", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let response = gateway
        .call(HttpMethod::Get, "/ping", None, RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!({"ok": true}));
    assert!(response.header("Content-Type").is_some());
}

#[tokio::test]
async fn installed_token_becomes_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway.set_bearer_token(Some("tok-1"));
    let response = gateway
        .call(HttpMethod::Get, "/me", None, RequestOptions::new())
        .await
        .unwrap();

    // Empty body decodes to null
    assert!(response.body.is_null());
}

#[tokio::test]
async fn no_authorization_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway
        .call(HttpMethod::Get, "/anon", None, RequestOptions::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn caller_headers_override_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/override"))
        .and(header("ngrok-skip-browser-warning", "false"))
        .and(header("authorization", "Bearer per-call"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway.set_bearer_token(Some("installed"));
    let options = RequestOptions::new()
        .with_header("Ngrok-Skip-Browser-Warning", "false")
        .with_bearer_token("per-call");

    let response = gateway
        .call(HttpMethod::Post, "/override", None, options)
        .await
        .unwrap();
    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(body_json(json!({"name": "brief"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let response = gateway
        .call_api(
            "post",
            "/items",
            Some(json!({"name": "brief"})),
            RequestOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(response.body["id"], 7);
}

#[tokio::test]
async fn delete_sends_payload_as_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/items"))
        .and(body_json(json!({"ids": [1, 2]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let response = gateway
        .call(
            HttpMethod::Delete,
            "/items",
            Some(json!({"ids": [1, 2]})),
            RequestOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(response.status, 204);
}

#[tokio::test]
async fn get_sends_payload_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/summaries"))
        .and(query_param("page", "2"))
        .and(query_param("channel", "general"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway
        .call(
            HttpMethod::Get,
            "/summaries",
            Some(json!({"page": 2, "channel": "general"})),
            RequestOptions::new(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_verb_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .call_api("TRACE", "/anything", None, RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.name, "ApiError");
    assert_eq!(err.message, "Invalid method: TRACE");
    assert!(err.status.is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn error_status_uses_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthenticated."})))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .call(HttpMethod::Get, "/secret", None, RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.name, "ApiError");
    assert_eq!(err.message, "Unauthenticated.");
    assert_eq!(err.status, Some(401));
    assert_eq!(err.data, Some(json!({"message": "Unauthenticated."})));
}

#[tokio::test]
async fn error_status_without_message_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .call(HttpMethod::Get, "/broken", None, RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.message, "Request failed with status code 500");
    assert_eq!(err.status, Some(500));
    assert_eq!(err.data, Some(json!("boom")));
}

#[tokio::test]
async fn unfollowed_redirect_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .call(HttpMethod::Get, "/cached", None, RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.status, Some(304));
    assert_eq!(err.message, "Request failed with status code 304");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Nothing listens on port 1
    let gateway = ReqwestApiGateway::new("http://127.0.0.1:1").unwrap();
    let err = gateway
        .call(HttpMethod::Get, "/ping", None, RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.name, "ApiError");
    assert!(!err.message.is_empty());
    assert!(err.status.is_none());
    assert!(err.data.is_none());
}

#[tokio::test]
async fn cancellation_aborts_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = gateway
        .call(
            HttpMethod::Get,
            "/slow",
            None,
            RequestOptions::new().with_cancel(cancel),
        )
        .await
        .unwrap_err();

    assert!(err.is_canceled());
    assert_eq!(err.name, "CanceledError");
    assert!(err.status.is_none());
}

#[tokio::test]
async fn unread_refresh_uses_persisted_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/summaries/unread-count"))
        .and(header("authorization", "Bearer stored"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 4})))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryClientStorage::new());
    storage.set_item(TOKEN_KEY, "stored".to_string()).await.unwrap();

    let store = UnreadCountStore::new(gateway_for(&server), storage);
    assert_eq!(store.refresh().await, Some(4));
    assert_eq!(store.count().await, Some(4));
}

#[tokio::test]
async fn unread_refresh_failure_resets_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/summaries/unread-count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 2})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/summaries/unread-count"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = UnreadCountStore::new(gateway_for(&server), Arc::new(MemoryClientStorage::new()));
    assert_eq!(store.refresh().await, Some(2));
    assert_eq!(store.refresh().await, None);
    assert_eq!(store.count().await, None);
}

#[tokio::test]
async fn focus_mode_failure_carries_status_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/focus-mode"))
        .and(header("authorization", "Bearer stored"))
        .and(body_json(json!({
            "duration": 30,
            "closeApps": {"slack": true, "gmail": false, "calendar": false},
            "statusUpdates": {"slack": "Focusing"}
        })))
        .respond_with(ResponseTemplate::new(422).set_body_string("slack not connected"))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryClientStorage::new());
    storage.set_item(TOKEN_KEY, "stored".to_string()).await.unwrap();
    let gateway = Arc::new(ReqwestApiGateway::new(&format!("{}/api", server.uri())).unwrap());
    let client = FocusModeClient::new(gateway, storage);

    let request = FocusModeRequest {
        duration: FocusDuration::Minutes(30),
        close_apps: CloseApps {
            slack: true,
            ..CloseApps::default()
        },
        status_updates: StatusUpdates {
            slack: "Focusing".to_string(),
        },
    };

    match client.activate(&request).await.unwrap_err() {
        BriefMeError::FocusMode { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body, "slack not connected");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

struct StayingNavigator;

impl Navigator for StayingNavigator {
    fn current_path(&self) -> String {
        "/dashboard".to_string()
    }

    fn navigate(&self, _path: &str) {}
}

#[tokio::test]
async fn unread_refresh_drops_credential_after_session_ends() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/summaries/unread-count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1})))
        .mount(&server)
        .await;

    let storage: Arc<dyn ClientStorage> = Arc::new(MemoryClientStorage::new());
    let session = SessionStore::load(storage.clone()).await.unwrap();
    let store = UnreadCountStore::new(gateway_for(&server), storage.clone());
    let user = User {
        id: 1,
        name: "Ada".to_string(),
        email: "ada@example.test".to_string(),
        ..Default::default()
    };

    session.login(user.clone(), Some("old-token".to_string())).await.unwrap();
    store.refresh().await;

    session.goto_login(&StayingNavigator).await.unwrap();
    store.refresh().await;

    session.login(user, Some("second-token".to_string())).await.unwrap();
    store.refresh().await;

    session.logout().await.unwrap();
    store.refresh().await;

    let sent: Vec<Option<String>> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|req| {
            req.headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .collect();

    assert_eq!(
        sent,
        vec![
            Some("Bearer old-token".to_string()),
            None,
            Some("Bearer second-token".to_string()),
            None,
        ]
    );
}
