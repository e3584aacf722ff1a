//! End-to-end tests of the admin client over the reqwest transport.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use stitch_application::{BasicStitchClient, ClientError, ErrorKind, StitchClient};
use stitch_domain::{ApiKeyProvider, UserPasswordProvider};
use stitch_infrastructure::{ClientSettings, ReqwestHttpClient};
use tokio::io::AsyncReadExt;
use wiremock::matchers::{body_bytes, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(base_url: &str) -> ReqwestHttpClient {
    let settings = ClientSettings {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ClientSettings::default()
    };
    ReqwestHttpClient::new(&settings).unwrap()
}

fn client(server: &MockServer) -> BasicStitchClient<ReqwestHttpClient> {
    BasicStitchClient::new(Arc::new(transport(&server.uri())))
}

fn authed_client(server: &MockServer) -> BasicStitchClient<ReqwestHttpClient> {
    let transport = transport(&server.uri()).with_access_token("access-token");
    BasicStitchClient::new(Arc::new(transport))
}

#[tokio::test]
async fn test_authenticate_posts_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/v3.0/auth/providers/mongodb-cloud/login"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"username": "jane", "apiKey": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-token",
            "refresh_token": "refresh-token",
            "user_id": "user-1",
            "device_id": "000000000000000000000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = client(&server)
        .authenticate(&ApiKeyProvider::new("jane", "secret"))
        .await
        .unwrap();

    assert_eq!(auth.access_token, "access-token");
    assert_eq!(auth.refresh_token, "refresh-token");
    assert_eq!(auth.user_id, "user-1");
}

#[tokio::test]
async fn test_authenticate_rejected_reports_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/v3.0/auth/providers/local-userpass/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": "invalid username/password"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .authenticate(&UserPasswordProvider::new("jane", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(
        err.to_string(),
        "401 Unauthorized: failed to authenticate: error: invalid username/password"
    );
}

#[tokio::test]
async fn test_export_streams_archive_with_filename() {
    let server = MockServer::start().await;
    let archive: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();

    Mock::given(method("GET"))
        .and(path("/api/admin/v3.0/groups/group-1/apps/app-1/export"))
        .and(header("Authorization", "Bearer access-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Content-Disposition",
                    "attachment; filename=\"my-app_2024.zip\"",
                )
                .set_body_bytes(archive.clone()),
        )
        .mount(&server)
        .await;

    let mut exported = authed_client(&server)
        .export("group-1", "app-1")
        .await
        .unwrap();

    let mut received = Vec::new();
    exported.archive.read_to_end(&mut received).await.unwrap();

    assert_eq!(exported.filename, "my-app_2024.zip");
    assert_eq!(received.len(), archive.len());
    assert!(received == archive);
}

#[tokio::test]
async fn test_export_failure_uses_raw_body_when_not_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/v3.0/groups/group-1/apps/app-1/export"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = authed_client(&server)
        .export("group-1", "app-1")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "error: upstream exploded");
    assert_eq!(
        err.service_error().map(|e| e.message().to_string()),
        Some("upstream exploded".to_string())
    );
}

#[tokio::test]
async fn test_import_sends_archive_with_strategy() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/v3.0/groups/group-1/apps/app-1/import"))
        .and(query_param("strategy", "merge"))
        .and(body_bytes(b"{\"name\":\"my-app\"}".to_vec()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    authed_client(&server)
        .import("group-1", "app-1", b"{\"name\":\"my-app\"}", "merge")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_import_rejects_ok_instead_of_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/v3.0/groups/group-1/apps/app-1/import"))
        .respond_with(ResponseTemplate::new(200).set_body_string("imported"))
        .mount(&server)
        .await;

    let err = authed_client(&server)
        .import("group-1", "app-1", b"{}", "merge")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.to_string(), "error: imported");
}

#[tokio::test]
async fn test_import_failure_reports_service_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/v3.0/groups/group-1/apps/app-1/import"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "bad strategy"})),
        )
        .mount(&server)
        .await;

    let err = authed_client(&server)
        .import("group-1", "app-1", b"{}", "bogus")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Service(_)));
    assert_eq!(err.to_string(), "error: bad strategy");
}

#[tokio::test]
async fn test_diff_requests_dry_run() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/v3.0/groups/group-1/apps/app-1/import"))
        .and(query_param("strategy", "merge"))
        .and(query_param("diff", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "+ added function foo",
            "- removed service bar"
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let changes = authed_client(&server)
        .diff("group-1", "app-1", b"{}", "merge")
        .await
        .unwrap();

    assert_eq!(
        changes,
        vec![
            "+ added function foo".to_string(),
            "- removed service bar".to_string()
        ]
    );
}

#[tokio::test]
async fn test_fetch_app_searches_groups_in_profile_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/v3.0/auth/profile"))
        .and(header("Authorization", "Bearer access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "roles": [
                {"role_name": "GROUP_OWNER", "group_id": "hidden"},
                {"role_name": "GROUP_OWNER", "group_id": "empty"},
                {"role_name": "GROUP_OWNER", "group_id": "target"}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/v3.0/groups/hidden/apps"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no access"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/v3.0/groups/empty/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/v3.0/groups/target/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "app-0", "client_app_id": "other-abcde", "name": "other", "group_id": "target"},
            {"_id": "app-1", "client_app_id": "my-app-abcde", "name": "my-app", "group_id": "target"}
        ])))
        .mount(&server)
        .await;

    let app = authed_client(&server)
        .fetch_app_by_client_app_id("my-app-abcde")
        .await
        .unwrap();

    assert_eq!(app.id, "app-1");
    assert_eq!(app.name, "my-app");
    assert_eq!(app.group_id, "target");
}

#[tokio::test]
async fn test_fetch_app_reports_missing_app() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/v3.0/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "roles": [{"role_name": "GROUP_OWNER", "group_id": "g1"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/v3.0/groups/g1/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = authed_client(&server)
        .fetch_app_by_client_app_id("missing-app")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.to_string(), "unable to find app with ID: \"missing-app\"");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let address = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let client = BasicStitchClient::new(Arc::new(transport(&format!("http://{address}"))));
    let err = client.export("group-1", "app-1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/v3.0/auth/profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"roles": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        base_url: server.uri(),
        timeout_secs: 1,
        ..ClientSettings::default()
    };
    let client = BasicStitchClient::new(Arc::new(ReqwestHttpClient::new(&settings).unwrap()));

    let err = client
        .fetch_app_by_client_app_id("my-app-abcde")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}
