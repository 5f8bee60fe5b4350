use std::path::Path;

use chrono::NaiveDate;
use lib::admin::drafts::{
    create_preview_link, fetch_preview, list_drafts, share_preview, PreviewState,
};
use lib::admin::models::{Args, Command};
use lib::admin::run_tool::run;
use lib::api::auth::{read_token, write_token};
use lib::api::models::Config;
use lib::api::{ApiClient, ApiError};
use lib::viewer::schedule_getter::ScheduleGetter;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_config(server: &MockServer, token_path: &Path) -> Config {
    Config {
        api_base_url: format!("{}/api/", server.uri()),
        preview_base_url: "https://uni.example/preview".to_string(),
        token_path: token_path.to_path_buf(),
        timeout_secs: 5,
    }
}

fn schedule(id: u32, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "eventType": "Lecture",
        "startTime": "10:15:00",
        "endTime": "11:45:00",
        "days": ["Monday"],
        "academicYear": "2024-2025",
        "year": 2,
        "status": status,
        "subjectName": "Algorithms",
        "instructorName": "Ada Lovelace",
        "semesterName": "Spring",
        "locationName": "Room 101",
        "subjectId": 11,
        "instructorId": 21,
        "semesterId": 31,
        "locationId": 41
    })
}

async fn client_with_token(server: &MockServer, dir: &TempDir, token: Option<&str>) -> ApiClient {
    let token_path = dir.path().join("token.json");
    if let Some(token) = token {
        write_token(&token_path, token).unwrap();
    }
    ApiClient::new(&make_config(server, &token_path)).unwrap()
}

#[tokio::test]
async fn stored_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/schedules"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([schedule(1, "published")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, &dir, Some("secret-token")).await;
    let schedules = client.get_schedules().await.unwrap();

    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].subject_name, "Algorithms");
}

#[tokio::test]
async fn login_persists_the_token() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token.json");
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": "admin", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "fresh" })))
        .mount(&server)
        .await;

    let mut client = ApiClient::new(&make_config(&server, &token_path)).unwrap();
    assert_eq!(client.token(), None);
    client.login("admin", "hunter2", &token_path).await.unwrap();

    assert_eq!(client.token(), Some("fresh"));
    assert_eq!(read_token(&token_path).unwrap(), Some("fresh".to_string()));
}

#[tokio::test]
async fn corrupted_token_file_is_ignored_and_can_be_removed() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token.json");
    std::fs::write(&token_path, "not json").unwrap();
    let config = make_config(&server, &token_path);

    let mut client = ApiClient::new(&config).unwrap();
    assert_eq!(client.token(), None);

    let args = Args {
        config_json_path: dir.path().join("config.json"),
        yes: false,
        command: Command::Logout,
    };
    let today = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let report = run(&args, &config, &mut client, today).await.unwrap();

    assert_eq!(report, "Logged out");
    assert!(!token_path.exists());
}

#[tokio::test]
async fn server_errors_keep_status_and_body() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/exams"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
        .mount(&server)
        .await;

    let client = client_with_token(&server, &dir, None).await;

    match client.get_exams().await {
        Err(ApiError::Status { status, path, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(path, "/exams");
            assert_eq!(body, "database is down");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn drafts_are_listed_by_status() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/schedules"))
        .and(query_param("status", "draft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([schedule(5, "draft")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, &dir, Some("t")).await;
    let drafts = list_drafts(&client).await.unwrap();

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, 5);
}

#[tokio::test]
async fn preview_link_is_built_from_the_issued_token() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("POST"))
        .and(path("/api/schedules/preview"))
        .and(body_json(json!({ "scheduleIds": [5, 6] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc-123" })))
        .mount(&server)
        .await;

    let client = client_with_token(&server, &dir, Some("t")).await;
    let link = create_preview_link(&client, "https://uni.example/preview/", &[5, 6])
        .await
        .unwrap();

    assert_eq!(link, "https://uni.example/preview/abc-123");
}

#[tokio::test]
async fn preview_is_ready_with_metadata() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/schedules/preview/abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schedules": [schedule(5, "draft")],
            "metadata": { "title": "Spring draft", "expiresAt": "2025-03-10T00:00:00Z" }
        })))
        .mount(&server)
        .await;

    let client = client_with_token(&server, &dir, None).await;

    match fetch_preview(&client, "abc-123").await.unwrap() {
        PreviewState::Ready(preview) => {
            assert_eq!(preview.schedules.len(), 1);
            assert_eq!(preview.metadata.title.as_deref(), Some("Spring draft"));
            assert_eq!(
                preview.metadata.expires_at.as_deref(),
                Some("2025-03-10T00:00:00Z")
            );
            assert_eq!(preview.metadata.academic_year, None);
        }
        PreviewState::NotFound => panic!("preview should be ready"),
    }
}

#[tokio::test]
async fn unknown_preview_is_not_found() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/schedules/preview/expired"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_with_token(&server, &dir, None).await;

    assert_eq!(
        fetch_preview(&client, "expired").await.unwrap(),
        PreviewState::NotFound
    );
}

#[tokio::test]
async fn malformed_preview_token_is_never_sent() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_with_token(&server, &dir, None).await;

    assert_eq!(
        fetch_preview(&client, "../admin").await.unwrap(),
        PreviewState::NotFound
    );
    assert_eq!(fetch_preview(&client, "").await.unwrap(), PreviewState::NotFound);
}

#[tokio::test]
async fn preview_link_is_shared_by_email() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("POST"))
        .and(path("/api/email/send"))
        .and(body_partial_json(json!({
            "to": "dean@uni.example",
            "subject": "Schedule draft preview"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, &dir, Some("t")).await;

    share_preview(&client, "https://uni.example/preview/abc-123", "dean@uni.example")
        .await
        .unwrap();
}
