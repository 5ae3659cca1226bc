//! Records API contract tests for `HttpRecordRepository`.

use chrono::NaiveDate;
use kindred::config::ApiConfig;
use kindred::records::{HttpRecordRepository, RecordRepository};
use kindred::{KindredError, Session};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date")
}

fn repo(server: &MockServer, session: Session) -> HttpRecordRepository {
    let config = ApiConfig {
        base_url: server.uri(),
        page_size: 2,
    };
    HttpRecordRepository::new(&config, session).expect("valid config")
}

#[tokio::test]
async fn partner_moods_sends_date_and_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partner/moods"))
        .and(query_param("date", "2024-06-10"))
        .and(query_param("page", "1"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "m1",
                "displayName": "Alex",
                "moodCategory": "great",
                "createdAt": "2024-06-10T08:00:00Z"
            }],
            "page": 1,
            "total_pages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let moods = repo(&server, Session::with_token("t0ken"))
        .partner_moods(date())
        .await
        .expect("fetch succeeds");

    assert_eq!(moods.len(), 1);
    assert_eq!(moods[0].display_name, "Alex");
    assert_eq!(moods[0].mood_category, "great");
}

#[tokio::test]
async fn follows_pagination_until_last_page() {
    let server = MockServer::start().await;

    for (page, name) in [(1, "first"), (2, "second"), (3, "third")] {
        Mock::given(method("GET"))
            .and(path("/activities"))
            .and(query_param("page", page.to_string()))
            .and(query_param("page_size", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"displayName": name, "createdAt": "2024-06-10T08:00:00Z"}],
                "page": page,
                "total_pages": 3
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let activities = repo(&server, Session::default())
        .activities(date())
        .await
        .expect("fetch succeeds");

    let names: Vec<&str> = activities.iter().map(|a| a.display_name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn empty_day_is_ok_and_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/moods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let moods = repo(&server, Session::default())
        .moods(date())
        .await
        .expect("fetch succeeds");
    assert!(moods.is_empty());
}

#[tokio::test]
async fn server_error_is_a_repository_error_not_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partner/activities"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "maintenance"})),
        )
        .mount(&server)
        .await;

    let err = repo(&server, Session::default())
        .partner_activities(date())
        .await
        .expect_err("503 must fail");

    match err {
        KindredError::Repository(msg) => {
            assert!(msg.contains("503"), "message: {msg}");
            assert!(msg.contains("maintenance"), "message: {msg}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unauthorized_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/moods"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&server)
        .await;

    let err = repo(&server, Session::default())
        .moods(date())
        .await
        .expect_err("401 must fail");
    assert!(err.to_string().contains("not authorized"));
}

#[tokio::test]
async fn malformed_body_is_a_repository_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partner/moods"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = repo(&server, Session::default())
        .partner_moods(date())
        .await
        .expect_err("html must fail");
    assert!(matches!(err, KindredError::Repository(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_repository_error() {
    let server = MockServer::start().await;
    let repository = repo(&server, Session::default());
    drop(server);

    let err = repository
        .activities(date())
        .await
        .expect_err("closed server must fail");
    assert!(matches!(err, KindredError::Repository(_)));
}
