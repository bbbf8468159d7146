//! End-to-end session behaviour against a mock task service.

use serde_json::json;
use std::time::Duration;
use taskboard_core::{HealthStatus, Outcome, TaskId};
use taskboard_sync::{Settings, TaskBoardSession};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> Settings {
    Settings::builder()
        .api_url(server.uri())
        .request_timeout_secs(5)
        .build()
}

/// Wait until the first health probe has resolved.
async fn wait_for_probe(session: &TaskBoardSession) -> HealthStatus {
    let mut rx = session.monitor().subscribe();
    let status = tokio::time::timeout(
        Duration::from_secs(5),
        rx.wait_for(|s| *s != HealthStatus::Checking),
    )
    .await
    .expect("Health probe timed out")
    .expect("Monitor dropped")
    .clone();
    status
}

#[tokio::test]
async fn test_add_after_load_puts_new_task_first() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"instance": "web-1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "title": "Buy milk", "completed": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(json!({"title": "Call mom"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "2",
            "title": "Call mom",
            "completed": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = TaskBoardSession::connect(&settings_for(&server)).expect("Failed to connect");
    assert_eq!(session.initial_load().await, Outcome::Applied);

    let controller = session.controller().clone();
    controller.set_input("Call mom").await;
    assert_eq!(controller.submit_input().await, Outcome::Applied);

    let state = controller.snapshot().await;
    let ids: Vec<_> = state.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert!(state.input.is_empty());

    assert_eq!(
        wait_for_probe(&session).await,
        HealthStatus::Online {
            instance: "web-1".to_string()
        }
    );

    session.shutdown().await;
}

#[tokio::test]
async fn test_failing_backend_keeps_state_and_reports_offline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "a1", "title": "Buy milk", "completed": false},
            {"_id": "b2", "title": "Water plants", "completed": true}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/a1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/b2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut session = TaskBoardSession::connect(&settings_for(&server)).expect("Failed to connect");
    assert_eq!(session.initial_load().await, Outcome::Applied);
    let before = session.controller().tasks().await;

    let controller = session.controller();
    assert_eq!(
        controller.toggle_task(&TaskId::from("a1"), false).await,
        Outcome::Failed
    );
    assert_eq!(
        controller.delete_task(&TaskId::from("b2")).await,
        Outcome::Failed
    );
    assert_eq!(controller.tasks().await, before);

    let status = wait_for_probe(&session).await;
    assert_eq!(status, HealthStatus::Offline);
    assert_eq!(status.instance_label(), "");

    session.shutdown().await;
}

#[tokio::test]
async fn test_toggle_and_delete_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "title": "Buy milk", "completed": false},
            {"id": "2", "title": "Call mom", "completed": false}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/1"))
        .and(body_json(json!({"completed": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "title": "Buy milk",
            "completed": true
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = TaskBoardSession::connect(&settings_for(&server)).expect("Failed to connect");
    session.initial_load().await;

    let controller = session.controller();
    assert!(controller.toggle_task(&TaskId::from("1"), false).await.is_applied());
    assert!(controller.delete_task(&TaskId::from("2")).await.is_applied());

    let tasks = controller.tasks().await;
    assert_eq!(tasks.len(), 1);
    assert!(tasks.as_slice()[0].completed);

    assert_eq!(wait_for_probe(&session).await.instance_label(), "unknown");

    session.shutdown().await;
}

#[test]
fn test_connect_rejects_invalid_url() {
    let settings = Settings::builder().api_url("::not-a-url").build();
    assert!(TaskBoardSession::connect(&settings).is_err());
}
