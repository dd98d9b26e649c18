// End-to-end scenario tests against a mocked CareFlow backend.
//
// Each test wires up exactly the endpoints a run is allowed to touch and
// pins the rest to zero expected calls, so step short-circuiting is
// verified by the mock server itself.

use careflow_client::{ApiClientError, CareFlowClient};
use careflow_config::RunnerConfig;
use careflow_scenario::{ScenarioOutcome, ScenarioRunner};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";
const DATE: &str = "2025-09-01";

fn runner_for(server: &MockServer) -> ScenarioRunner {
    let client = CareFlowClient::new(&server.uri(), API_KEY, Some(5)).expect("client should build");
    let runner_config = RunnerConfig {
        default_date: Some(DATE.to_string()),
        patient_ref: "patient-001".to_string(),
        visit_type: "screening".to_string(),
        cancel_reason: Some("scenario cleanup".to_string()),
        provider: None,
    };
    ScenarioRunner::new(client, &runner_config)
}

fn slot_json(hour: u8) -> serde_json::Value {
    json!({
        "start": format!("{DATE}T{hour:02}:00:00"),
        "end": format!("{DATE}T{hour:02}:40:00"),
        "provider": "Dr. Lee"
    })
}

async fn mount_health(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("x-api-key", API_KEY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "api_key_present": true})),
        )
        .mount(server)
        .await;
}

async fn mount_slots(server: &MockServer, slots: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/slots"))
        .and(query_param("date", DATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "slots": slots })))
        .mount(server)
        .await;
}

/// Pins an endpoint that the run under test must never reach.
async fn forbid(server: &MockServer, http_method: &str, endpoint: &str) {
    Mock::given(method(http_method))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn empty_calendar_is_a_no_op_success() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    mount_slots(&server, vec![]).await;
    forbid(&server, "POST", "/book").await;
    forbid(&server, "POST", "/reschedule").await;
    forbid(&server, "POST", "/cancel").await;

    let outcome = runner_for(&server).run(DATE).await.unwrap();
    assert_eq!(outcome, ScenarioOutcome::NoSlots);
    assert_eq!(outcome.exit_code(), 0);
}

#[tokio::test]
async fn single_slot_books_and_cancels_without_reschedule() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    mount_slots(&server, vec![slot_json(9)]).await;
    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "booking_id": "ab12cd34",
            "status": "created"
        })))
        .expect(1)
        .mount(&server)
        .await;
    forbid(&server, "POST", "/reschedule").await;
    Mock::given(method("POST"))
        .and(path("/cancel"))
        .and(body_json(json!({
            "booking_id": "ab12cd34",
            "reason": "scenario cleanup"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "booking_id": "ab12cd34",
            "status": "canceled",
            "reason": "scenario cleanup"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = runner_for(&server).run(DATE).await.unwrap();
    assert_eq!(
        outcome,
        ScenarioOutcome::Completed {
            booking_id: "ab12cd34".to_string(),
            rescheduled: false
        }
    );
    assert_eq!(outcome.exit_code(), 0);
}

#[tokio::test]
async fn two_slots_book_first_reschedule_to_second_then_cancel() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    mount_slots(&server, vec![slot_json(9), slot_json(10)]).await;
    // Book must target slot[0].
    Mock::given(method("POST"))
        .and(path("/book"))
        .and(body_json(json!({
            "patient_ref": "patient-001",
            "start": format!("{DATE}T09:00:00"),
            "end": format!("{DATE}T09:40:00"),
            "provider": "Dr. Lee",
            "visit_type": "screening"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "booking_id": "ab12cd34",
            "status": "created"
        })))
        .expect(1)
        .mount(&server)
        .await;
    // Reschedule must target slot[1] with the same booking id.
    Mock::given(method("POST"))
        .and(path("/reschedule"))
        .and(body_json(json!({
            "booking_id": "ab12cd34",
            "new_start": format!("{DATE}T10:00:00"),
            "new_end": format!("{DATE}T10:40:00")
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "booking_id": "ab12cd34",
            "status": "rescheduled"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "booking_id": "ab12cd34",
            "status": "canceled",
            "reason": "scenario cleanup"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = runner_for(&server).run(DATE).await.unwrap();
    assert_eq!(
        outcome,
        ScenarioOutcome::Completed {
            booking_id: "ab12cd34".to_string(),
            rescheduled: true
        }
    );
}

#[tokio::test]
async fn server_error_aborts_before_any_booking_call() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    Mock::given(method("GET"))
        .and(path("/slots"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "backend exploded"})),
        )
        .mount(&server)
        .await;
    forbid(&server, "POST", "/book").await;
    forbid(&server, "POST", "/reschedule").await;
    forbid(&server, "POST", "/cancel").await;

    let err = runner_for(&server).run(DATE).await.unwrap_err();
    match err {
        ApiClientError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "backend exploded");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unconfirmed_booking_reports_without_cleanup() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    mount_slots(&server, vec![slot_json(9), slot_json(10)]).await;
    // 2xx, but the id is gone: someone else won the slot.
    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "created"})))
        .expect(1)
        .mount(&server)
        .await;
    forbid(&server, "POST", "/reschedule").await;
    forbid(&server, "POST", "/cancel").await;

    let outcome = runner_for(&server).run(DATE).await.unwrap();
    assert_eq!(outcome, ScenarioOutcome::BookingUnconfirmed);
    assert_eq!(outcome.exit_code(), 1);
}

#[tokio::test]
async fn garbled_health_body_aborts_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;
    forbid(&server, "GET", "/slots").await;
    forbid(&server, "POST", "/book").await;

    let err = runner_for(&server).run(DATE).await.unwrap_err();
    assert!(matches!(err, ApiClientError::Decode(_)));
}
