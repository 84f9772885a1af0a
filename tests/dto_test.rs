///! Wire-format tests for the auth/request/evaluation payloads: serde
///! defaults, unknown-field handling, enum spellings and field validation.
///!
///! Run with: `cargo test --test dto_test`
use serde_json::json;
use validator::Validate;

use servihub_backend::models::evaluations::CreateEvaluation;
use servihub_backend::models::proposals::ProposalStatus;
use servihub_backend::models::requests::{
    CreateServiceRequest, RequestStatus, UpdateServiceRequest, Urgency,
};
use servihub_backend::models::users::{RegisterUser, UserType};

fn request_body() -> serde_json::Value {
    json!({
        "category_id": "7a1e3b58-63af-4f3f-bd2e-6a54a2a0a001",
        "title": "Fix the kitchen sink",
        "description": "The drain leaks under the counter.",
        "address": "Rua das Flores 123",
        "city": "São Paulo",
        "state": "SP",
        "zip_code": "01310-100",
    })
}

// ── service request payloads ──

#[test]
fn test_create_request_defaults_urgency_to_normal() {
    let parsed: CreateServiceRequest = serde_json::from_value(request_body()).unwrap();

    assert_eq!(parsed.urgency, Urgency::Normal);
    assert!(parsed.budget_min.is_none());
    assert!(parsed.preferred_date.is_none());
}

#[test]
fn test_create_request_accepts_explicit_urgency() {
    let mut body = request_body();
    body["urgency"] = json!("urgent");

    let parsed: CreateServiceRequest = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.urgency, Urgency::Urgent);
}

#[test]
fn test_create_request_rejects_unknown_urgency() {
    let mut body = request_body();
    body["urgency"] = json!("asap");

    assert!(serde_json::from_value::<CreateServiceRequest>(body).is_err());
}

#[test]
fn test_create_request_requires_title() {
    let mut body = request_body();
    body.as_object_mut().unwrap().remove("title");

    assert!(serde_json::from_value::<CreateServiceRequest>(body).is_err());
}

#[test]
fn test_create_request_validates_blank_fields() {
    let mut body = request_body();
    body["title"] = json!("");

    let parsed: CreateServiceRequest = serde_json::from_value(body).unwrap();
    let err = parsed.validate().unwrap_err().to_string();
    assert!(err.contains("Title is required"));
}

#[test]
fn test_update_request_ignores_unknown_fields() {
    // client_id and category_id are not writable after creation; sending
    // them must not fail, they just fall on the floor.
    let parsed: UpdateServiceRequest = serde_json::from_value(json!({
        "title": "New title",
        "category_id": "7a1e3b58-63af-4f3f-bd2e-6a54a2a0a001",
        "client_id": "7a1e3b58-63af-4f3f-bd2e-6a54a2a0a002",
    }))
    .unwrap();

    assert_eq!(parsed.title.as_deref(), Some("New title"));
    assert!(parsed.status.is_none());
}

#[test]
fn test_update_request_parses_status() {
    let parsed: UpdateServiceRequest =
        serde_json::from_value(json!({ "status": "completed" })).unwrap();

    assert_eq!(parsed.status, Some(RequestStatus::Completed));
}

#[test]
fn test_enum_wire_spellings() {
    assert_eq!(
        serde_json::to_value(RequestStatus::InProgress).unwrap(),
        json!("in_progress")
    );
    assert_eq!(serde_json::to_value(Urgency::Low).unwrap(), json!("low"));
    assert_eq!(
        serde_json::to_value(UserType::Provider).unwrap(),
        json!("provider")
    );
    assert_eq!(
        serde_json::to_value(ProposalStatus::Pending).unwrap(),
        json!("pending")
    );
}

// ── registration payloads ──

fn register_body() -> RegisterUser {
    serde_json::from_value(json!({
        "name": "Maria Silva",
        "email": "maria@example.com",
        "password": "secret123",
        "user_type": "client",
    }))
    .unwrap()
}

#[test]
fn test_register_accepts_valid_input() {
    assert!(register_body().validate().is_ok());
}

#[test]
fn test_register_rejects_bad_email() {
    let mut input = register_body();
    input.email = "not-an-email".to_string();

    let err = input.validate().unwrap_err().to_string();
    assert!(err.contains("Email is invalid"));
}

#[test]
fn test_register_rejects_short_password() {
    let mut input = register_body();
    input.password = "12345".to_string();

    let err = input.validate().unwrap_err().to_string();
    assert!(err.contains("at least 6 characters"));
}

#[test]
fn test_register_rejects_unknown_role() {
    let result = serde_json::from_value::<RegisterUser>(json!({
        "name": "Maria Silva",
        "email": "maria@example.com",
        "password": "secret123",
        "user_type": "admin",
    }));

    assert!(result.is_err());
}

// ── evaluation payloads ──

fn evaluation_body(rating: i32) -> CreateEvaluation {
    serde_json::from_value(json!({
        "service_request_id": "7a1e3b58-63af-4f3f-bd2e-6a54a2a0a003",
        "evaluated_id": "7a1e3b58-63af-4f3f-bd2e-6a54a2a0a004",
        "rating": rating,
    }))
    .unwrap()
}

#[test]
fn test_evaluation_rating_bounds() {
    assert!(evaluation_body(1).validate().is_ok());
    assert!(evaluation_body(5).validate().is_ok());
    assert!(evaluation_body(0).validate().is_err());
    assert!(evaluation_body(6).validate().is_err());
}

#[test]
fn test_evaluation_subscores_are_optional_but_bounded() {
    let mut input = evaluation_body(4);
    assert!(input.validate().is_ok());

    input.punctuality = Some(6);
    let err = input.validate().unwrap_err().to_string();
    assert!(err.contains("Punctuality"));
}
