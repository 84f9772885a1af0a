///! Tests for the request status machine, the evaluation party rules and
///! rating aggregation. All pure functions; no database needed.
///!
///! Run with: `cargo test --test lifecycle_test`
use uuid::Uuid;

use servihub_backend::db::evaluations::mean_rating;
use servihub_backend::errors::ApiError;
use servihub_backend::handlers::evaluations::check_evaluation_parties;
use servihub_backend::models::requests::RequestStatus;

// ── request status machine ──

#[test]
fn test_open_request_transitions() {
    let open = RequestStatus::Open;

    assert!(open.can_transition_to(&RequestStatus::InProgress));
    assert!(open.can_transition_to(&RequestStatus::Cancelled));
    assert!(!open.can_transition_to(&RequestStatus::Completed));
    assert!(!open.can_transition_to(&RequestStatus::Open));
}

#[test]
fn test_in_progress_request_transitions() {
    let in_progress = RequestStatus::InProgress;

    assert!(in_progress.can_transition_to(&RequestStatus::Completed));
    assert!(in_progress.can_transition_to(&RequestStatus::Cancelled));
    assert!(!in_progress.can_transition_to(&RequestStatus::Open));
    assert!(!in_progress.can_transition_to(&RequestStatus::InProgress));
}

#[test]
fn test_terminal_statuses_allow_nothing() {
    for terminal in [RequestStatus::Completed, RequestStatus::Cancelled] {
        for next in [
            RequestStatus::Open,
            RequestStatus::InProgress,
            RequestStatus::Completed,
            RequestStatus::Cancelled,
        ] {
            assert!(
                !terminal.can_transition_to(&next),
                "{terminal:?} must not move to {next:?}"
            );
        }
    }
}

// ── evaluation party rules ──

#[test]
fn test_client_evaluates_accepted_provider() {
    let client = Uuid::new_v4();
    let provider = Uuid::new_v4();

    assert!(check_evaluation_parties(client, client, provider, Some(provider)).is_ok());
}

#[test]
fn test_accepted_provider_evaluates_client() {
    let client = Uuid::new_v4();
    let provider = Uuid::new_v4();

    assert!(check_evaluation_parties(client, provider, client, Some(provider)).is_ok());
}

#[test]
fn test_client_cannot_evaluate_unrelated_user() {
    let client = Uuid::new_v4();
    let provider = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let err = check_evaluation_parties(client, client, stranger, Some(provider)).unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[test]
fn test_client_cannot_evaluate_without_accepted_proposal() {
    let client = Uuid::new_v4();
    let provider = Uuid::new_v4();

    let err = check_evaluation_parties(client, client, provider, None).unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[test]
fn test_losing_provider_cannot_evaluate() {
    let client = Uuid::new_v4();
    let winner = Uuid::new_v4();
    let loser = Uuid::new_v4();

    let err = check_evaluation_parties(client, loser, client, Some(winner)).unwrap_err();
    match err {
        ApiError::Conflict(msg) => assert!(msg.contains("did not work")),
        other => panic!("Expected a conflict, got {other:?}"),
    }
}

#[test]
fn test_provider_may_only_evaluate_the_client() {
    let client = Uuid::new_v4();
    let provider = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let err = check_evaluation_parties(client, provider, stranger, Some(provider)).unwrap_err();
    match err {
        ApiError::Conflict(msg) => assert!(msg.contains("client")),
        other => panic!("Expected a conflict, got {other:?}"),
    }
}

// ── rating aggregation ──

#[test]
fn test_mean_rating_of_nothing_is_zero() {
    assert_eq!(mean_rating(&[]), 0.0);
}

#[test]
fn test_mean_rating_rounds_to_two_decimals() {
    assert_eq!(mean_rating(&[5]), 5.0);
    assert_eq!(mean_rating(&[4, 5]), 4.5);
    assert_eq!(mean_rating(&[5, 3, 4]), 4.0);
    assert_eq!(mean_rating(&[3, 4, 4]), 3.67);
}
