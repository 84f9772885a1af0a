///! Tests pinning the SQL generated by the query layer: provider search
///! must match case-insensitively, and proposal status flips must only
///! ever move a row that is still pending.
///!
///! Run with: `cargo test --test query_test`
use chrono::Utc;
use sea_orm::{DbBackend, QueryTrait};
use uuid::Uuid;

use servihub_backend::db::proposals::pending_status_update;
use servihub_backend::db::users::provider_search_query;
use servihub_backend::models::proposals::ProposalStatus;
use servihub_backend::models::provider_services::ProviderSearchQuery;

fn search_sql(query: &ProviderSearchQuery, provider_ids: Option<Vec<Uuid>>) -> String {
    provider_search_query(query, provider_ids)
        .build(DbBackend::Postgres)
        .to_string()
}

// ── provider search ──

#[test]
fn test_city_and_state_filters_are_case_insensitive() {
    let query = ProviderSearchQuery {
        city: Some("sao paulo".to_string()),
        state: Some("sp".to_string()),
        ..Default::default()
    };

    let sql = search_sql(&query, None);
    assert!(sql.contains(r#""city" ILIKE '%sao paulo%'"#), "got: {sql}");
    assert!(sql.contains(r#""state" ILIKE '%sp%'"#), "got: {sql}");
    // A case-sensitive LIKE would miss rows stored as "São Paulo".
    assert!(!sql.contains(" LIKE "), "got: {sql}");
}

#[test]
fn test_keyword_matches_name_or_bio_case_insensitively() {
    let query = ProviderSearchQuery {
        keyword: Some("encanador".to_string()),
        ..Default::default()
    };

    let sql = search_sql(&query, None);
    assert!(sql.contains(r#""name" ILIKE '%encanador%'"#), "got: {sql}");
    assert!(sql.contains(r#""bio" ILIKE '%encanador%'"#), "got: {sql}");
    assert!(sql.contains(" OR "), "name and bio are alternatives: {sql}");
}

#[test]
fn test_search_only_lists_active_verified_providers() {
    let sql = search_sql(&ProviderSearchQuery::default(), None);

    assert!(sql.contains(r#""user_type" = 'provider'"#), "got: {sql}");
    assert!(sql.contains(r#""is_active" = TRUE"#), "got: {sql}");
    assert!(sql.contains(r#""is_verified" = TRUE"#), "got: {sql}");
    assert!(sql.contains("LIMIT 50"), "got: {sql}");
}

#[test]
fn test_min_rating_is_a_floor() {
    let query = ProviderSearchQuery {
        min_rating: Some(3.5),
        ..Default::default()
    };

    let sql = search_sql(&query, None);
    assert!(sql.contains(r#""average_rating" >= 3.5"#), "got: {sql}");
}

#[test]
fn test_category_filter_narrows_by_provider_ids() {
    let id = Uuid::new_v4();
    let sql = search_sql(&ProviderSearchQuery::default(), Some(vec![id]));

    assert!(sql.contains(r#""id" IN"#), "got: {sql}");
    assert!(sql.contains(&id.to_string()), "got: {sql}");
}

// ── proposal status flips ──

#[test]
fn test_status_flips_only_write_pending_rows() {
    for (next, spelled) in [
        (ProposalStatus::Accepted, "'accepted'"),
        (ProposalStatus::Rejected, "'rejected'"),
    ] {
        let id = Uuid::new_v4();
        let sql = pending_status_update(id, next, Utc::now())
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(&format!(r#"SET "status" = {spelled}"#)), "got: {sql}");
        assert!(sql.contains(&id.to_string()), "got: {sql}");
        // The guard: a proposal that was already resolved never matches,
        // so a second accept (or a late reject) writes zero rows instead
        // of overwriting the winner.
        assert!(sql.contains(r#""proposals"."status" = 'pending'"#), "got: {sql}");
    }
}
