pub mod auth;
pub mod evaluations;
pub mod proposals;
pub mod requests;
pub mod services;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (register/login are public, profile requires a JWT) ──
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/profile", web::get().to(auth::get_profile))
            .route("/profile", web::put().to(auth::update_profile)),
    );

    // ── Service request routes (all protected — require valid JWT) ──
    cfg.service(
        web::scope("/requests")
            .route("", web::get().to(requests::list_requests))
            .route("", web::post().to(requests::create_request))
            .route("/{id}", web::get().to(requests::get_request))
            .route("/{id}", web::put().to(requests::update_request))
            .route("/{id}", web::delete().to(requests::delete_request)),
    );

    // ── Proposal routes (all protected — require valid JWT) ──
    cfg.service(
        web::scope("/proposals")
            .route("", web::post().to(proposals::create_proposal))
            .route("/request/{request_id}", web::get().to(proposals::list_by_request))
            .route("/my-proposals", web::get().to(proposals::my_proposals))
            .route("/{id}/accept", web::post().to(proposals::accept_proposal))
            .route("/{id}/reject", web::post().to(proposals::reject_proposal)),
    );

    // ── Evaluation routes (a user's evaluation page is public) ──
    cfg.service(
        web::scope("/evaluations")
            .route("", web::post().to(evaluations::create_evaluation))
            .route("/user/{user_id}", web::get().to(evaluations::list_by_user))
            .route("/request/{request_id}", web::get().to(evaluations::list_by_request))
            .route("/my-evaluations", web::get().to(evaluations::my_evaluations)),
    );

    // ── Service catalog routes (category listing and search are public) ──
    cfg.service(
        web::scope("/services")
            .route("/categories", web::get().to(services::list_categories))
            .route("/categories", web::post().to(services::create_category))
            .route("/provider-services", web::post().to(services::add_provider_service))
            .route("/provider-services", web::get().to(services::list_provider_services))
            .route("/search", web::get().to(services::search_providers)),
    );
}
