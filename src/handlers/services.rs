use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use validator::Validate;

use crate::auth::middleware::{AuthenticatedUser, ProviderUser};
use crate::cache::{CacheData, keys};
use crate::db::categories as category_db;
use crate::db::provider_services as provider_service_db;
use crate::db::users as user_db;
use crate::errors::ApiError;
use crate::models::categories::{self, CreateCategory};
use crate::models::provider_services::{CreateProviderService, ProviderSearchQuery};
use crate::models::users::UserResponse;

/// GET /api/services/categories — all active categories. Public.
pub async fn list_categories(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
) -> Result<HttpResponse, ApiError> {
    let cache_key = keys::categories();

    match cache.get::<Vec<categories::Model>>(&cache_key).await {
        Ok(Some(cached)) => {
            return Ok(HttpResponse::Ok().json(serde_json::json!({
                "categories": cached,
            })));
        }
        Ok(None) => {}
        Err(e) => warn!("Cache error: {}", e),
    }

    let list = category_db::get_active_categories(db.get_ref()).await?;

    // Store in cache (1 hour TTL)
    let _ = cache.set(&cache_key, &list, Some(3600)).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "categories": list,
    })))
}

/// POST /api/services/categories — add a category to the catalog.
pub async fn create_category(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<CreateCategory>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    // Category names are unique.
    if category_db::find_category_by_name(db.get_ref(), &input.name)
        .await?
        .is_some()
    {
        return Err(ApiError::Validation("Category already exists".to_string()));
    }

    let category = category_db::insert_category(db.get_ref(), input).await?;
    info!("category created: {} ({})", category.name, category.id);

    // The cached listing no longer matches.
    let _ = cache.delete(&keys::categories()).await;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Category created successfully",
        "category": category,
    })))
}

/// POST /api/services/provider-services — a provider advertises a category
/// they serve, optionally with a base price.
pub async fn add_provider_service(
    user: ProviderUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProviderService>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    let provider_id = user.0.id;

    if category_db::get_category_by_id(db.get_ref(), input.category_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    if provider_service_db::exists_for_provider_and_category(
        db.get_ref(),
        provider_id,
        input.category_id,
    )
    .await?
    {
        return Err(ApiError::Validation(
            "You already offer this service".to_string(),
        ));
    }

    let service =
        provider_service_db::insert_provider_service(db.get_ref(), input, provider_id).await?;
    info!("provider service added: {} by {}", service.id, provider_id);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Service added successfully",
        "service": service,
    })))
}

/// GET /api/services/provider-services — the caller's active offerings.
pub async fn list_provider_services(
    user: ProviderUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let services = provider_service_db::get_by_provider(db.get_ref(), user.0.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "services": services,
    })))
}

/// GET /api/services/search — public provider search over category,
/// location, rating floor and a free-text keyword. Capped at 50 results.
pub async fn search_providers(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProviderSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();

    // Resolve the category filter to provider IDs first.
    let provider_ids = match query.category_id {
        Some(category_id) => Some(
            provider_service_db::get_provider_ids_by_category(db.get_ref(), category_id).await?,
        ),
        None => None,
    };

    let providers = user_db::search_providers(db.get_ref(), &query, provider_ids).await?;
    let providers: Vec<UserResponse> = providers.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "providers": providers,
    })))
}
