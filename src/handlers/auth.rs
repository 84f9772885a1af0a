use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use validator::Validate;

use crate::auth::middleware::{AuthenticatedUser, JwtSecret};
use crate::auth::{jwt, password};
use crate::db::users as user_db;
use crate::errors::ApiError;
use crate::models::users::{LoginUser, RegisterUser, UpdateProfile, UserResponse};

/// Access tokens expire after one day; clients re-login to refresh.
const TOKEN_TTL_HOURS: i64 = 24;

/// POST /api/auth/register — create an account and return a signed token.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<RegisterUser>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    // 1. Reject duplicate emails up front.
    if user_db::find_user_by_email(db.get_ref(), &input.email)
        .await?
        .is_some()
    {
        warn!("registration attempt with existing email: {}", input.email);
        return Err(ApiError::Validation("Email is already registered".to_string()));
    }

    // 2. Hash the password and store the account.
    let password_hash = password::hash(&input.password)
        .map_err(|e| ApiError::Validation(format!("Could not hash password: {e}")))?;

    let user = user_db::insert_user(db.get_ref(), input, password_hash).await?;
    info!("user registered: {} ({})", user.email, user.id);

    // 3. Issue an access token so the client is logged in immediately.
    let access_token = jwt::create_token(user.id, &secret.0, TOKEN_TTL_HOURS)
        .map_err(|e| ApiError::Unauthorized(format!("Could not issue token: {e}")))?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Account created successfully",
        "access_token": access_token,
        "user": UserResponse::from(user),
    })))
}

/// POST /api/auth/login — exchange email and password for a token.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<LoginUser>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    // A missing account and a bad password get the same answer.
    let user = user_db::find_user_by_email(db.get_ref(), &input.email).await?;
    let user = match user {
        Some(u) if password::verify(&input.password, &u.password_hash) => u,
        _ => {
            warn!("failed login attempt for email: {}", input.email);
            return Err(ApiError::Unauthorized("Incorrect email or password".to_string()));
        }
    };

    if !user.is_active {
        warn!("login attempt on deactivated account: {}", user.email);
        return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
    }

    let access_token = jwt::create_token(user.id, &secret.0, TOKEN_TTL_HOURS)
        .map_err(|e| ApiError::Unauthorized(format!("Could not issue token: {e}")))?;

    info!("user logged in: {} ({})", user.email, user.id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Login successful",
        "access_token": access_token,
        "user": UserResponse::from(user),
    })))
}

/// GET /api/auth/profile — return the authenticated user's profile.
pub async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user": UserResponse::from(user.0),
    })))
}

/// PUT /api/auth/profile — update the authenticated user's profile.
/// Only the whitelisted fields in [`UpdateProfile`] are writable.
pub async fn update_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateProfile>,
) -> Result<HttpResponse, ApiError> {
    let updated = user_db::update_profile(db.get_ref(), user.0, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Profile updated successfully",
        "user": UserResponse::from(updated),
    })))
}
