use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt;
use crate::db::users::get_user_by_id;
use crate::errors::ApiError;
use crate::models::users::{self, UserType};

/// Extractor for any authenticated account. Handlers that need a specific
/// role take [`ClientUser`] or [`ProviderUser`] instead.
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    ApiError::Unauthorized("Missing Authorization header".to_string())
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                ApiError::Unauthorized("Authorization header must be: Bearer <token>".to_string())
            })?;

            // 2. Get the signing secret from app data.
            let secret = req.app_data::<web::Data<JwtSecret>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("JWT secret not configured")
            })?;

            // 3. Validate the token and extract the user ID.
            let claims = jwt::validate_token(token, &secret.0)
                .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {e}")))?;

            let user_id = claims.user_id().map_err(ApiError::Unauthorized)?;

            // 4. Load the account behind the token.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Database not configured")
                })?;

            let user = get_user_by_id(db.get_ref(), user_id)
                .await
                .map_err(ApiError::Database)?
                .ok_or_else(|| ApiError::Unauthorized("Unknown account".to_string()))?;

            if !user.is_active {
                return Err(ApiError::Unauthorized("Account is deactivated".to_string()).into());
            }

            Ok(AuthenticatedUser(user))
        })
    }
}

/// Authenticated account that must be a client.
pub struct ClientUser(pub users::Model);

impl FromRequest for ClientUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let AuthenticatedUser(user) =
                AuthenticatedUser::from_request(&req, &mut Payload::None).await?;

            if user.user_type != UserType::Client {
                return Err(ApiError::Forbidden(
                    "Only clients can perform this action".to_string(),
                )
                .into());
            }

            Ok(ClientUser(user))
        })
    }
}

/// Authenticated account that must be a provider.
pub struct ProviderUser(pub users::Model);

impl FromRequest for ProviderUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let AuthenticatedUser(user) =
                AuthenticatedUser::from_request(&req, &mut Payload::None).await?;

            if user.user_type != UserType::Provider {
                return Err(ApiError::Forbidden(
                    "Only providers can perform this action".to_string(),
                )
                .into());
            }

            Ok(ProviderUser(user))
        })
    }
}

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);
