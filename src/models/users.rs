use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The `UserType` enum maps to a Postgres TEXT column stored as lowercase
/// strings. Every account is exactly one of the two marketplace roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "provider")]
    Provider,
}

/// SeaORM entity for the `users` table.
///
/// Deliberately does NOT derive `Serialize`: the row carries the password
/// hash, so everything that leaves the API goes through [`UserResponse`] or
/// one of the summary views below.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub profile_picture: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    pub service_radius: Option<i32>,
    pub is_available: bool,
    pub average_rating: f64,
    pub total_services: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::requests::Entity")]
    ServiceRequests,
    #[sea_orm(has_many = "super::proposals::Entity")]
    Proposals,
    #[sea_orm(has_many = "super::provider_services::Entity")]
    ProviderServices,
}

impl Related<super::requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceRequests.def()
    }
}

impl Related<super::proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposals.def()
    }
}

impl Related<super::provider_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProviderServices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/auth/register.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub user_type: UserType,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    pub service_radius: Option<i32>,
}

/// Request body for POST /api/auth/login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// Typed patch for PUT /api/auth/profile. One field per allowed mutation;
/// anything else in the body is silently ignored. Role, email and the
/// rating aggregates are deliberately absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    pub service_radius: Option<i32>,
    pub is_available: Option<bool>,
}

/// A safe user representation for API responses (never leaks the hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub profile_picture: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    pub service_radius: Option<i32>,
    pub is_available: bool,
    pub average_rating: f64,
    pub total_services: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            user_type: m.user_type,
            address: m.address,
            city: m.city,
            state: m.state,
            zip_code: m.zip_code,
            latitude: m.latitude,
            longitude: m.longitude,
            profile_picture: m.profile_picture,
            is_verified: m.is_verified,
            is_active: m.is_active,
            bio: m.bio,
            experience_years: m.experience_years,
            service_radius: m.service_radius,
            is_available: m.is_available,
            average_rating: m.average_rating,
            total_services: m.total_services,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ── Denormalized summaries attached to other resources ──

/// Client block embedded in the request detail response.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSummary {
    pub id: Uuid,
    pub name: String,
    pub average_rating: f64,
    pub total_services: i32,
}

impl From<&Model> for ClientSummary {
    fn from(m: &Model) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            average_rating: m.average_rating,
            total_services: m.total_services,
        }
    }
}

/// Client block embedded in a provider's own proposal listing.
#[derive(Debug, Clone, Serialize)]
pub struct ClientRating {
    pub id: Uuid,
    pub name: String,
    pub average_rating: f64,
}

impl From<&Model> for ClientRating {
    fn from(m: &Model) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            average_rating: m.average_rating,
        }
    }
}

/// Provider block embedded in the proposals-for-request listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderProfile {
    pub id: Uuid,
    pub name: String,
    pub average_rating: f64,
    pub total_services: i32,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
}

impl From<&Model> for ProviderProfile {
    fn from(m: &Model) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            average_rating: m.average_rating,
            total_services: m.total_services,
            profile_picture: m.profile_picture.clone(),
            bio: m.bio.clone(),
            experience_years: m.experience_years,
        }
    }
}

/// Minimal party block embedded in evaluation listings. Deserialize is
/// for the Redis-cached evaluations payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartySummary {
    pub id: Uuid,
    pub name: String,
    pub user_type: UserType,
}

impl From<&Model> for PartySummary {
    fn from(m: &Model) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            user_type: m.user_type.clone(),
        }
    }
}
