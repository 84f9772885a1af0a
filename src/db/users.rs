use sea_orm::prelude::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::provider_services;
use crate::models::users::{self, RegisterUser, UpdateProfile, UserType};

/// Insert a new user. The password arrives already hashed; this layer
/// never sees plaintext credentials.
pub async fn insert_user(
    db: &DatabaseConnection,
    input: RegisterUser,
    password_hash: String,
) -> Result<users::Model, DbErr> {
    let now = chrono::Utc::now();

    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        email: Set(input.email.to_lowercase()),
        password_hash: Set(password_hash),
        phone: Set(input.phone),
        user_type: Set(input.user_type),
        address: Set(input.address),
        city: Set(input.city),
        state: Set(input.state),
        zip_code: Set(input.zip_code),
        latitude: Set(None),
        longitude: Set(None),
        profile_picture: Set(None),
        is_verified: Set(false),
        is_active: Set(true),
        bio: Set(input.bio),
        experience_years: Set(input.experience_years),
        service_radius: Set(input.service_radius),
        is_available: Set(true),
        average_rating: Set(0.0),
        total_services: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_user.insert(db).await
}

/// Fetch a single user by email (case-insensitive via lowercased storage).
pub async fn find_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email.to_lowercase()))
        .one(db)
        .await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Apply a profile patch to an already-loaded user row.
pub async fn update_profile(
    db: &DatabaseConnection,
    user: users::Model,
    input: UpdateProfile,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(phone) = input.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = input.address {
        active.address = Set(Some(address));
    }
    if let Some(city) = input.city {
        active.city = Set(Some(city));
    }
    if let Some(state) = input.state {
        active.state = Set(Some(state));
    }
    if let Some(zip_code) = input.zip_code {
        active.zip_code = Set(Some(zip_code));
    }
    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(experience_years) = input.experience_years {
        active.experience_years = Set(Some(experience_years));
    }
    if let Some(service_radius) = input.service_radius {
        active.service_radius = Set(Some(service_radius));
    }
    if let Some(is_available) = input.is_available {
        active.is_available = Set(is_available);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Build the provider-search select: active, verified providers only,
/// capped at 50 rows. City, state and the name/bio keyword match with
/// `ILIKE`, so `sao paulo` still finds a provider stored as `São Paulo`.
pub fn provider_search_query(
    query: &provider_services::ProviderSearchQuery,
    provider_ids: Option<Vec<Uuid>>,
) -> Select<users::Entity> {
    let mut select = users::Entity::find()
        .filter(users::Column::UserType.eq(UserType::Provider))
        .filter(users::Column::IsActive.eq(true))
        .filter(users::Column::IsVerified.eq(true));

    if let Some(city) = &query.city {
        select = select
            .filter(Expr::col((users::Entity, users::Column::City)).ilike(format!("%{city}%")));
    }
    if let Some(state) = &query.state {
        select = select
            .filter(Expr::col((users::Entity, users::Column::State)).ilike(format!("%{state}%")));
    }
    if let Some(min_rating) = query.min_rating {
        select = select.filter(users::Column::AverageRating.gte(min_rating));
    }
    if let Some(keyword) = &query.keyword {
        let pattern = format!("%{keyword}%");
        select = select.filter(
            Condition::any()
                .add(Expr::col((users::Entity, users::Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((users::Entity, users::Column::Bio)).ilike(pattern)),
        );
    }
    if let Some(ids) = provider_ids {
        select = select.filter(users::Column::Id.is_in(ids));
    }

    select.limit(50)
}

/// Search active, verified providers. `provider_ids`, when present, is the
/// pre-resolved set offering a requested category; the remaining filters
/// narrow by location, rating floor and a keyword over name or bio.
pub async fn search_providers(
    db: &DatabaseConnection,
    query: &provider_services::ProviderSearchQuery,
    provider_ids: Option<Vec<Uuid>>,
) -> Result<Vec<users::Model>, DbErr> {
    provider_search_query(query, provider_ids).all(db).await
}

/// Recompute a user's rating aggregates after an evaluation lands.
/// `total_services` only tracks evaluations received by providers.
pub async fn apply_rating<C: ConnectionTrait>(
    conn: &C,
    user: users::Model,
    average_rating: f64,
    total_received: i32,
) -> Result<users::Model, DbErr> {
    let is_provider = user.user_type == UserType::Provider;

    let mut active: users::ActiveModel = user.into();
    active.average_rating = Set(average_rating);
    if is_provider {
        active.total_services = Set(total_received);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(conn).await
}
