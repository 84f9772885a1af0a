use moka::future::Cache;
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::categories as categories_db;
use crate::models::categories;

/// In-process cache of category rows by ID. Categories change rarely but
/// every request creation checks one, so a short-lived local copy keeps
/// that lookup off the database. Misses are not cached.
#[derive(Clone)]
pub struct CategoryCache {
    cache: Arc<Cache<Uuid, categories::Model>>,
}

impl CategoryCache {
    pub fn new() -> Self {
        let cache = Arc::new(
            Cache::builder()
                .time_to_live(std::time::Duration::from_secs(3600))
                .max_capacity(100)
                .build(),
        );

        Self { cache }
    }

    /// Fetch a category, serving from cache when possible.
    pub async fn get(
        &self,
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<categories::Model>, DbErr> {
        if let Some(cached) = self.cache.get(&id).await {
            return Ok(Some(cached));
        }

        let category = categories_db::get_category_by_id(db, id).await?;
        if let Some(category) = &category {
            self.cache.insert(id, category.clone()).await;
        }

        Ok(category)
    }
}

impl Default for CategoryCache {
    fn default() -> Self {
        Self::new()
    }
}
