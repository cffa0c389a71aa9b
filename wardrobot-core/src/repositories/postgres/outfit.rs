// File: wardrobot-core/src/repositories/postgres/outfit.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use wardrobot_common::{
    error::Error,
    models::outfit::WornOutfit,
    traits::repository_traits::OutfitRepository,
};

pub struct PostgresOutfitRepository {
    pool: PgPool,
}

impl PostgresOutfitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OutfitRepository for PostgresOutfitRepository {
    async fn upsert_worn(&self, outfit: &WornOutfit) -> Result<(), Error> {
        // item_ids arrives in canonical sorted order, and (owner_id, item_ids)
        // is unique, so re-wearing the same combination lands on the conflict
        // arm and only bumps last_used.
        sqlx::query(
            r#"
            INSERT INTO outfits (outfit_id, owner_id, item_ids, last_used)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (owner_id, item_ids) DO UPDATE SET
                last_used = EXCLUDED.last_used
            "#,
        )
        .bind(outfit.outfit_id)
        .bind(outfit.owner_id)
        .bind(&outfit.item_ids)
        .bind(outfit.last_used)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_recent(&self, owner_id: Uuid, limit: i64) -> Result<Vec<WornOutfit>, Error> {
        let outfits = sqlx::query_as::<_, WornOutfit>(
            r#"
            SELECT outfit_id, owner_id, item_ids, last_used
            FROM outfits
            WHERE owner_id = $1
            ORDER BY last_used DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(outfits)
    }
}
