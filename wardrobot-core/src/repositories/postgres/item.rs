// File: wardrobot-core/src/repositories/postgres/item.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use wardrobot_common::{
    error::Error,
    models::item::{ClothingItem, OccasionTag, SeasonTag},
    traits::repository_traits::{ClothingItemRepository, ItemFilters},
};

use crate::color;

const ITEM_COLUMNS: &str = r#"
    item_id, owner_id, name, kind, color, season, occasion,
    location, used_times, is_washing, created_at, updated_at
"#;

pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClothingItemRepository for PostgresItemRepository {
    async fn create(&self, item: &ClothingItem) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO items (
                item_id, owner_id, name, kind, color, season, occasion,
                location, used_times, is_washing, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(item.item_id)
        .bind(item.owner_id)
        .bind(&item.name)
        .bind(item.kind)
        .bind(&item.color)
        .bind(item.season)
        .bind(item.occasion)
        .bind(&item.location)
        .bind(item.used_times)
        .bind(item.is_washing)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_owned(&self, item_id: Uuid, owner_id: Uuid) -> Result<Option<ClothingItem>, Error> {
        let item = sqlx::query_as::<_, ClothingItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE item_id = $1 AND owner_id = $2"
        ))
        .bind(item_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn get_many(&self, item_ids: &[Uuid]) -> Result<Vec<ClothingItem>, Error> {
        let items = sqlx::query_as::<_, ClothingItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ANY($1) ORDER BY created_at ASC"
        ))
        .bind(item_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn list_for_owner(
        &self,
        owner_id: Uuid,
        filters: &ItemFilters,
    ) -> Result<Vec<ClothingItem>, Error> {
        // A color filter carrying a group name expands to every color in the
        // group; anything else matches the color literally.
        let colors: Option<Vec<String>> = filters.color.as_ref().map(|c| {
            match color::group_members(c) {
                Some(members) => members.iter().map(|m| m.to_string()).collect(),
                None => vec![c.clone()],
            }
        });

        let items = sqlx::query_as::<_, ClothingItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM items
            WHERE owner_id = $1
              AND ($2::text IS NULL OR season = $2)
              AND ($3::text IS NULL OR occasion = $3)
              AND ($4::text IS NULL OR kind = $4)
              AND ($5::text[] IS NULL OR color = ANY($5))
              AND ($6::text IS NULL OR name ILIKE '%' || $6 || '%')
            ORDER BY created_at ASC, item_id ASC
            "#
        ))
        .bind(owner_id)
        .bind(filters.season.map(|s| s.to_string()))
        .bind(filters.occasion.map(|o| o.to_string()))
        .bind(filters.kind.map(|k| k.to_string()))
        .bind(colors)
        .bind(filters.search.clone())
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn list_eligible(
        &self,
        owner_id: Uuid,
        occasion: OccasionTag,
        seasons: &[SeasonTag],
    ) -> Result<Vec<ClothingItem>, Error> {
        let season_labels: Vec<String> = seasons.iter().map(|s| s.to_string()).collect();

        // Stable ordering keeps outfit enumeration deterministic for a fixed
        // pool, which the pagination contract relies on.
        let items = sqlx::query_as::<_, ClothingItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM items
            WHERE owner_id = $1
              AND occasion = $2
              AND season = ANY($3)
              AND is_washing = FALSE
            ORDER BY created_at ASC, item_id ASC
            "#
        ))
        .bind(owner_id)
        .bind(occasion)
        .bind(season_labels)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn list_washing(&self) -> Result<Vec<ClothingItem>, Error> {
        let items = sqlx::query_as::<_, ClothingItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE is_washing = TRUE ORDER BY updated_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn mark_worn(&self, item_id: Uuid, owner_id: Uuid) -> Result<Option<i32>, Error> {
        // Single conditional update: the washing check and the increment are
        // one statement, so two concurrent wearers can never both observe
        // CLEAN and race past each other.
        let row = sqlx::query(
            r#"
            UPDATE items
            SET used_times = used_times + 1,
                updated_at = NOW()
            WHERE item_id = $1
              AND owner_id = $2
              AND is_washing = FALSE
            RETURNING used_times
            "#,
        )
        .bind(item_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.try_get("used_times")?)),
            None => Ok(None),
        }
    }

    async fn start_washing(
        &self,
        item_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<ClothingItem>, Error> {
        // The usage counter resets exactly when the washing flag flips; the
        // stamped updated_at is the anchor the sweep measures against.
        let item = sqlx::query_as::<_, ClothingItem>(&format!(
            r#"
            UPDATE items
            SET is_washing = TRUE,
                used_times = 0,
                updated_at = NOW()
            WHERE item_id = $1
              AND owner_id = $2
              AND is_washing = FALSE
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(item_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn finish_washing(
        &self,
        item_id: Uuid,
        observed_updated_at: DateTime<Utc>,
    ) -> Result<bool, Error> {
        // Guarded on the timestamp the sweep read: if a wash was restarted
        // between the sweep's read and this write, updated_at moved and the
        // update becomes a no-op instead of clobbering the new wash.
        let result = sqlx::query(
            r#"
            UPDATE items
            SET is_washing = FALSE,
                updated_at = NOW()
            WHERE item_id = $1
              AND is_washing = TRUE
              AND updated_at = $2
            "#,
        )
        .bind(item_id)
        .bind(observed_updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(&self, item_id: Uuid, owner_id: Uuid) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM items WHERE item_id = $1 AND owner_id = $2")
            .bind(item_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
