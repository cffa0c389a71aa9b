// File: wardrobot-core/src/repositories/postgres/wardrobe_user.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use wardrobot_common::{
    error::Error,
    models::user::WardrobeUser,
    traits::repository_traits::WardrobeUserRepository,
};

pub struct PostgresWardrobeUserRepository {
    pool: PgPool,
}

impl PostgresWardrobeUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WardrobeUserRepository for PostgresWardrobeUserRepository {
    async fn create(&self, user: &WardrobeUser) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO wardrobe_users (user_id, username, washing_time_days, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.user_id)
        .bind(&user.username)
        .bind(user.washing_time_days)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> Result<Option<WardrobeUser>, Error> {
        let user = sqlx::query_as::<_, WardrobeUser>(
            r#"
            SELECT user_id, username, washing_time_days, created_at
            FROM wardrobe_users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn set_washing_time(&self, user_id: Uuid, days: i64) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE wardrobe_users
            SET washing_time_days = $2
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(days)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
