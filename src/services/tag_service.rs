use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Tag;

/// Owner-scoped tag repository
#[derive(Debug, Clone)]
pub struct TagService {
    db: PgPool,
}

impl TagService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the caller's tags, name descending. With `assigned_only`, tags
    /// without any recipe link are excluded and the result is deduplicated.
    pub async fn list(&self, user_id: Uuid, assigned_only: bool) -> Result<Vec<Tag>> {
        let sql = if assigned_only {
            "SELECT DISTINCT t.id, t.user_id, t.name FROM tags t
             JOIN recipe_tags rt ON rt.tag_id = t.id
             WHERE t.user_id = $1
             ORDER BY t.name DESC"
        } else {
            "SELECT id, user_id, name FROM tags WHERE user_id = $1 ORDER BY name DESC"
        };

        let tags = sqlx::query_as::<_, Tag>(sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await?;

        Ok(tags)
    }

    pub async fn rename(&self, user_id: Uuid, tag_id: i64, name: &str) -> Result<Option<Tag>> {
        let tag = sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $3 WHERE id = $1 AND user_id = $2
             RETURNING id, user_id, name",
        )
        .bind(tag_id)
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.db)
        .await?;

        Ok(tag)
    }

    pub async fn delete(&self, user_id: Uuid, tag_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND user_id = $2")
            .bind(tag_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
