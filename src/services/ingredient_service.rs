use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Ingredient;

/// Owner-scoped ingredient repository
#[derive(Debug, Clone)]
pub struct IngredientService {
    db: PgPool,
}

impl IngredientService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the caller's ingredients, name descending. With `assigned_only`,
    /// ingredients without any recipe link are excluded and the result is
    /// deduplicated.
    pub async fn list(&self, user_id: Uuid, assigned_only: bool) -> Result<Vec<Ingredient>> {
        let sql = if assigned_only {
            "SELECT DISTINCT i.id, i.user_id, i.name FROM ingredients i
             JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
             WHERE i.user_id = $1
             ORDER BY i.name DESC"
        } else {
            "SELECT id, user_id, name FROM ingredients WHERE user_id = $1 ORDER BY name DESC"
        };

        let ingredients = sqlx::query_as::<_, Ingredient>(sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await?;

        Ok(ingredients)
    }

    pub async fn rename(
        &self,
        user_id: Uuid,
        ingredient_id: i64,
        name: &str,
    ) -> Result<Option<Ingredient>> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            "UPDATE ingredients SET name = $3 WHERE id = $1 AND user_id = $2
             RETURNING id, user_id, name",
        )
        .bind(ingredient_id)
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.db)
        .await?;

        Ok(ingredient)
    }

    pub async fn delete(&self, user_id: Uuid, ingredient_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1 AND user_id = $2")
            .bind(ingredient_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
