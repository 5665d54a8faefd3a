use anyhow::Result;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::{
    CreateRecipeRequest, IngredientResponse, NameRef, Recipe, RecipeDetail, TagResponse,
    UpdateRecipeRequest,
};

const RECIPE_COLUMNS: &str =
    "id, user_id, title, time_minutes, price, description, link, image, created_at, updated_at";

/// Owner-scoped recipe repository. Every query takes the acting user id and
/// filters on it; a row owned by someone else is indistinguishable from a
/// missing row.
#[derive(Debug, Clone)]
pub struct RecipeService {
    db: PgPool,
}

impl RecipeService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the caller's recipes, most recently created first
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Recipe>> {
        let recipes = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE user_id = $1 ORDER BY id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(recipes)
    }

    pub async fn get(&self, user_id: Uuid, recipe_id: i64) -> Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 AND user_id = $2"
        ))
        .bind(recipe_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(recipe)
    }

    pub async fn detail(&self, user_id: Uuid, recipe_id: i64) -> Result<Option<RecipeDetail>> {
        let Some(recipe) = self.get(user_id, recipe_id).await? else {
            return Ok(None);
        };

        Ok(Some(self.load_detail(recipe).await?))
    }

    /// Create a recipe owned by the caller, resolving any nested tag and
    /// ingredient descriptors within the same transaction
    pub async fn create(&self, user_id: Uuid, request: CreateRecipeRequest) -> Result<RecipeDetail> {
        let mut tx = self.db.begin().await?;

        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            "INSERT INTO recipes (user_id, title, time_minutes, price, description, link, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&request.title)
        .bind(request.time_minutes)
        .bind(request.price)
        .bind(&request.description)
        .bind(&request.link)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        sync_channels(&mut tx, user_id, recipe.id, &request.tags, &request.ingredients).await?;

        tx.commit().await?;

        self.load_detail(recipe).await
    }

    /// Partial update: absent scalar fields keep their stored values, and each
    /// association channel is replaced only when its key was present
    pub async fn update(
        &self,
        user_id: Uuid,
        recipe_id: i64,
        request: UpdateRecipeRequest,
    ) -> Result<Option<RecipeDetail>> {
        let mut tx = self.db.begin().await?;

        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            "UPDATE recipes SET
                title = COALESCE($3, title),
                time_minutes = COALESCE($4, time_minutes),
                price = COALESCE($5, price),
                description = COALESCE($6, description),
                link = COALESCE($7, link),
                updated_at = $8
             WHERE id = $1 AND user_id = $2
             RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(recipe_id)
        .bind(user_id)
        .bind(&request.title)
        .bind(request.time_minutes)
        .bind(request.price)
        .bind(&request.description)
        .bind(&request.link)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(recipe) = recipe else {
            return Ok(None);
        };

        sync_channels(&mut tx, user_id, recipe.id, &request.tags, &request.ingredients).await?;

        tx.commit().await?;

        Ok(Some(self.load_detail(recipe).await?))
    }

    /// Full replace: every mutable scalar field is overwritten, with omitted
    /// optional fields cleared. Association channels still follow presence.
    pub async fn replace(
        &self,
        user_id: Uuid,
        recipe_id: i64,
        request: CreateRecipeRequest,
    ) -> Result<Option<RecipeDetail>> {
        let mut tx = self.db.begin().await?;

        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            "UPDATE recipes SET
                title = $3,
                time_minutes = $4,
                price = $5,
                description = $6,
                link = $7,
                updated_at = $8
             WHERE id = $1 AND user_id = $2
             RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(recipe_id)
        .bind(user_id)
        .bind(&request.title)
        .bind(request.time_minutes)
        .bind(request.price)
        .bind(&request.description)
        .bind(&request.link)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(recipe) = recipe else {
            return Ok(None);
        };

        sync_channels(&mut tx, user_id, recipe.id, &request.tags, &request.ingredients).await?;

        tx.commit().await?;

        Ok(Some(self.load_detail(recipe).await?))
    }

    /// Delete an owned recipe; join rows cascade, tag and ingredient rows stay
    pub async fn delete(&self, user_id: Uuid, recipe_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(recipe_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Store a new image reference on an owned recipe
    pub async fn set_image(&self, user_id: Uuid, recipe_id: i64, reference: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE recipes SET image = $3, updated_at = $4 WHERE id = $1 AND user_id = $2",
        )
        .bind(recipe_id)
        .bind(user_id)
        .bind(reference)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn load_detail(&self, recipe: Recipe) -> Result<RecipeDetail> {
        let tags = self.tags_for(recipe.id).await?;
        let ingredients = self.ingredients_for(recipe.id).await?;

        Ok(RecipeDetail::from_parts(recipe, tags, ingredients))
    }

    async fn tags_for(&self, recipe_id: i64) -> Result<Vec<TagResponse>> {
        let tags = sqlx::query_as::<_, (i64, String)>(
            "SELECT t.id, t.name FROM tags t
             JOIN recipe_tags rt ON rt.tag_id = t.id
             WHERE rt.recipe_id = $1
             ORDER BY t.name",
        )
        .bind(recipe_id)
        .fetch_all(&self.db)
        .await?;

        Ok(tags
            .into_iter()
            .map(|(id, name)| TagResponse { id, name })
            .collect())
    }

    async fn ingredients_for(&self, recipe_id: i64) -> Result<Vec<IngredientResponse>> {
        let ingredients = sqlx::query_as::<_, (i64, String)>(
            "SELECT i.id, i.name FROM ingredients i
             JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
             WHERE ri.recipe_id = $1
             ORDER BY i.name",
        )
        .bind(recipe_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ingredients
            .into_iter()
            .map(|(id, name)| IngredientResponse { id, name })
            .collect())
    }
}

/// Run the association resolver for each channel whose key was present in the
/// payload. `Some(vec![])` clears the channel; `None` leaves it untouched.
async fn sync_channels(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: Uuid,
    recipe_id: i64,
    tags: &Option<Vec<NameRef>>,
    ingredients: &Option<Vec<NameRef>>,
) -> Result<()> {
    if let Some(refs) = tags {
        let ids = resolve_named(&mut *tx, user_id, refs, "tags").await?;
        replace_links(&mut *tx, recipe_id, &ids, "recipe_tags", "tag_id").await?;
    }

    if let Some(refs) = ingredients {
        let ids = resolve_named(&mut *tx, user_id, refs, "ingredients").await?;
        replace_links(&mut *tx, recipe_id, &ids, "recipe_ingredients", "ingredient_id").await?;
    }

    Ok(())
}

/// Get-or-create resolution of `{name}` descriptors against the caller's rows.
///
/// Duplicate names within one request collapse to a single row. A concurrent
/// create race on the same (user, name) pair is left to the unique constraint;
/// one of the racers may see a constraint violation.
pub(crate) async fn resolve_named(
    conn: &mut PgConnection,
    user_id: Uuid,
    refs: &[NameRef],
    table: &str,
) -> Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(refs.len());
    let mut seen = HashSet::new();

    for r in refs {
        if !seen.insert(r.name.clone()) {
            continue;
        }

        let existing = sqlx::query_as::<_, (i64,)>(&format!(
            "SELECT id FROM {table} WHERE user_id = $1 AND name = $2"
        ))
        .bind(user_id)
        .bind(&r.name)
        .fetch_optional(&mut *conn)
        .await?;

        let id = match existing {
            Some((id,)) => id,
            None => {
                let (id,) = sqlx::query_as::<_, (i64,)>(&format!(
                    "INSERT INTO {table} (user_id, name) VALUES ($1, $2) RETURNING id"
                ))
                .bind(user_id)
                .bind(&r.name)
                .fetch_one(&mut *conn)
                .await?;
                id
            }
        };

        ids.push(id);
    }

    Ok(ids)
}

/// Replace a recipe's join rows for one channel with exactly the given set
pub(crate) async fn replace_links(
    conn: &mut PgConnection,
    recipe_id: i64,
    ids: &[i64],
    join_table: &str,
    fk_column: &str,
) -> Result<()> {
    sqlx::query(&format!("DELETE FROM {join_table} WHERE recipe_id = $1"))
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;

    for id in ids {
        sqlx::query(&format!(
            "INSERT INTO {join_table} (recipe_id, {fk_column}) VALUES ($1, $2)
             ON CONFLICT DO NOTHING"
        ))
        .bind(recipe_id)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
