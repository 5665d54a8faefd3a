use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ingredient row, unique on (user_id, name)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
}

/// Wire representation of an ingredient
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateIngredientRequest {
    pub name: String,
}
