pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;

pub use ingredient::{Ingredient, IngredientResponse, UpdateIngredientRequest};
pub use recipe::{
    CreateRecipeRequest, NameRef, Recipe, RecipeDetail, RecipeImageResponse, RecipeSummary,
    UpdateRecipeRequest,
};
pub use tag::{Tag, TagResponse, UpdateTagRequest};
pub use user::User;
