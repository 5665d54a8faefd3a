pub mod image_storage;
pub mod ingredient_service;
pub mod recipe_service;
pub mod tag_service;

pub use image_storage::ImageStorageService;
pub use ingredient_service::IngredientService;
pub use recipe_service::RecipeService;
pub use tag_service::TagService;
