pub mod auth_service;
pub mod ingredient_service;
pub mod recipe_service;
pub mod tag_service;
