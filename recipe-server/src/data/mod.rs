pub mod ingredient_repository;
#[cfg(test)]
pub mod memory;
#[cfg(test)]
mod pg_fixtures;
pub mod recipe_repository;
pub mod tag_repository;
pub mod token_repository;
pub mod user_repository;
