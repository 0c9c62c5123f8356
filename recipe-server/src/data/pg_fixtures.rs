//! Seed helpers for the `#[sqlx::test]` cases run against a migrated
//! PostgreSQL database.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::data::user_repository::{PostgresUserRepository, UserRepository};
use crate::domain::recipe::NewRecipe;
use crate::domain::user::User;

pub async fn seed_user(pool: &PgPool, email: &str) -> Uuid {
    let user = User::new(email.to_owned(), String::new(), "!".to_owned());
    PostgresUserRepository::new(pool.clone())
        .create(user)
        .await
        .expect("seed user")
        .id
}

pub fn sample_recipe(title: &str) -> NewRecipe {
    NewRecipe {
        title: title.to_owned(),
        time_minutes: 30,
        price: Decimal::from_str("5.00").expect("decimal"),
        link: "http://example.com/recipe.pdf".to_owned(),
        description: "Sample description".to_owned(),
    }
}
