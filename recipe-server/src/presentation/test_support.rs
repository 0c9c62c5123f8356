//! Harness for handler tests: the real routing table over an in-memory store.

use std::str::FromStr;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::middleware::NormalizePath;
use actix_web::{App, test as actix_test};
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use crate::data::ingredient_repository::IngredientRepository;
use crate::data::memory::MemoryStore;
use crate::data::recipe_repository::RecipeRepository;
use crate::data::tag_repository::TagRepository;
use crate::data::token_repository::TokenRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::ingredient::Ingredient;
use crate::domain::recipe::{NewRecipe, Recipe};
use crate::domain::tag::Tag;
use crate::domain::user::User;
use crate::presentation::middleware::RequestTrace;
use crate::presentation::routes::{AppState, Repositories, configure};

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn auth_header(&self) -> (actix_web::http::header::HeaderName, String) {
        (AUTHORIZATION, format!("Token {}", self.token))
    }
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    state: AppState,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(Repositories {
            users: store.clone(),
            tokens: store.clone(),
            recipes: store.clone(),
            tags: store.clone(),
            ingredients: store.clone(),
        });
        Self { store, state }
    }

    pub async fn send(&self, request: actix_test::TestRequest) -> Reply {
        let app = actix_test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .wrap(RequestTrace)
                .configure(|cfg| configure(cfg, &self.state)),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = actix_test::read_body(response).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Reply {
            status,
            headers,
            body,
        }
    }

    /// Stores a user with an unusable password hash and issues its token.
    pub async fn user(&self, email: &str) -> TestUser {
        let user = User::new(email.to_owned(), String::new(), "!".to_owned());
        let user = UserRepository::create(&*self.store, user)
            .await
            .expect("create user");
        let token = TokenRepository::get_or_create(&*self.store, user.id)
            .await
            .expect("issue token");
        TestUser { id: user.id, token }
    }

    pub async fn recipe(&self, owner: &TestUser, title: &str) -> Recipe {
        let recipe = NewRecipe {
            title: title.to_owned(),
            time_minutes: 30,
            price: Decimal::from_str("5.00").expect("decimal"),
            link: "http://example.com/recipe.pdf".to_owned(),
            description: "Sample description".to_owned(),
        };
        RecipeRepository::create(&*self.store, owner.id, recipe)
            .await
            .expect("create recipe")
    }

    pub async fn tag(&self, owner: &TestUser, name: &str) -> Tag {
        TagRepository::create(&*self.store, owner.id, name.to_owned())
            .await
            .expect("create tag")
    }

    pub async fn ingredient(&self, owner: &TestUser, name: &str) -> Ingredient {
        IngredientRepository::create(&*self.store, owner.id, name.to_owned())
            .await
            .expect("create ingredient")
    }
}
