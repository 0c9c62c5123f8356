use std::sync::Arc;

use actix_web::web;

use crate::application::auth_service::AuthService;
use crate::application::ingredient_service::IngredientService;
use crate::application::recipe_service::RecipeService;
use crate::application::tag_service::TagService;
use crate::data::ingredient_repository::IngredientRepository;
use crate::data::recipe_repository::RecipeRepository;
use crate::data::tag_repository::TagRepository;
use crate::data::token_repository::TokenRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::presentation::handlers;
use crate::presentation::middleware::TokenAuth;

/// Storage handles the services are built from.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub ingredients: Arc<dyn IngredientRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub recipes: RecipeService,
    pub tags: TagService,
    pub ingredients: IngredientService,
}

impl AppState {
    pub fn new(repos: Repositories) -> Self {
        Self {
            auth: AuthService::new(repos.users, repos.tokens),
            recipes: RecipeService::new(repos.recipes),
            tags: TagService::new(repos.tags),
            ingredients: IngredientService::new(repos.ingredients),
        }
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| DomainError::MalformedBody(err.to_string()).into())
}

/// Registers shared state and the complete `/api` routing table.
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(json_config())
        .app_data(web::Data::new(state.auth.clone()))
        .app_data(web::Data::new(state.recipes.clone()))
        .app_data(web::Data::new(state.tags.clone()))
        .app_data(web::Data::new(state.ingredients.clone()))
        .service(
            web::scope("/api")
                .service(handlers::health::health)
                .service(
                    web::scope("/users")
                        .configure(handlers::user::public_routes)
                        .service(
                            web::scope("/me")
                                .wrap(TokenAuth)
                                .configure(handlers::user::profile_routes),
                        ),
                )
                .service(
                    web::scope("/recipes")
                        .wrap(TokenAuth)
                        .configure(handlers::recipe::routes),
                )
                .service(
                    web::scope("/tags")
                        .wrap(TokenAuth)
                        .configure(handlers::tag::routes),
                )
                .service(
                    web::scope("/ingredients")
                        .wrap(TokenAuth)
                        .configure(handlers::ingredient::routes),
                ),
        );
}
