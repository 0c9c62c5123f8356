use crate::application::recipe_service::RecipeService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{RecipePayload, UpdateMode};
use crate::presentation::representation::RecipeAction;
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};
use tracing::info;

#[get("")]
async fn list_recipes(
    user: AuthenticatedUser,
    recipes: web::Data<RecipeService>,
) -> Result<HttpResponse, DomainError> {
    let render = RecipeAction::List.representation();
    let listed = recipes.list_recipes(user.id).await?;
    Ok(HttpResponse::Ok().json(listed.iter().map(render).collect::<Vec<_>>()))
}

#[post("")]
async fn create_recipe(
    req: HttpRequest,
    user: AuthenticatedUser,
    recipes: web::Data<RecipeService>,
    payload: web::Json<RecipePayload>,
) -> Result<HttpResponse, DomainError> {
    let render = RecipeAction::Create.representation();
    let new_recipe = payload.into_inner().into_new_recipe()?;
    let recipe = recipes.create_recipe(user.id, new_recipe).await?;

    info!(
        request_id = %request_id(&req),
        email = %user.email,
        recipe_id = recipe.id,
        "recipe created"
    );

    Ok(HttpResponse::Created().json(render(&recipe)))
}

#[get("/{id}")]
async fn get_recipe(
    user: AuthenticatedUser,
    recipes: web::Data<RecipeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let render = RecipeAction::Retrieve.representation();
    let recipe = recipes.get_recipe(user.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(render(&recipe)))
}

async fn apply_update(
    req: &HttpRequest,
    user: &AuthenticatedUser,
    recipes: &RecipeService,
    recipe_id: i64,
    payload: RecipePayload,
    action: RecipeAction,
) -> Result<HttpResponse, DomainError> {
    let render = action.representation();
    let mode = match action {
        RecipeAction::PartialUpdate => UpdateMode::Partial,
        _ => UpdateMode::Full,
    };
    let changes = payload.into_changes(mode)?;
    let recipe = recipes.update_recipe(user.id, recipe_id, changes).await?;

    info!(
        request_id = %request_id(req),
        email = %user.email,
        recipe_id,
        ?mode,
        "recipe updated"
    );

    Ok(HttpResponse::Ok().json(render(&recipe)))
}

#[put("/{id}")]
async fn update_recipe(
    req: HttpRequest,
    user: AuthenticatedUser,
    recipes: web::Data<RecipeService>,
    path: web::Path<i64>,
    payload: web::Json<RecipePayload>,
) -> Result<HttpResponse, DomainError> {
    apply_update(
        &req,
        &user,
        &recipes,
        path.into_inner(),
        payload.into_inner(),
        RecipeAction::Update,
    )
    .await
}

#[patch("/{id}")]
async fn partial_update_recipe(
    req: HttpRequest,
    user: AuthenticatedUser,
    recipes: web::Data<RecipeService>,
    path: web::Path<i64>,
    payload: web::Json<RecipePayload>,
) -> Result<HttpResponse, DomainError> {
    apply_update(
        &req,
        &user,
        &recipes,
        path.into_inner(),
        payload.into_inner(),
        RecipeAction::PartialUpdate,
    )
    .await
}

#[delete("/{id}")]
async fn delete_recipe(
    req: HttpRequest,
    user: AuthenticatedUser,
    recipes: web::Data<RecipeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let recipe_id = path.into_inner();
    recipes.delete_recipe(user.id, recipe_id).await?;

    info!(
        request_id = %request_id(&req),
        email = %user.email,
        recipe_id,
        "recipe deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_recipes)
        .service(create_recipe)
        .service(get_recipe)
        .service(update_recipe)
        .service(partial_update_recipe)
        .service(delete_recipe);
}
