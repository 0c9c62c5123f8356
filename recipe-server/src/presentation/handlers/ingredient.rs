use crate::application::ingredient_service::IngredientService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{NamePayload, UpdateMode};
use crate::presentation::representation::IngredientResponse;
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};
use tracing::info;

#[get("")]
async fn list_ingredients(
    user: AuthenticatedUser,
    ingredients: web::Data<IngredientService>,
) -> Result<HttpResponse, DomainError> {
    let listed = ingredients.list_ingredients(user.id).await?;
    Ok(HttpResponse::Ok().json(
        listed
            .into_iter()
            .map(IngredientResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[post("")]
async fn create_ingredient(
    req: HttpRequest,
    user: AuthenticatedUser,
    ingredients: web::Data<IngredientService>,
    payload: web::Json<NamePayload>,
) -> Result<HttpResponse, DomainError> {
    let name = payload.into_inner().into_name()?;
    let ingredient = ingredients.create_ingredient(user.id, name).await?;

    info!(request_id = %request_id(&req), ingredient_id = ingredient.id, "ingredient created");

    Ok(HttpResponse::Created().json(IngredientResponse::from(ingredient)))
}

#[get("/{id}")]
async fn get_ingredient(
    user: AuthenticatedUser,
    ingredients: web::Data<IngredientService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let ingredient = ingredients.get_ingredient(user.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(IngredientResponse::from(ingredient)))
}

async fn rename(
    req: &HttpRequest,
    user: &AuthenticatedUser,
    ingredients: &IngredientService,
    ingredient_id: i64,
    payload: NamePayload,
    mode: UpdateMode,
) -> Result<HttpResponse, DomainError> {
    let name = payload.into_rename(mode)?;
    let ingredient = ingredients.update_ingredient(user.id, ingredient_id, name).await?;

    info!(request_id = %request_id(req), ingredient_id, ?mode, "ingredient updated");

    Ok(HttpResponse::Ok().json(IngredientResponse::from(ingredient)))
}

#[put("/{id}")]
async fn update_ingredient(
    req: HttpRequest,
    user: AuthenticatedUser,
    ingredients: web::Data<IngredientService>,
    path: web::Path<i64>,
    payload: web::Json<NamePayload>,
) -> Result<HttpResponse, DomainError> {
    rename(
        &req,
        &user,
        &ingredients,
        path.into_inner(),
        payload.into_inner(),
        UpdateMode::Full,
    )
    .await
}

#[patch("/{id}")]
async fn partial_update_ingredient(
    req: HttpRequest,
    user: AuthenticatedUser,
    ingredients: web::Data<IngredientService>,
    path: web::Path<i64>,
    payload: web::Json<NamePayload>,
) -> Result<HttpResponse, DomainError> {
    rename(
        &req,
        &user,
        &ingredients,
        path.into_inner(),
        payload.into_inner(),
        UpdateMode::Partial,
    )
    .await
}

#[delete("/{id}")]
async fn delete_ingredient(
    req: HttpRequest,
    user: AuthenticatedUser,
    ingredients: web::Data<IngredientService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let ingredient_id = path.into_inner();
    ingredients.delete_ingredient(user.id, ingredient_id).await?;

    info!(request_id = %request_id(&req), ingredient_id, "ingredient deleted");

    Ok(HttpResponse::NoContent().finish())
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_ingredients)
        .service(create_ingredient)
        .service(get_ingredient)
        .service(update_ingredient)
        .service(partial_update_ingredient)
        .service(delete_ingredient);
}
