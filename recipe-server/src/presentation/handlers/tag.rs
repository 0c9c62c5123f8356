use crate::application::tag_service::TagService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{NamePayload, UpdateMode};
use crate::presentation::representation::TagResponse;
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};
use tracing::info;

#[get("")]
async fn list_tags(
    user: AuthenticatedUser,
    tags: web::Data<TagService>,
) -> Result<HttpResponse, DomainError> {
    let listed = tags.list_tags(user.id).await?;
    Ok(HttpResponse::Ok().json(
        listed
            .into_iter()
            .map(TagResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[post("")]
async fn create_tag(
    req: HttpRequest,
    user: AuthenticatedUser,
    tags: web::Data<TagService>,
    payload: web::Json<NamePayload>,
) -> Result<HttpResponse, DomainError> {
    let name = payload.into_inner().into_name()?;
    let tag = tags.create_tag(user.id, name).await?;

    info!(request_id = %request_id(&req), tag_id = tag.id, "tag created");

    Ok(HttpResponse::Created().json(TagResponse::from(tag)))
}

#[get("/{id}")]
async fn get_tag(
    user: AuthenticatedUser,
    tags: web::Data<TagService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let tag = tags.get_tag(user.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TagResponse::from(tag)))
}

async fn rename(
    req: &HttpRequest,
    user: &AuthenticatedUser,
    tags: &TagService,
    tag_id: i64,
    payload: NamePayload,
    mode: UpdateMode,
) -> Result<HttpResponse, DomainError> {
    let name = payload.into_rename(mode)?;
    let tag = tags.update_tag(user.id, tag_id, name).await?;

    info!(request_id = %request_id(req), tag_id, ?mode, "tag updated");

    Ok(HttpResponse::Ok().json(TagResponse::from(tag)))
}

#[put("/{id}")]
async fn update_tag(
    req: HttpRequest,
    user: AuthenticatedUser,
    tags: web::Data<TagService>,
    path: web::Path<i64>,
    payload: web::Json<NamePayload>,
) -> Result<HttpResponse, DomainError> {
    rename(
        &req,
        &user,
        &tags,
        path.into_inner(),
        payload.into_inner(),
        UpdateMode::Full,
    )
    .await
}

#[patch("/{id}")]
async fn partial_update_tag(
    req: HttpRequest,
    user: AuthenticatedUser,
    tags: web::Data<TagService>,
    path: web::Path<i64>,
    payload: web::Json<NamePayload>,
) -> Result<HttpResponse, DomainError> {
    rename(
        &req,
        &user,
        &tags,
        path.into_inner(),
        payload.into_inner(),
        UpdateMode::Partial,
    )
    .await
}

#[delete("/{id}")]
async fn delete_tag(
    req: HttpRequest,
    user: AuthenticatedUser,
    tags: web::Data<TagService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let tag_id = path.into_inner();
    tags.delete_tag(user.id, tag_id).await?;

    info!(request_id = %request_id(&req), tag_id, "tag deleted");

    Ok(HttpResponse::NoContent().finish())
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_tags)
        .service(create_tag)
        .service(get_tag)
        .service(update_tag)
        .service(partial_update_tag)
        .service(delete_tag);
}
