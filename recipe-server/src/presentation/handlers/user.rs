use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{LoginRequest, RegisterRequest};
use crate::presentation::representation::{LoginResponse, UserResponse};
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;

#[post("/register")]
async fn register(
    req: HttpRequest,
    service: web::Data<AuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, DomainError> {
    let registration = payload.into_inner().into_registration()?;
    let user = service.register(registration).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        email = %user.email,
        "user registered"
    );

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

#[post("/login")]
async fn login(
    req: HttpRequest,
    service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, DomainError> {
    let (email, password) = payload.into_inner().into_credentials()?;
    let (token, user) = service.login(&email, &password).await?;

    info!(request_id = %request_id(&req), user_id = %user.id, "session token issued");

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

#[get("")]
async fn me(
    user: AuthenticatedUser,
    service: web::Data<AuthService>,
) -> Result<HttpResponse, DomainError> {
    let profile = service.get_user(user.id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(profile)))
}

pub fn public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login);
}

pub fn profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(me);
}

#[cfg(test)]
mod tests;
