use crate::application::auth_service::AuthService;
use crate::domain::admin::AdminIdentity;
use crate::domain::error::DomainError;
use crate::presentation::dto::{AuthResponse, LoginRequest, MeResponse};
use crate::presentation::middleware::JwtAuthMiddleware;
use actix_web::{HttpResponse, Responder, Scope, post, web};
use tracing::info;

pub fn scope() -> Scope {
    web::scope("/auth").service(login).service(
        web::resource("/me")
            .wrap(JwtAuthMiddleware)
            .route(web::get().to(me)),
    )
}

#[post("/login")]
async fn login(
    service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, DomainError> {
    let token = service.login(&payload.email, &payload.password)?;

    info!(email = %payload.email, "admin logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        expires_in: service.keys().ttl_seconds(),
        token_type: "Bearer".to_string(),
    }))
}

async fn me(admin: AdminIdentity) -> impl Responder {
    HttpResponse::Ok().json(MeResponse {
        email: admin.email().to_string(),
    })
}
