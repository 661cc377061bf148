use crate::application::config_service::ConfigService;
use crate::data::config_repository::SiteConfigRepository;
use crate::domain::admin::AdminIdentity;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    ConfigResponse, UpdateConfigRequest, UpdateHeroRequest, UpdateSeoRequest,
};
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, Scope, guard, web};
use tracing::info;

pub fn scope<R: SiteConfigRepository + 'static>() -> Scope {
    web::scope("/config")
        .service(
            web::resource("")
                .guard(guard::Get())
                .to(get_config::<R>),
        )
        .service(
            web::resource("")
                .wrap(JwtAuthMiddleware)
                .route(web::put().to(update_config::<R>)),
        )
        .service(
            web::resource("/seo")
                .wrap(JwtAuthMiddleware)
                .route(web::put().to(update_seo::<R>)),
        )
        .service(
            web::resource("/hero")
                .wrap(JwtAuthMiddleware)
                .route(web::put().to(update_hero::<R>)),
        )
}

async fn get_config<R: SiteConfigRepository + 'static>(
    config: web::Data<ConfigService<R>>,
) -> Result<HttpResponse, DomainError> {
    let config = config.get_config().await?;
    Ok(HttpResponse::Ok().json(config))
}

async fn update_config<R: SiteConfigRepository + 'static>(
    req: HttpRequest,
    admin: AdminIdentity,
    config: web::Data<ConfigService<R>>,
    payload: web::Json<UpdateConfigRequest>,
) -> Result<HttpResponse, DomainError> {
    let config = config
        .update_general(&admin, payload.into_inner().try_into()?)
        .await?;

    info!(request_id = %request_id(&req), "site config updated");

    Ok(HttpResponse::Ok().json(ConfigResponse {
        message: "Configuration updated successfully",
        config,
    }))
}

async fn update_seo<R: SiteConfigRepository + 'static>(
    req: HttpRequest,
    admin: AdminIdentity,
    config: web::Data<ConfigService<R>>,
    payload: web::Json<UpdateSeoRequest>,
) -> Result<HttpResponse, DomainError> {
    let config = config
        .update_seo(&admin, payload.into_inner().into())
        .await?;

    info!(request_id = %request_id(&req), "seo settings updated");

    Ok(HttpResponse::Ok().json(ConfigResponse {
        message: "SEO settings updated successfully",
        config,
    }))
}

async fn update_hero<R: SiteConfigRepository + 'static>(
    req: HttpRequest,
    admin: AdminIdentity,
    config: web::Data<ConfigService<R>>,
    payload: web::Json<UpdateHeroRequest>,
) -> Result<HttpResponse, DomainError> {
    let config = config
        .update_hero(&admin, payload.into_inner().into())
        .await?;

    info!(request_id = %request_id(&req), "hero section updated");

    Ok(HttpResponse::Ok().json(ConfigResponse {
        message: "Hero section updated successfully",
        config,
    }))
}
