use crate::application::auth_service::AuthService;
use crate::application::config_service::ConfigService;
use crate::application::post_service::PostService;
use crate::data::config_repository::SiteConfigRepository;
use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::infrastructure::config::AppConfig;
use crate::presentation::handlers;
use crate::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Registers shared state and every `/api` route. Used by the server and by
/// the HTTP tests, which supply in-memory stores.
pub fn configure_api<P, C>(
    cfg: &mut web::ServiceConfig,
    post_service: PostService<P>,
    config_service: ConfigService<C>,
    auth_service: AuthService,
) where
    P: PostRepository + 'static,
    C: SiteConfigRepository + 'static,
{
    cfg.app_data(web::Data::new(post_service))
        .app_data(web::Data::new(config_service))
        .app_data(web::Data::new(auth_service))
        .app_data(
            web::JsonConfig::default()
                .limit(64 * 1024)
                .error_handler(|err, _| DomainError::validation("body", err.to_string()).into()),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, _| DomainError::validation("query", err.to_string()).into()),
        )
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health))
                .service(handlers::auth::scope())
                .service(handlers::post::scope::<P>())
                .service(handlers::config::scope::<C>()),
        );
}

/// Seeds the site config on first start, then serves until shutdown.
pub async fn run<P, C>(
    config: AppConfig,
    post_service: PostService<P>,
    config_service: ConfigService<C>,
    auth_service: AuthService,
) -> anyhow::Result<()>
where
    P: PostRepository + 'static,
    C: SiteConfigRepository + 'static,
{
    config_service.seed_defaults().await?;

    let bind_address = (config.host.clone(), config.port);
    info!(host = %bind_address.0, port = bind_address.1, "HTTP server starting");

    HttpServer::new(move || {
        let cors = build_cors(&config);
        let posts = post_service.clone();
        let site = config_service.clone();
        let auth = auth_service.clone();

        App::new()
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .configure(move |cfg| configure_api(cfg, posts, site, auth))
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .max_age(3600);

    if config.cors_origins.is_empty() || config.cors_origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    cors = cors.supports_credentials();
    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
