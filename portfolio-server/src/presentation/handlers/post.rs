use crate::application::post_service::PostService;
use crate::data::post_repository::PostRepository;
use crate::domain::admin::AdminIdentity;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    CreatePostRequest, ListPostsQuery, MessageResponse, PostResponse, UpdatePostRequest,
};
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, Scope, guard, web};
use tracing::info;

/// Routes under `/blog`. Reads are public; writes and the full listing go
/// through the auth gate. Resources are split by method guard so the same
/// path can be public for GET and gated otherwise.
pub fn scope<R: PostRepository + 'static>() -> Scope {
    web::scope("/blog")
        .service(
            web::resource("")
                .guard(guard::Get())
                .to(list_public::<R>),
        )
        .service(
            web::resource("/all")
                .wrap(JwtAuthMiddleware)
                .route(web::get().to(list_all::<R>)),
        )
        .service(
            web::resource("/{id}")
                .guard(guard::Get())
                .to(get_post::<R>),
        )
        .service(
            web::resource("")
                .wrap(JwtAuthMiddleware)
                .route(web::post().to(create_post::<R>)),
        )
        .service(
            web::resource("/{id}")
                .wrap(JwtAuthMiddleware)
                .route(web::put().to(update_post::<R>))
                .route(web::delete().to(delete_post::<R>)),
        )
}

async fn list_public<R: PostRepository + 'static>(
    req: HttpRequest,
    posts: web::Data<PostService<R>>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse, DomainError> {
    let posts = match query.sort {
        Some(order) => posts.list_public_for_display(order).await?,
        None => posts.list_public().await?,
    };

    info!(
        request_id = %request_id(&req),
        count = posts.len(),
        "posts retrieved"
    );

    Ok(HttpResponse::Ok().json(posts))
}

async fn list_all<R: PostRepository + 'static>(
    admin: AdminIdentity,
    posts: web::Data<PostService<R>>,
) -> Result<HttpResponse, DomainError> {
    let posts = posts.list_all(&admin).await?;
    Ok(HttpResponse::Ok().json(posts))
}

async fn get_post<R: PostRepository + 'static>(
    posts: web::Data<PostService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let post = posts.get_post(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

async fn create_post<R: PostRepository + 'static>(
    req: HttpRequest,
    admin: AdminIdentity,
    posts: web::Data<PostService<R>>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let post = posts
        .create_post(&admin, payload.into_inner().into())
        .await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(PostResponse {
        message: "Blog post created successfully",
        post,
    }))
}

async fn update_post<R: PostRepository + 'static>(
    req: HttpRequest,
    admin: AdminIdentity,
    posts: web::Data<PostService<R>>,
    path: web::Path<String>,
    payload: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let post = posts
        .update_post(&admin, &path.into_inner(), payload.into_inner().try_into()?)
        .await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post.id,
        "post updated"
    );

    Ok(HttpResponse::Ok().json(PostResponse {
        message: "Blog post updated successfully",
        post,
    }))
}

async fn delete_post<R: PostRepository + 'static>(
    req: HttpRequest,
    admin: AdminIdentity,
    posts: web::Data<PostService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    posts.delete_post(&admin, &post_id).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post_id,
        "post deleted"
    );

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Blog post deleted successfully",
    }))
}
