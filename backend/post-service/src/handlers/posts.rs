/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::services::PostService;
use crate::transfers::{PostQuery, PostRequest, PostResponse};
use actix_web::{web, HttpResponse};
use tracing::instrument;

/// Get a post by ID
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post found", body = PostResponse),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
#[instrument(skip(service))]
pub async fn get_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    let post = service.get_post(&post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// List posts, sorted and paginated
#[utoipa::path(
    get,
    path = "/posts",
    params(PostQuery),
    responses(
        (status = 200, description = "Matching posts in the requested order", body = [PostResponse]),
        (status = 400, description = "Unknown sort field, status or negative limit/offset")
    ),
    tag = "posts"
)]
#[instrument(skip(service))]
pub async fn list_posts(
    service: web::Data<PostService>,
    query: web::Query<PostQuery>,
) -> Result<HttpResponse> {
    let posts = service.list_posts(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Create a new post
#[utoipa::path(
    post,
    path = "/posts",
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post created with server-assigned IDs", body = PostResponse),
        (status = 400, description = "Invalid post or node payload")
    ),
    tag = "posts"
)]
#[instrument(skip(service, req))]
pub async fn create_post(
    service: web::Data<PostService>,
    req: web::Json<PostRequest>,
) -> Result<HttpResponse> {
    let post = service.create_post(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Replace a post
#[utoipa::path(
    put,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post replaced", body = PostResponse),
        (status = 400, description = "Invalid post or node payload"),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
#[instrument(skip(service, req))]
pub async fn update_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
    req: web::Json<PostRequest>,
) -> Result<HttpResponse> {
    let post = service.update_post(&post_id, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
#[instrument(skip(service))]
pub async fn delete_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    service.delete_post(&post_id).await?;
    Ok(HttpResponse::Ok().finish())
}
