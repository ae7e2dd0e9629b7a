/// OpenAPI documentation for Post Service
use crate::handlers::posts;
use crate::models::{LangType, NodeType, StatusType};
use crate::transfers::nodes::{
    AudioNode, CodeNode, ImageNode, ListNode, NodePayload, PollNode, TextNode, VideoNode,
};
use crate::transfers::{NodeRequest, NodeResponse, PostRequest, PostResponse};
use actix_web::HttpResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Post Service API",
        version = "1.0.0",
        description = "CRUD service for posts built from typed content nodes (text, image, video, audio, code, list, poll). Supports sorted, filtered and paginated listing.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    paths(
        posts::get_post,
        posts::list_posts,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
    ),
    components(schemas(
        PostRequest,
        PostResponse,
        NodeRequest,
        NodeResponse,
        NodePayload,
        TextNode,
        ImageNode,
        VideoNode,
        AudioNode,
        CodeNode,
        ListNode,
        PollNode,
        NodeType,
        LangType,
        StatusType,
    )),
    tags(
        (name = "posts", description = "Post creation, retrieval, listing, replacement and deletion"),
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/openapi.json"
    }
}

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> actix_web::Result<HttpResponse> {
    let body = ApiDoc::openapi().to_json().map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}
