/// HTTP handlers for post-service
///
/// - Posts: create, read, list, replace and delete posts with their nodes
/// - Health: liveness and readiness probes
pub mod health;
pub mod posts;

pub use posts::{create_post, delete_post, get_post, list_posts, update_post};

use crate::error::AppError;
use actix_web::web;

/// Registers the post routes, health probes and extractor error handling.
///
/// Malformed JSON bodies, query strings and paths are reported through
/// `AppError` so every 400 carries the same body shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .route("/health", web::get().to(health::health_summary))
    .route("/health/live", web::get().to(health::liveness_check))
    .route("/health/ready", web::get().to(health::readiness_check))
    .service(
        web::scope("/posts")
            .service(
                web::resource("")
                    .route(web::get().to(list_posts))
                    .route(web::post().to(create_post)),
            )
            .service(
                web::resource("/{post_id}")
                    .route(web::get().to(get_post))
                    .route(web::put().to(update_post))
                    .route(web::delete().to(delete_post)),
            ),
    );
}
