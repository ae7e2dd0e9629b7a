/// Business logic layer for post-service
///
/// Request validation, DTO conversion and repository orchestration for posts.
pub mod posts;

pub use posts::PostService;
