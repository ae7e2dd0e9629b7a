/// Post service - validates requests and drives the repository
use crate::db::{FindAllQuery, PostFilter, PostRepository, SortField};
use crate::error::{AppError, Result};
use crate::metrics::posts::{record_outcome, repository_timer};
use crate::models::{Post, StatusType};
use crate::transfers::{PostQuery, PostRequest, PostResponse};
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

/// Turns raw listing parameters into a repository query.
pub fn parse_query(params: PostQuery) -> Result<FindAllQuery> {
    let sort = match params.sort.as_deref() {
        Some(field) => field.parse::<SortField>()?,
        None => SortField::default(),
    };

    let limit = params
        .limit
        .map(|limit| non_negative("limit", limit))
        .transpose()?;
    let offset = params
        .offset
        .map(|offset| non_negative("offset", offset))
        .transpose()?
        .unwrap_or(0);

    let status = params
        .status
        .map(|status| status.parse::<StatusType>())
        .transpose()
        .map_err(AppError::ValidationError)?;

    Ok(FindAllQuery {
        filter: PostFilter {
            user_id: params.user_id,
            tag: params.tag,
            status,
        },
        sort,
        desc: params.desc.unwrap_or(false),
        limit,
        offset,
    })
}

fn non_negative(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        AppError::ValidationError(format!("{} must be non-negative, got {}", name, value))
    })
}

/// Validates and converts a request body. Runs before any store access.
fn post_from_request(request: PostRequest) -> Result<Post> {
    request.validate()?;
    Post::try_from(request)
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<dyn PostRepository> {
        &self.repo
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: &str) -> Result<PostResponse> {
        let result: Result<PostResponse> = async {
            let _timer = repository_timer("find_by_id");
            self.repo.find_by_id(post_id).await
        }
        .await
        .map(PostResponse::from);

        record_outcome("get", &result);
        result
    }

    /// List posts matching the query parameters
    pub async fn list_posts(&self, params: PostQuery) -> Result<Vec<PostResponse>> {
        let result: Result<Vec<PostResponse>> = async {
            let query = parse_query(params)?;
            let _timer = repository_timer("find_all");
            let posts = self.repo.find_all(&query).await?;
            tracing::debug!(
                sort = ?query.sort,
                desc = query.desc,
                returned = posts.len(),
                "listed posts"
            );
            Ok(posts.into_iter().map(PostResponse::from).collect())
        }
        .await;

        record_outcome("list", &result);
        result
    }

    /// Create a new post; the repository assigns post and node IDs
    pub async fn create_post(&self, request: PostRequest) -> Result<PostResponse> {
        let result: Result<PostResponse> = async {
            let post = post_from_request(request)?;
            let _timer = repository_timer("save");
            let saved = self.repo.save(post).await?;
            tracing::info!(
                post_id = saved.id.as_deref().unwrap_or_default(),
                nodes = saved.nodes.as_ref().map(Vec::len).unwrap_or(0),
                "post created"
            );
            Ok(PostResponse::from(saved))
        }
        .await;

        record_outcome("create", &result);
        result
    }

    /// Replace every mutable field of an existing post. The path ID wins over
    /// anything in the body.
    pub async fn update_post(&self, post_id: &str, request: PostRequest) -> Result<PostResponse> {
        let result: Result<PostResponse> = async {
            let mut post = post_from_request(request)?;
            {
                let _timer = repository_timer("find_by_id");
                self.repo.find_by_id(post_id).await?;
            }
            post.id = Some(post_id.to_string());

            let _timer = repository_timer("save");
            let saved = self.repo.save(post).await?;
            tracing::info!(post_id, "post updated");
            Ok(PostResponse::from(saved))
        }
        .await;

        record_outcome("update", &result);
        result
    }

    /// Permanently remove a post together with its nodes
    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        let result: Result<()> = async {
            let _timer = repository_timer("delete_by_id");
            self.repo.delete_by_id(post_id).await
        }
        .await;

        match &result {
            Ok(()) => tracing::info!(post_id, "post deleted"),
            Err(err) => tracing::debug!(post_id, "post delete failed: {}", err),
        }
        record_outcome("delete", &result);
        result
    }
}
