/// Persistence layer
///
/// This module provides:
/// - `PostRepository`, the narrow contract handlers and services rely on
/// - Query types for filtered, sorted and windowed listing
/// - Adapters: in-memory (`memory`) and PostgreSQL document storage (`post_repo`)
pub mod memory;
pub mod post_repo;

pub use memory::InMemoryPostRepository;
pub use post_repo::PgPostRepository;

use crate::error::{AppError, Result};
use crate::models::{Post, StatusType};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::str::FromStr;
use uuid::Uuid;

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Id,
    Title,
    Source,
    Published,
    Changed,
    Status,
}

impl SortField {
    /// Compares two posts by this field in ascending order.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Source => a.source.cmp(&b.source),
            SortField::Published => a.published.cmp(&b.published),
            SortField::Changed => a.changed.cmp(&b.changed),
            SortField::Status => a.status.cmp(&b.status),
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "source" => Ok(SortField::Source),
            "published" => Ok(SortField::Published),
            "changed" => Ok(SortField::Changed),
            "status" => Ok(SortField::Status),
            other => Err(AppError::ValidationError(format!(
                "unknown sort field '{}'; expected one of id, title, source, published, changed, status",
                other
            ))),
        }
    }
}

/// Conditions a post must meet to be listed. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub user_id: Option<String>,
    pub tag: Option<String>,
    pub status: Option<StatusType>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(user_id) = &self.user_id {
            if &post.user_id != user_id {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            let tagged = post
                .tags
                .as_ref()
                .map(|tags| tags.iter().any(|t| t == tag))
                .unwrap_or(false);
            if !tagged {
                return false;
            }
        }
        if let Some(status) = self.status {
            if post.status != status {
                return false;
            }
        }
        true
    }
}

/// A validated listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindAllQuery {
    pub filter: PostFilter,
    pub sort: SortField,
    pub desc: bool,
    /// `None` means no limit
    pub limit: Option<usize>,
    pub offset: usize,
}

impl FindAllQuery {
    /// Orders two posts as this query wants them listed. Equal posts compare
    /// equal so that a stable sort keeps storage order for ties.
    pub fn ordering(&self, a: &Post, b: &Post) -> Ordering {
        let ord = self.sort.compare(a, b);
        if self.desc {
            ord.reverse()
        } else {
            ord
        }
    }
}

/// Storage contract for posts and their embedded nodes.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Inserts or fully replaces a post, assigning missing post and node IDs.
    async fn save(&self, post: Post) -> Result<Post>;

    /// Fails with `AppError::NotFound` when no post has this ID.
    async fn find_by_id(&self, id: &str) -> Result<Post>;

    async fn find_all(&self, query: &FindAllQuery) -> Result<Vec<Post>>;

    /// Fails with `AppError::NotFound` when no post has this ID.
    async fn delete_by_id(&self, id: &str) -> Result<()>;

    async fn delete_all(&self) -> Result<()>;

    async fn count(&self) -> Result<u64>;

    async fn health_check(&self) -> Result<()>;
}

/// Fills in the IDs a post needs before it is stored and points every node
/// at its owning post.
pub fn assign_ids(mut post: Post) -> Post {
    let post_id = post
        .id
        .get_or_insert_with(|| Uuid::new_v4().to_string())
        .clone();

    if let Some(nodes) = post.nodes.as_mut() {
        for node in nodes.iter_mut() {
            if node.id.is_none() {
                node.id = Some(Uuid::new_v4().to_string());
            }
            node.post_id = Some(post_id.clone());
        }
    }

    post
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Post, StatusType};

    pub fn post(id: &str, title: &str, source: &str, published: i64, status: StatusType) -> Post {
        Post {
            id: Some(id.to_string()),
            title: title.to_string(),
            source: source.to_string(),
            published,
            changed: published + 86_400,
            status,
            user_id: format!("user-{}", id),
            tags: None,
            nodes: None,
        }
    }

    /// Four posts with distinct values in every sortable field.
    pub fn seed() -> Vec<Post> {
        vec![
            post("4", "oracle", "Github.com", 1491379425, StatusType::Deleted),
            post("1", "string", "Wikipedia.com", 1591379425, StatusType::Active),
            post("3", "pupil", "Google.com", 1601920225, StatusType::Banned),
            post("2", "title", "Habr.com", 1701920225, StatusType::Moderated),
        ]
    }
}
