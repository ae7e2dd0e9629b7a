use super::{assign_ids, FindAllQuery, PostRepository};
use crate::error::{AppError, Result};
use crate::models::Post;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Post store kept in process memory.
///
/// Posts are held in insertion order; replacing a post keeps its position, so
/// ties in a sorted listing come back in the order posts were first stored.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn save(&self, post: Post) -> Result<Post> {
        let post = assign_ids(post);
        let mut posts = self.posts.write().await;

        match posts.iter_mut().find(|stored| stored.id == post.id) {
            Some(stored) => *stored = post.clone(),
            None => posts.push(post.clone()),
        }

        Ok(post)
    }

    async fn find_by_id(&self, id: &str) -> Result<Post> {
        self.posts
            .read()
            .await
            .iter()
            .find(|post| post.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| AppError::post_not_found(id))
    }

    async fn find_all(&self, query: &FindAllQuery) -> Result<Vec<Post>> {
        let mut matching: Vec<Post> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|post| query.filter.matches(post))
            .cloned()
            .collect();

        matching.sort_by(|a, b| query.ordering(a, b));

        Ok(matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|post| post.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::post_not_found(id))?;
        posts.remove(index);
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.posts.write().await.clear();
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
