/// Post conversions between wire shapes and the domain model
use crate::error::{AppError, Result};
use crate::models::{Node, Post};
use crate::transfers::{NodeResponse, PostRequest, PostResponse};

/// Drops repeated tags, keeping the first occurrence.
fn distinct_tags(tags: Option<Vec<String>>) -> Option<Vec<String>> {
    tags.map(|tags| {
        let mut seen = std::collections::HashSet::new();
        tags.into_iter()
            .filter(|tag| seen.insert(tag.clone()))
            .collect()
    })
}

impl TryFrom<PostRequest> for Post {
    type Error = AppError;

    fn try_from(request: PostRequest) -> Result<Self> {
        let nodes = request
            .nodes
            .map(|nodes| {
                nodes
                    .into_iter()
                    .map(Node::try_from)
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(Post {
            id: None,
            title: request.title,
            source: request.source,
            published: request.published,
            changed: request.changed,
            status: request.status,
            user_id: request.user_id,
            tags: distinct_tags(request.tags),
            nodes,
        })
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            id: post.id,
            title: post.title,
            source: post.source,
            published: post.published,
            changed: post.changed,
            status: post.status,
            user_id: post.user_id,
            tags: post.tags,
            nodes: post
                .nodes
                .map(|nodes| nodes.into_iter().map(NodeResponse::from).collect()),
        }
    }
}

impl TryFrom<PostResponse> for Post {
    type Error = AppError;

    fn try_from(response: PostResponse) -> Result<Self> {
        let nodes = response
            .nodes
            .map(|nodes| {
                nodes
                    .into_iter()
                    .map(Node::try_from)
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(Post {
            id: response.id,
            title: response.title,
            source: response.source,
            published: response.published,
            changed: response.changed,
            status: response.status,
            user_id: response.user_id,
            tags: response.tags,
            nodes,
        })
    }
}
