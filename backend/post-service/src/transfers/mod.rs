/// Request and response shapes exposed over HTTP
///
/// Incoming shapes (`*Request`) are validated and converted into domain
/// models by `crate::converters`; outgoing shapes (`*Response`) are produced
/// from domain models.
pub mod nodes;

use crate::models::{NodeType, StatusType};
use nodes::NodePayload;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Incoming post body for create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub source: String,
    #[validate(range(min = 0, message = "published must be a non-negative epoch second"))]
    pub published: i64,
    #[validate(range(min = 0, message = "changed must be a non-negative epoch second"))]
    pub changed: i64,
    #[serde(default)]
    pub status: StatusType,
    #[validate(length(min = 1, message = "userId must not be empty"))]
    pub user_id: String,
    pub tags: Option<Vec<String>>,
    pub nodes: Option<Vec<NodeRequest>>,
}

/// Incoming node. The payload stays raw JSON until the converter has looked
/// up the decoder registered for `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeRequest {
    pub post_id: Option<String>,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub node: serde_json::Value,
}

impl NodeRequest {
    /// Builds a request from a typed payload.
    pub fn with_payload<T: Serialize>(node_type: NodeType, payload: &T) -> serde_json::Result<Self> {
        Ok(Self {
            post_id: None,
            node_type: node_type.to_string(),
            node: serde_json::to_value(payload)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeResponse {
    pub id: Option<String>,
    pub post_id: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub node: NodePayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Option<String>,
    pub title: String,
    pub source: String,
    pub published: i64,
    pub changed: i64,
    pub status: StatusType,
    pub user_id: String,
    pub tags: Option<Vec<String>>,
    pub nodes: Option<Vec<NodeResponse>>,
}

/// Query string accepted by `GET /posts`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PostQuery {
    /// One of id, title, source, published, changed, status (default id)
    pub sort: Option<String>,
    /// Sort descending when true
    pub desc: Option<bool>,
    /// Maximum number of posts returned; unlimited when absent
    pub limit: Option<i64>,
    /// Number of posts skipped after sorting
    pub offset: Option<i64>,
    pub user_id: Option<String>,
    pub tag: Option<String>,
    pub status: Option<String>,
}
