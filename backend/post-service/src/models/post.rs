/// Post model - the aggregate persisted as one document
use super::node::Node;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Moderation status of a post.
///
/// Variant order is significant: sorting by status follows declaration order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusType {
    #[default]
    Active,
    Deleted,
    Banned,
    Moderated,
}

impl StatusType {
    pub const ALL: [StatusType; 4] = [
        StatusType::Active,
        StatusType::Deleted,
        StatusType::Banned,
        StatusType::Moderated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusType::Active => "ACTIVE",
            StatusType::Deleted => "DELETED",
            StatusType::Banned => "BANNED",
            StatusType::Moderated => "MODERATED",
        }
    }

    /// Position in declaration order, used as the sort key.
    pub fn rank(&self) -> i16 {
        *self as i16
    }
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusType::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Option<String>,
    pub title: String,
    pub source: String,
    /// Epoch seconds
    pub published: i64,
    /// Epoch seconds of the last modification
    pub changed: i64,
    pub status: StatusType,
    pub user_id: String,
    pub tags: Option<Vec<String>>,
    pub nodes: Option<Vec<Node>>,
}
