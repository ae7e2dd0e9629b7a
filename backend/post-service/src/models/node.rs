/// Node model - a typed content block inside a post
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Discriminator for the payload a node carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Text,
    Image,
    Video,
    Audio,
    Code,
    List,
    Poll,
}

impl NodeType {
    pub const ALL: [NodeType; 7] = [
        NodeType::Text,
        NodeType::Image,
        NodeType::Video,
        NodeType::Audio,
        NodeType::Code,
        NodeType::List,
        NodeType::Poll,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Text => "TEXT",
            NodeType::Image => "IMAGE",
            NodeType::Video => "VIDEO",
            NodeType::Audio => "AUDIO",
            NodeType::Code => "CODE",
            NodeType::List => "LIST",
            NodeType::Poll => "POLL",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Programming language of a code node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LangType {
    Java,
    Kotlin,
    Scala,
    Groovy,
    C,
    Cpp,
    Csharp,
    Go,
    Rust,
    Python,
    Javascript,
    Typescript,
    Php,
    Ruby,
    Swift,
    Sql,
    Shell,
    Html,
    Css,
    Plain,
}

/// Payload of a node. The variant is the node's type, so a node can never
/// hold fields that belong to another type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "node",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum NodeContent {
    Text { content: String },
    Image { image_url: String },
    Video { video_url: String },
    Audio { audio_url: String },
    Code { language: LangType, content: String },
    List { content: Vec<String> },
    Poll { title: String, items: Vec<String> },
}

impl NodeContent {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeContent::Text { .. } => NodeType::Text,
            NodeContent::Image { .. } => NodeType::Image,
            NodeContent::Video { .. } => NodeType::Video,
            NodeContent::Audio { .. } => NodeType::Audio,
            NodeContent::Code { .. } => NodeType::Code,
            NodeContent::List { .. } => NodeType::List,
            NodeContent::Poll { .. } => NodeType::Poll,
        }
    }
}

/// A content block owned by exactly one post.
///
/// `id` and `post_id` stay `None` until the repository persists the owning
/// post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: Option<String>,
    pub post_id: Option<String>,
    #[serde(flatten)]
    pub content: NodeContent,
}

impl Node {
    pub fn new(content: NodeContent) -> Self {
        Self {
            id: None,
            post_id: None,
            content,
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.content.node_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_type_follows_payload() {
        let node = Node::new(NodeContent::Poll {
            title: "news".into(),
            items: vec!["One".into(), "Two".into()],
        });
        assert_eq!(node.node_type(), NodeType::Poll);
    }

    #[test]
    fn node_type_parses_wire_names_only() {
        assert_eq!("CODE".parse::<NodeType>(), Ok(NodeType::Code));
        assert!("code".parse::<NodeType>().is_err());
        assert!("GIF".parse::<NodeType>().is_err());
    }

    #[test]
    fn stored_document_layout() {
        let node = Node {
            id: Some("n1".into()),
            post_id: Some("p1".into()),
            content: NodeContent::Code {
                language: LangType::Java,
                content: "main".into(),
            },
        };

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "n1",
                "postId": "p1",
                "type": "CODE",
                "node": { "language": "JAVA", "content": "main" }
            })
        );

        let decoded: Node = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, node);
    }

    #[test]
    fn image_fields_are_camel_case() {
        let value = serde_json::to_value(NodeContent::Image {
            image_url: "url".into(),
        })
        .unwrap();
        assert_eq!(value, json!({ "type": "IMAGE", "node": { "imageUrl": "url" } }));
    }
}
