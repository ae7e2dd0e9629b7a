/// Domain models for post-service
///
/// - Post: aggregate holding post metadata, tags and its ordered nodes
/// - Node: typed content block owned by exactly one post
pub mod node;
pub mod post;

pub use node::{LangType, Node, NodeContent, NodeType};
pub use post::{Post, StatusType};
