/// Conversions between wire shapes (`crate::transfers`) and domain models
/// (`crate::models`)
///
/// All conversions are pure. They never assign IDs; the repository does that
/// when a post is saved.
pub mod node;
pub mod post;
