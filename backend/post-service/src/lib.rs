/// Post Service Library
///
/// CRUD backend for posts built from typed content nodes (text, image,
/// video, audio, code, list, poll).
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route registration
/// - `models`: Domain types for posts and nodes
/// - `transfers`: Request/response shapes used on the wire
/// - `converters`: Mapping between wire shapes and domain types
/// - `services`: Validation and repository orchestration
/// - `db`: Repository contract and store adapters
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
/// - `openapi`: Generated API description
pub mod config;
pub mod converters;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod services;
pub mod transfers;

pub use config::Config;
pub use error::{AppError, Result};
