/// Posts Service Library
///
/// A small HTTP API for managing posts with many-to-many authorship.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route registration
/// - `models`: Data structures for posts and sort parameters
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `middleware`: JWT authentication middleware
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
