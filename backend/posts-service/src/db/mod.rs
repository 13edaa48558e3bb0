/// Database access layer
///
/// Repositories are free functions over a `PgPool` or an open transaction.
pub mod author_repo;
pub mod post_repo;

/// Embedded migrations from `backend/posts-service/migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
