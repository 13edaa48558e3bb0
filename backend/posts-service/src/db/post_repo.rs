use crate::models::{Post, SortDirection, SortField};
use sqlx::{PgPool, Postgres, Transaction};

const POST_COLUMNS: &str = "id, text, tags, reads, likes, popularity, created_at, updated_at";

/// Insert a new post. Runs inside the caller's transaction so the creator's
/// authorship link lands in the same commit.
pub async fn create_post(
    tx: &mut Transaction<'_, Postgres>,
    text: &str,
    tags: Option<&[String]>,
) -> Result<Post, sqlx::Error> {
    let query = format!(
        "INSERT INTO posts (text, tags) VALUES ($1, $2) RETURNING {POST_COLUMNS}"
    );

    sqlx::query_as::<_, Post>(&query)
        .bind(text)
        .bind(tags)
        .fetch_one(&mut **tx)
        .await
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");

    sqlx::query_as::<_, Post>(&query)
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// Overwrite a post's text and/or tags. Fields passed as `None` are left
/// unchanged.
pub async fn update_post_fields(
    tx: &mut Transaction<'_, Postgres>,
    post_id: i64,
    text: Option<&str>,
    tags: Option<&[String]>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET text = COALESCE($2, text),
            tags = COALESCE($3, tags),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .bind(text)
    .bind(tags)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Fetch the union of posts authored by any of `author_ids`, deduplicated
/// by post id, ordered by the whitelisted sort column with `id ASC` as a
/// deterministic tie-break.
pub async fn find_posts_by_authors(
    pool: &PgPool,
    author_ids: &[i64],
    sort: SortField,
    direction: SortDirection,
) -> Result<Vec<Post>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        WHERE EXISTS (
            SELECT 1 FROM post_authors pa
            WHERE pa.post_id = p.id AND pa.user_id = ANY($1)
        )
        ORDER BY p.{} {}, p.id ASC
        "#,
        sort.column(),
        direction.sql(),
    );

    sqlx::query_as::<_, Post>(&query)
        .bind(author_ids)
        .fetch_all(pool)
        .await
}
