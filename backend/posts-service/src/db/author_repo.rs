use sqlx::{PgPool, Postgres, Transaction};

/// Link a user to a post. The `(user_id, post_id)` primary key makes this
/// idempotent under `ON CONFLICT DO NOTHING`.
pub async fn add_author(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    post_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO post_authors (user_id, post_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// All author user ids for a post, sorted ascending.
pub async fn list_author_ids(pool: &PgPool, post_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT user_id FROM post_authors
        WHERE post_id = $1
        ORDER BY user_id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Remove every authorship link for this post whose user id is not in
/// `keep`.
pub async fn remove_authors_not_in(
    tx: &mut Transaction<'_, Postgres>,
    post_id: i64,
    keep: &[i64],
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM post_authors
        WHERE post_id = $1 AND user_id <> ALL($2)
        "#,
    )
    .bind(post_id)
    .bind(keep)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Add a link for every id in `author_ids` not already linked; existing
/// links are left untouched.
pub async fn add_missing_authors(
    tx: &mut Transaction<'_, Postgres>,
    post_id: i64,
    author_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO post_authors (user_id, post_id)
        SELECT unnest($2::bigint[]), $1
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(author_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
