/// Post service - creation, authorship updates, and author-filtered fetch
use crate::db::{author_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Post, PostUpdate, SortDirection, SortField};
use sqlx::PgPool;
use std::collections::BTreeSet;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new post authored by `user_id`.
    ///
    /// The post row and the creator's authorship link are committed in one
    /// transaction, so readers never observe an author-less post.
    pub async fn create_post(
        &self,
        user_id: i64,
        text: &str,
        tags: Option<&[String]>,
    ) -> Result<Post> {
        let mut tx = self.pool.begin().await?;

        let post = post_repo::create_post(&mut tx, text, tags).await?;
        author_repo::add_author(&mut tx, user_id, post.id).await?;

        tx.commit().await?;

        tracing::debug!(post_id = post.id, user_id, "post created");
        Ok(post)
    }

    /// Apply a partial update to a post on behalf of `user_id`.
    ///
    /// Fails with `NotFound` if the post does not exist and with
    /// `Forbidden` if the caller is not among its current authors. When an
    /// author set is given it is de-duplicated and reconciled wholesale:
    /// links absent from the new set are removed, missing ones added,
    /// existing ones left untouched. Returns the post together with the
    /// sorted-ascending set of author ids after the update.
    pub async fn update_post(
        &self,
        user_id: i64,
        post_id: i64,
        update: PostUpdate,
    ) -> Result<(Post, Vec<i64>)> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let current_authors = author_repo::list_author_ids(&self.pool, post_id).await?;
        if !current_authors.contains(&user_id) {
            return Err(AppError::Forbidden(
                "You are not authorized to update this post".to_string(),
            ));
        }

        // Present-but-empty fields are treated as not provided.
        let author_ids = update
            .author_ids
            .filter(|ids| !ids.is_empty())
            .map(dedup_sorted);
        let text = update.text.filter(|t| !t.is_empty());
        let tags = update.tags.filter(|t| !t.is_empty());

        if author_ids.is_some() || text.is_some() || tags.is_some() {
            let mut tx = self.pool.begin().await?;

            if let Some(ids) = &author_ids {
                let removed = author_repo::remove_authors_not_in(&mut tx, post_id, ids).await?;
                author_repo::add_missing_authors(&mut tx, post_id, ids).await?;
                tracing::debug!(post_id, removed, authors = ids.len(), "author set updated");
            }

            if text.is_some() || tags.is_some() {
                post_repo::update_post_fields(&mut tx, post_id, text.as_deref(), tags.as_deref())
                    .await?;
            }

            tx.commit().await?;
        }

        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::Internal("Post vanished during update".to_string()))?;
        let authors = author_repo::list_author_ids(&self.pool, post_id).await?;

        Ok((post, authors))
    }

    /// Fetch the union of posts authored by any id in `author_ids`, sorted
    /// by the requested field. Ids matching no posts contribute nothing.
    pub async fn fetch_by_authors(
        &self,
        author_ids: &[i64],
        sort: SortField,
        direction: SortDirection,
    ) -> Result<Vec<Post>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let posts =
            post_repo::find_posts_by_authors(&self.pool, author_ids, sort, direction).await?;
        Ok(posts)
    }
}

fn dedup_sorted(ids: Vec<i64>) -> Vec<i64> {
    ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_sorted_collapses_and_orders() {
        assert_eq!(dedup_sorted(vec![2, 2, 3]), vec![2, 3]);
        assert_eq!(dedup_sorted(vec![5, 1, 5, 1]), vec![1, 5]);
        assert_eq!(dedup_sorted(vec![]), Vec::<i64>::new());
    }
}
