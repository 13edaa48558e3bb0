/// Post handlers - HTTP endpoints for post operations
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{Post, PostUpdate, SortDirection, SortField};
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Update body. `authorIds` and `tags` are decoded as raw JSON values and
/// validated explicitly so type violations surface as 400 with a message
/// instead of a framework default.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(rename = "authorIds")]
    pub author_ids: Option<Value>,
    pub text: Option<String>,
    pub tags: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct FetchPostsQuery {
    #[serde(rename = "authorIds")]
    pub author_ids: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostWithAuthors {
    #[serde(flatten)]
    pub post: Post,
    #[serde(rename = "authorIds")]
    pub author_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct UpdatePostResponse {
    pub post: PostWithAuthors,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
}

/// Create a new post authored by the caller
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let body = req.into_inner();
    let text = body.text.ok_or_else(|| {
        AppError::BadRequest("Must provide text for the new post".to_string())
    })?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(user_id.0, &text, body.tags.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Update a post's text, tags, and/or author set
pub async fn update_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<i64>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let body = req.into_inner();

    let update = PostUpdate {
        author_ids: body.author_ids.as_ref().map(parse_author_ids).transpose()?,
        text: body.text,
        tags: body.tags.as_ref().map(parse_tags).transpose()?,
    };

    let service = PostService::new((**pool).clone());
    let (post, author_ids) = service.update_post(user_id.0, *post_id, update).await?;

    Ok(HttpResponse::Ok().json(UpdatePostResponse {
        post: PostWithAuthors { post, author_ids },
    }))
}

/// Fetch the union of posts authored by the requested author ids
pub async fn fetch_posts(
    pool: web::Data<PgPool>,
    _user_id: UserId,
    query: web::Query<FetchPostsQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();

    let author_ids = parse_author_id_tokens(query.author_ids.as_deref());

    let sort = match query.sort_by.as_deref() {
        None => SortField::default(),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid sortBy parameter".to_string()))?,
    };
    let direction = match query.direction.as_deref() {
        None => SortDirection::default(),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid direction parameter".to_string()))?,
    };

    let service = PostService::new((**pool).clone());
    let posts = service.fetch_by_authors(&author_ids, sort, direction).await?;

    Ok(HttpResponse::Ok().json(PostListResponse { posts }))
}

/// Validate an `authorIds` body field: must be an array whose elements are
/// integers or integer-convertible strings. Duplicates are preserved here;
/// the service de-duplicates.
fn parse_author_ids(value: &Value) -> Result<Vec<i64>> {
    let items = value.as_array().ok_or_else(|| {
        AppError::BadRequest("Invalid type, authorIds is not an array".to_string())
    })?;

    items
        .iter()
        .map(|item| match item {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
        .map(|parsed| {
            parsed.ok_or_else(|| {
                AppError::BadRequest("Invalid type, non integer in authorIds".to_string())
            })
        })
        .collect()
}

/// Validate a `tags` body field: must be an array of strings.
fn parse_tags(value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| AppError::BadRequest("Invalid type, tags is not an array".to_string()))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                AppError::BadRequest("Invalid type, non string in tags".to_string())
            })
        })
        .collect()
}

/// Parse the comma-separated `authorIds` query parameter, silently
/// discarding non-numeric tokens. A missing parameter is an empty list.
fn parse_author_id_tokens(raw: Option<&str>) -> Vec<i64> {
    raw.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|token| token.parse::<i64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_author_ids_accepts_integers_and_numeric_strings() {
        let ids = parse_author_ids(&json!([2, "3", 2])).unwrap();
        assert_eq!(ids, vec![2, 3, 2]);
    }

    #[test]
    fn parse_author_ids_rejects_non_array() {
        let err = parse_author_ids(&json!(5)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid type, authorIds is not an array");
    }

    #[test]
    fn parse_author_ids_rejects_non_integer_elements() {
        for value in [json!(["abc"]), json!([2.5]), json!([true]), json!([null])] {
            let err = parse_author_ids(&value).unwrap_err();
            assert_eq!(err.to_string(), "Invalid type, non integer in authorIds");
        }
    }

    #[test]
    fn parse_tags_requires_array_of_strings() {
        assert_eq!(
            parse_tags(&json!(["travel", "vacation"])).unwrap(),
            vec!["travel".to_string(), "vacation".to_string()]
        );

        let err = parse_tags(&json!("travel")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid type, tags is not an array");

        let err = parse_tags(&json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid type, non string in tags");
    }

    #[test]
    fn author_id_tokens_discard_non_numeric() {
        assert_eq!(parse_author_id_tokens(Some("1,2,abc, 3 ,,")), vec![1, 2, 3]);
        assert_eq!(parse_author_id_tokens(Some("-1")), Vec::<i64>::new());
        assert_eq!(parse_author_id_tokens(None), Vec::<i64>::new());
    }
}
