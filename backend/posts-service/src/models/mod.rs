/// Data models for the posts service
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted post row. The JSON representation is plain field
/// enumeration; `tags` is omitted when NULL.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub reads: i64,
    pub likes: i64,
    pub popularity: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update to a post, validated at the handler boundary.
///
/// Present-but-empty fields (empty `text`, empty `tags`, empty
/// `author_ids`) are treated as not provided and skipped by the service
/// layer.
#[derive(Debug, Default, Clone)]
pub struct PostUpdate {
    pub author_ids: Option<Vec<i64>>,
    pub text: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Whitelisted sort columns for `GET /posts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Reads,
    Likes,
    Popularity,
}

impl SortField {
    /// The column name interpolated into the ORDER BY clause. Values come
    /// only from this whitelist, never from raw user input.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Reads => "reads",
            SortField::Likes => "likes",
            SortField::Popularity => "popularity",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "reads" => Ok(SortField::Reads),
            "likes" => Ok(SortField::Likes),
            "popularity" => Ok(SortField::Popularity),
            _ => Err(()),
        }
    }
}

/// Sort direction for `GET /posts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_parses_whitelisted_values() {
        assert_eq!("id".parse(), Ok(SortField::Id));
        assert_eq!("reads".parse(), Ok(SortField::Reads));
        assert_eq!("likes".parse(), Ok(SortField::Likes));
        assert_eq!("popularity".parse(), Ok(SortField::Popularity));
        assert_eq!("bogus".parse::<SortField>(), Err(()));
        assert_eq!("LIKES".parse::<SortField>(), Err(()));
    }

    #[test]
    fn sort_direction_parses_whitelisted_values() {
        assert_eq!("asc".parse(), Ok(SortDirection::Asc));
        assert_eq!("desc".parse(), Ok(SortDirection::Desc));
        assert_eq!("sideways".parse::<SortDirection>(), Err(()));
    }

    #[test]
    fn defaults_are_id_ascending() {
        assert_eq!(SortField::default(), SortField::Id);
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }

    #[test]
    fn post_serialization_omits_null_tags() {
        let post = Post {
            id: 1,
            text: "hello".into(),
            tags: None,
            reads: 0,
            likes: 0,
            popularity: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&post).unwrap();
        assert!(value.get("tags").is_none());
        assert_eq!(value["text"], "hello");
    }
}
