use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Server-assigned identifier of a post.
///
/// Backends hand out either numeric or string identifiers; both are kept
/// verbatim so they render unchanged in request paths. Equality goes by the
/// rendered form, so `7` and `"7"` name the same post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Numeric(i64),
    Text(String),
}

impl PartialEq for PostId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Numeric(left), Self::Numeric(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for PostId {}

impl Hash for PostId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for PostId {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Ok(trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Numeric))
    }
}

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        match id.parse() {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        }
    }
}

/// Publication state of a post, assigned by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A blog post as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Server-assigned identifier.
    pub id: PostId,

    /// Post title. `null` or missing reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    /// Post body. `null` or missing reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,

    /// Draft or published; absent on backends that do not track it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,

    /// ISO date (or date-time) string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Author name supplied by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Post {
    /// Whether the backend marked this post as published.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == Some(PostStatus::Published)
    }

    /// Renders the post date as `Month D, YYYY`.
    ///
    /// Returns `None` when the date is missing or not an ISO date.
    #[must_use]
    pub fn display_date(&self) -> Option<String> {
        let raw = self.date.as_deref()?.trim();
        let date = DateTime::parse_from_rfc3339(raw)
            .map(|value| value.date_naive())
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|value| value.date())
            })
            .ok()?;
        Some(date.format("%B %-d, %Y").to_string())
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body for creating or updating a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

impl PostInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Body of `GET /api/posts`.
///
/// Some backends wrap the list in an object; anything that is neither a
/// list nor a `posts` envelope is treated as an empty listing. Entries are
/// kept raw so one malformed post does not hide the rest.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostListResponse {
    Bare(Vec<serde_json::Value>),
    Envelope { posts: Vec<serde_json::Value> },
    Other(serde_json::Value),
}

impl PostListResponse {
    /// The raw list entries, empty for an unrecognised body.
    #[must_use]
    pub fn into_entries(self) -> Vec<serde_json::Value> {
        match self {
            Self::Bare(entries) | Self::Envelope { posts: entries } => entries,
            Self::Other(_) => Vec::new(),
        }
    }

    /// Decode every entry, returning the posts and the entries that did not
    /// decode, with their errors.
    #[must_use]
    pub fn into_posts(self) -> (Vec<Post>, Vec<serde_json::Error>) {
        let mut posts = Vec::new();
        let mut rejected = Vec::new();
        for entry in self.into_entries() {
            match serde_json::from_value::<Post>(entry) {
                Ok(post) => posts.push(post),
                Err(err) => rejected.push(err),
            }
        }
        (posts, rejected)
    }
}
