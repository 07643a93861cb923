// Wire types for the blog backend plus the small helpers that turn form
// input into request payloads and query strings.

use serde::{Deserialize, Serialize};

/// A blog post as returned by `/posts` and `/posts/search`.
/// Optional fields default to empty values when the backend omits them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Comment {
    #[serde(default)]
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Register and login payload.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /posts` and `PUT /posts/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl PostForm {
    /// Build a form from raw text fields; `tags` is the comma separated entry.
    pub fn from_input(title: &str, content: &str, category: &str, tags: &str) -> Self {
        PostForm {
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            tags: parse_tags(tags),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewComment {
    pub text: String,
}

/// Split a comma separated tag entry, trimming each tag and dropping
/// segments that are empty or only whitespace.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Paging and ordering options for `GET /posts`. Empty strings mean
/// "not set", mirroring blank form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: String,
    pub limit: String,
    pub sort: String,
    pub direction: String,
}

impl ListQuery {
    /// Query pairs in request order. `direction` is only sent together
    /// with a non-empty `sort`.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if !self.page.is_empty() {
            pairs.push(("page", self.page.as_str()));
        }
        if !self.limit.is_empty() {
            pairs.push(("limit", self.limit.as_str()));
        }
        if !self.sort.is_empty() {
            pairs.push(("sort", self.sort.as_str()));
            if !self.direction.is_empty() {
                pairs.push(("direction", self.direction.as_str()));
            }
        }
        pairs
    }
}

/// Filters for `GET /posts/search`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub title: String,
    pub author: String,
    pub category: String,
    pub tag: String,
}

impl SearchFilters {
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", self.title.as_str()),
            ("author", self.author.as_str()),
            ("category", self.category.as_str()),
            ("tag", self.tag.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .collect()
    }
}
