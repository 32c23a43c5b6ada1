//! Domain entities. Pure data structures for the blog.
//!
//! Posts are always handed out with their author, location and category resolved,
//! so presentation code never goes back to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Max length of titles and location names.
pub const MAX_TITLE_LEN: usize = 256;

/// Post author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// "First Last" when known, otherwise the username.
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

/// A place a post can be tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub is_published: bool,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Unique page identifier used in URLs.
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub is_published: bool,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// A publication with its relations resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// May lie in the future for scheduled publications.
    pub pub_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub is_published: bool,
    pub author: User,
    pub location: Option<Location>,
    pub category: Option<Category>,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Result of a category page: the category plus its visible posts, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFeed {
    pub category: Category,
    pub posts: Vec<Post>,
}

/// Slugs may contain Latin letters, digits, hyphen and underscore.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Titles and names must be non-empty and at most [`MAX_TITLE_LEN`] characters.
pub fn is_valid_title(title: &str) -> bool {
    let len = title.chars().count();
    len > 0 && len <= MAX_TITLE_LEN
}
