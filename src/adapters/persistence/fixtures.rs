//! JSON fixtures for seeding a development database.
//!
//! Ids are explicit so posts can reference users, locations and categories, either
//! from the same file or already in the database. The store's foreign keys check them.
//! `is_published` defaults to true; a missing `created_at` becomes the load time.

use crate::domain::entities::{is_valid_slug, is_valid_title};
use crate::domain::{DomainError, User};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationFixture {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFixture {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostFixture {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub text: String,
    pub pub_date: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub author_id: i64,
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Parsed fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub locations: Vec<LocationFixture>,
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,
    #[serde(default)]
    pub posts: Vec<PostFixture>,
}

/// Number of records per table in a fixture set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixtureStats {
    pub users: usize,
    pub locations: usize,
    pub categories: usize,
    pub posts: usize,
}

impl fmt::Display for FixtureStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} users, {} locations, {} categories, {} posts",
            self.users, self.locations, self.categories, self.posts
        )
    }
}

impl Fixtures {
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| DomainError::Fixture(e.to_string()))
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::Fixture(format!("read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn stats(&self) -> FixtureStats {
        FixtureStats {
            users: self.users.len(),
            locations: self.locations.len(),
            categories: self.categories.len(),
            posts: self.posts.len(),
        }
    }

    /// Checks field rules and id uniqueness. References are left to the database.
    /// Reports the first problem found.
    pub fn validate(&self) -> Result<(), DomainError> {
        unique_ids("user", self.users.iter().map(|u| u.id))?;
        unique_ids("location", self.locations.iter().map(|l| l.id))?;
        unique_ids("category", self.categories.iter().map(|c| c.id))?;
        unique_ids("post", self.posts.iter().map(|p| p.id))?;

        let mut usernames = HashSet::new();
        for u in &self.users {
            if u.username.is_empty() || !usernames.insert(u.username.as_str()) {
                return Err(invalid(format!(
                    "user {}: empty or duplicate username {:?}",
                    u.id, u.username
                )));
            }
        }

        for l in &self.locations {
            if !is_valid_title(&l.name) {
                return Err(invalid(format!("location {}: bad name length", l.id)));
            }
        }

        let mut slugs = HashSet::new();
        for c in &self.categories {
            if !is_valid_title(&c.title) {
                return Err(invalid(format!("category {}: bad title length", c.id)));
            }
            if !is_valid_slug(&c.slug) {
                return Err(invalid(format!(
                    "category {}: slug {:?} may only contain Latin letters, digits, '-' and '_'",
                    c.id, c.slug
                )));
            }
            if !slugs.insert(c.slug.as_str()) {
                return Err(invalid(format!("category {}: duplicate slug {:?}", c.id, c.slug)));
            }
        }

        for p in &self.posts {
            if !is_valid_title(&p.title) {
                return Err(invalid(format!("post {}: bad title length", p.id)));
            }
        }
        Ok(())
    }
}

fn invalid(msg: String) -> DomainError {
    DomainError::Fixture(msg)
}

fn unique_ids(kind: &str, ids: impl Iterator<Item = i64>) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(invalid(format!("duplicate {} id {}", kind, id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "users": [{"id": 1, "username": "anna"}],
        "categories": [{"id": 1, "title": "Travel", "slug": "travel"}],
        "posts": [{"id": 1, "title": "Hello", "pub_date": "2024-01-01T10:00:00+03:00",
                   "author_id": 1, "category_id": 1}]
    }"#;

    #[test]
    fn test_defaults_applied() {
        let f = Fixtures::from_json(MINIMAL).unwrap();
        assert!(f.locations.is_empty());
        assert!(f.categories[0].is_published);
        assert!(f.categories[0].description.is_empty());
        assert!(f.posts[0].is_published);
        assert!(f.posts[0].location_id.is_none());
        assert_eq!(f.posts[0].pub_date.to_rfc3339(), "2024-01-01T07:00:00+00:00");
        assert!(f.validate().is_ok());
        assert_eq!(
            f.stats(),
            FixtureStats {
                users: 1,
                locations: 0,
                categories: 1,
                posts: 1
            }
        );
    }

    #[test]
    fn test_rejects_bad_slug() {
        let mut f = Fixtures::from_json(MINIMAL).unwrap();
        f.categories[0].slug = "путешествия".to_string();
        assert!(matches!(f.validate(), Err(DomainError::Fixture(_))));
    }

    #[test]
    fn test_rejects_duplicate_slug() {
        let mut f = Fixtures::from_json(MINIMAL).unwrap();
        let mut dup = f.categories[0].clone();
        dup.id = 2;
        f.categories.push(dup);
        let err = f.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate slug"));
    }

    #[test]
    fn test_references_outside_the_file_are_allowed() {
        let mut f = Fixtures::from_json(MINIMAL).unwrap();
        f.users.clear();
        f.categories.clear();
        f.posts[0].location_id = Some(5);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut f = Fixtures::from_json(MINIMAL).unwrap();
        let dup = f.posts[0].clone();
        f.posts.push(dup);
        assert!(f.validate().unwrap_err().to_string().contains("duplicate post id 1"));
    }

    #[test]
    fn test_rejects_long_title() {
        let mut f = Fixtures::from_json(MINIMAL).unwrap();
        f.posts[0].title = "x".repeat(300);
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Fixtures::from_json("{\"posts\": 1}"),
            Err(DomainError::Fixture(_))
        ));
    }

    #[tokio::test]
    async fn test_from_path_reports_missing_file() {
        let err = Fixtures::from_path("/definitely/not/here.json").await.unwrap_err();
        assert!(err.to_string().contains("not/here.json"));
    }

    #[tokio::test]
    async fn test_sample_fixtures_are_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/blog.json");
        let f = Fixtures::from_path(path).await.unwrap();
        f.validate().unwrap();
        assert!(f.stats().posts > 0);
    }
}
