//! Visibility rules. The only place that decides whether a post may be shown.
//!
//! A post is visible at `now` when all three hold:
//! - `post.is_published`
//! - `post.category` is set and `category.is_published`
//! - `post.pub_date <= now` (publication gate)
//!
//! Storage adapters never spell these conditions out themselves: in-memory stores call
//! [`PostFilter::matches`], SQL stores translate a [`PostFilter`] into one WHERE clause.

use super::entities::Post;
use chrono::{DateTime, Utc};

/// The three-way visibility condition evaluated at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub now: DateTime<Utc>,
}

impl Visibility {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// True if the post is eligible for public display at `self.now`.
    pub fn admits(&self, post: &Post) -> bool {
        post.is_published
            && post.pub_date <= self.now
            && post.category.as_ref().is_some_and(|c| c.is_published)
    }
}

/// Declarative post query: which posts, in what order (always newest first), how many.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// When set, only posts visible at that instant match.
    pub visibility: Option<Visibility>,
    pub post_id: Option<i64>,
    pub category_id: Option<i64>,
    pub limit: Option<usize>,
}

impl PostFilter {
    /// Every post, unfiltered. Admin-side listings and tests.
    pub fn all() -> Self {
        Self::default()
    }

    /// Posts visible at `now`.
    pub fn visible_at(now: DateTime<Utc>) -> Self {
        Self {
            visibility: Some(Visibility::at(now)),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, post_id: i64) -> Self {
        self.post_id = Some(post_id);
        self
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Row-level match, ignoring ordering and limit.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(v) = &self.visibility {
            if !v.admits(post) {
                return false;
            }
        }
        if let Some(id) = self.post_id {
            if post.id != id {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if post.category.as_ref().map(|c| c.id) != Some(category_id) {
                return false;
            }
        }
        true
    }

    /// Applies the filter to an in-memory collection: match, sort by `pub_date` desc
    /// (id desc on ties), truncate to `limit`.
    pub fn apply<'a, I>(&self, posts: I) -> Vec<Post>
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut out: Vec<Post> = posts
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}
