//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Category, DomainError, Post, PostFilter};
use chrono::{DateTime, Utc};

/// Read access to published content. Implementations must evaluate the whole
/// [`PostFilter`] (visibility included) and return posts newest first with
/// author, location and category resolved.
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Posts matching `filter`, ordered by `pub_date` descending, truncated to `filter.limit`.
    async fn find_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, DomainError>;

    /// Category by slug regardless of its `is_published` flag. `None` if no such slug.
    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;
}

/// Source of "now" for the publication gate.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
