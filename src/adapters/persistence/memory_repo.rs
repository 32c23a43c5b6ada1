//! In-memory ContentRepository. Holds fully resolved posts; evaluates filters with
//! [`PostFilter::apply`], so it agrees with the SQLite store by construction.

use crate::domain::{Category, DomainError, Post, PostFilter};
use crate::ports::ContentRepository;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Content {
    categories: Vec<Category>,
    posts: Vec<Post>,
}

/// Memory-backed store for tests.
#[derive(Debug, Default)]
pub struct InMemoryRepo {
    content: RwLock<Content>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.content.get_mut().categories.push(category);
        self
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.content.get_mut().posts.push(post);
        self
    }
}

#[async_trait::async_trait]
impl ContentRepository for InMemoryRepo {
    async fn find_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, DomainError> {
        let content = self.content.read().await;
        Ok(filter.apply(&content.posts))
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let content = self.content.read().await;
        Ok(content.categories.iter().find(|c| c.slug == slug).cloned())
    }
}
