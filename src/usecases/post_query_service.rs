//! Public read side of the blog: latest feed, post detail, category feed.
//!
//! - Reads "now" once per call, so every query of one operation sees the same instant
//! - All post queries go through `PostFilter::visible_at`
//! - Hidden content fails exactly like missing content (`DomainError::NotFound`)

use crate::domain::{CategoryFeed, DomainError, Post, PostFilter};
use crate::ports::{Clock, ContentRepository};
use std::sync::Arc;
use tracing::debug;

/// Visibility query service. Stateless; share via Arc.
pub struct PostQueryService {
    repo: Arc<dyn ContentRepository>,
    clock: Arc<dyn Clock>,
}

impl PostQueryService {
    pub fn new(repo: Arc<dyn ContentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Up to `limit` visible posts, newest first. Empty when nothing is visible.
    pub async fn list_latest(&self, limit: usize) -> Result<Vec<Post>, DomainError> {
        let now = self.clock.now();
        let posts = self
            .repo
            .find_posts(&PostFilter::visible_at(now).limit(limit))
            .await?;
        debug!(%now, limit, count = posts.len(), "listed latest posts");
        Ok(posts)
    }

    /// The post with this id if it is visible right now.
    pub async fn get_visible_post(&self, id: i64) -> Result<Post, DomainError> {
        let now = self.clock.now();
        let filter = PostFilter::visible_at(now).with_id(id).limit(1);
        let post = self.repo.find_posts(&filter).await?.into_iter().next();
        debug!(%now, id, found = post.is_some(), "looked up post");
        post.ok_or_else(|| DomainError::not_found("post", id))
    }

    /// Category page. The category is resolved by slug without checking its own
    /// `is_published`; its posts are then filtered by full visibility, so a hidden
    /// category resolves but always ends in NotFound. An empty page is NotFound too.
    pub async fn list_by_category(&self, slug: &str) -> Result<CategoryFeed, DomainError> {
        let now = self.clock.now();
        let category = self
            .repo
            .find_category_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("category", slug))?;

        let posts = self
            .repo
            .find_posts(&PostFilter::visible_at(now).in_category(category.id))
            .await?;
        debug!(%now, slug, count = posts.len(), "listed category posts");
        if posts.is_empty() {
            return Err(DomainError::not_found("category posts", slug));
        }
        Ok(CategoryFeed { category, posts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::persistence::memory_repo::InMemoryRepo;
    use crate::domain::{Category, User};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn category(id: i64, slug: &str, is_published: bool) -> Category {
        Category {
            id,
            title: slug.to_uppercase(),
            description: format!("About {}", slug),
            slug: slug.to_string(),
            created_at: now() - Duration::days(30),
            is_published,
        }
    }

    fn post(id: i64, pub_date: DateTime<Utc>, category: Option<&Category>) -> Post {
        Post {
            id,
            title: format!("Post {}", id),
            text: "Lorem ipsum".to_string(),
            pub_date,
            created_at: now() - Duration::days(30),
            is_published: true,
            author: User {
                id: 7,
                username: "writer".to_string(),
                first_name: String::new(),
                last_name: String::new(),
            },
            location: None,
            category: category.cloned(),
        }
    }

    fn service(repo: InMemoryRepo) -> PostQueryService {
        PostQueryService::new(Arc::new(repo), Arc::new(FixedClock(now())))
    }

    /// Category A published with P1 (yesterday) and P2 (tomorrow);
    /// category B hidden with P3 (yesterday).
    fn scenario() -> PostQueryService {
        let a = category(1, "a-slug", true);
        let b = category(2, "b-slug", false);
        let yesterday = now() - Duration::days(1);
        let tomorrow = now() + Duration::days(1);
        service(
            InMemoryRepo::new()
                .with_category(a.clone())
                .with_category(b.clone())
                .with_post(post(1, yesterday, Some(&a)))
                .with_post(post(2, tomorrow, Some(&a)))
                .with_post(post(3, yesterday, Some(&b))),
        )
    }

    #[tokio::test]
    async fn test_scenario_latest_shows_only_visible() {
        let svc = scenario();
        let ids: Vec<i64> = svc.list_latest(5).await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_scenario_category_feed() {
        let svc = scenario();
        let feed = svc.list_by_category("a-slug").await.unwrap();
        assert_eq!(feed.category.id, 1);
        let ids: Vec<i64> = feed.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_scenario_hidden_category_post_is_not_found() {
        let svc = scenario();
        assert!(svc.get_visible_post(1).await.is_ok());
        assert!(svc.get_visible_post(2).await.unwrap_err().is_not_found());
        assert!(svc.get_visible_post(3).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_hidden_and_missing_posts_are_indistinguishable() {
        let svc = scenario();
        let hidden = svc.get_visible_post(3).await.unwrap_err();
        let missing = svc.get_visible_post(999).await.unwrap_err();
        assert!(matches!(hidden, DomainError::NotFound { entity: "post", .. }));
        assert!(matches!(missing, DomainError::NotFound { entity: "post", .. }));
    }

    #[tokio::test]
    async fn test_unpublished_post_never_returned() {
        let a = category(1, "a-slug", true);
        let mut draft = post(1, now() - Duration::days(1), Some(&a));
        draft.is_published = false;
        let svc = service(InMemoryRepo::new().with_category(a).with_post(draft));

        assert!(svc.list_latest(5).await.unwrap().is_empty());
        assert!(svc.get_visible_post(1).await.unwrap_err().is_not_found());
        assert!(svc.list_by_category("a-slug").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_latest_respects_limit_and_order() {
        let a = category(1, "a-slug", true);
        let mut repo = InMemoryRepo::new().with_category(a.clone());
        // Inserted out of order on purpose.
        for (id, hours) in [(1, 5), (2, 1), (3, 9), (4, 3), (5, 7), (6, 2), (7, 4)] {
            repo = repo.with_post(post(id, now() - Duration::hours(hours), Some(&a)));
        }
        let svc = service(repo);

        let posts = svc.list_latest(5).await.unwrap();
        assert_eq!(posts.len(), 5);
        assert!(posts.windows(2).all(|w| w[0].pub_date >= w[1].pub_date));
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 6, 4, 7, 1]);
    }

    #[tokio::test]
    async fn test_latest_empty_is_ok() {
        let svc = service(InMemoryRepo::new());
        assert!(svc.list_latest(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let svc = scenario();
        let err = svc.list_by_category("nope").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "category", .. }));
    }

    #[tokio::test]
    async fn test_hidden_category_resolves_but_has_no_posts() {
        let svc = scenario();
        let err = svc.list_by_category("b-slug").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "category posts", .. }));
    }

    #[tokio::test]
    async fn test_category_feed_excludes_other_categories() {
        let a = category(1, "a-slug", true);
        let c = category(3, "c-slug", true);
        let yesterday = now() - Duration::days(1);
        let svc = service(
            InMemoryRepo::new()
                .with_category(a.clone())
                .with_category(c.clone())
                .with_post(post(1, yesterday, Some(&a)))
                .with_post(post(2, yesterday - Duration::hours(1), Some(&c)))
                .with_post(post(3, yesterday - Duration::hours(2), Some(&a)))
                .with_post(post(4, yesterday, None)),
        );

        let feed = svc.list_by_category("a-slug").await.unwrap();
        let ids: Vec<i64> = feed.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // Uncategorised posts never surface.
        let latest: Vec<i64> = svc.list_latest(10).await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(latest, vec![1, 2, 3]);
    }
}
