//! Implements InputPort. Inquire-based reader: main feed, post detail, category feed.

use crate::adapters::ui::render;
use crate::domain::DomainError;
use crate::ports::InputPort;
use crate::usecases::PostQueryService;
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{CustomType, Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Applies the prompt theme globally.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightYellow))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightBlue));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Latest,
    Post,
    Category,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 4] = [
        MenuItem::Latest,
        MenuItem::Post,
        MenuItem::Category,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::Latest => "Latest posts",
            MenuItem::Post => "Open post by id",
            MenuItem::Category => "Browse category",
            MenuItem::Quit => "Quit",
        };
        write!(f, "{}", label)
    }
}

/// Esc / Ctrl-C end the session instead of failing it.
fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// NotFound becomes the 404 page; everything else propagates.
fn page_or_404(page: Result<String, DomainError>) -> Result<String, DomainError> {
    match page {
        Err(e) if e.is_not_found() => Ok(render::render_not_found()),
        other => other,
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    posts: Arc<PostQueryService>,
    page_size: usize,
}

impl TuiInputPort {
    pub fn new(posts: Arc<PostQueryService>, page_size: usize) -> Self {
        Self { posts, page_size }
    }

    async fn latest_page(&self) -> Result<String, DomainError> {
        let posts = self.posts.list_latest(self.page_size).await?;
        Ok(render::render_feed(&posts))
    }

    async fn post_page(&self, id: i64) -> Result<String, DomainError> {
        let post = self.posts.get_visible_post(id).await?;
        Ok(render::render_post(&post))
    }

    async fn category_page(&self, slug: &str) -> Result<String, DomainError> {
        let feed = self.posts.list_by_category(slug).await?;
        Ok(render::render_category(&feed))
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = match Select::new("Blogicum", MenuItem::ALL.to_vec()).prompt() {
                Ok(c) => c,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };

            let page = match choice {
                MenuItem::Latest => self.latest_page().await,
                MenuItem::Post => {
                    let id = match CustomType::<i64>::new("Post id:")
                        .with_error_message("Enter a numeric id")
                        .prompt()
                    {
                        Ok(id) => id,
                        Err(e) if is_cancel(&e) => continue,
                        Err(e) => return Err(DomainError::Ui(e.to_string())),
                    };
                    self.post_page(id).await
                }
                MenuItem::Category => {
                    let slug = match Text::new("Category slug:").prompt() {
                        Ok(s) => s,
                        Err(e) if is_cancel(&e) => continue,
                        Err(e) => return Err(DomainError::Ui(e.to_string())),
                    };
                    self.category_page(slug.trim()).await
                }
                MenuItem::Quit => return Ok(()),
            };

            match page_or_404(page) {
                Ok(text) => println!("\n{}", text),
                Err(e) => {
                    warn!(error = %e, "page failed");
                    println!("\nSomething went wrong: {}\n", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::persistence::InMemoryRepo;
    use chrono::{TimeZone, Utc};

    fn port() -> TuiInputPort {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let svc = PostQueryService::new(Arc::new(InMemoryRepo::new()), Arc::new(clock));
        TuiInputPort::new(Arc::new(svc), 5)
    }

    #[test]
    fn test_menu_labels() {
        let labels: Vec<String> = MenuItem::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(
            labels,
            vec!["Latest posts", "Open post by id", "Browse category", "Quit"]
        );
    }

    #[test]
    fn test_repo_errors_are_not_404() {
        let err = page_or_404(Err(DomainError::Repo("disk".into())));
        assert!(matches!(err, Err(DomainError::Repo(_))));
    }

    #[tokio::test]
    async fn test_missing_pages_render_404() {
        let port = port();
        let post = page_or_404(port.post_page(1).await).unwrap();
        assert_eq!(post, render::render_not_found());
        let category = page_or_404(port.category_page("travel").await).unwrap();
        assert_eq!(category, render::render_not_found());
    }

    #[tokio::test]
    async fn test_empty_latest_page() {
        let page = port().latest_page().await.unwrap();
        assert!(page.contains("Nothing published yet."));
    }
}
