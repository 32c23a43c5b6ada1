//! Text rendering of the three public pages: feed, post detail, category feed.

use crate::domain::{CategoryFeed, Location, Post};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Label for empty optional fields.
pub const EMPTY_VALUE: &str = "Not set";

/// Words of post text shown in feed entries.
pub const EXCERPT_WORDS: usize = 10;

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d %B %Y, %H:%M").to_string()
}

/// First `words` words of `text`, with "..." if anything was cut.
pub fn excerpt(text: &str, words: usize) -> String {
    let mut iter = text.split_whitespace();
    let head: Vec<&str> = iter.by_ref().take(words).collect();
    let mut out = head.join(" ");
    if iter.next().is_some() {
        out.push_str(" ...");
    }
    out
}

/// Location name, or [`EMPTY_VALUE`] when unset or unpublished.
fn location_label(location: Option<&Location>) -> &str {
    match location {
        Some(l) if l.is_published => &l.name,
        _ => EMPTY_VALUE,
    }
}

fn category_label(post: &Post) -> &str {
    post.category.as_ref().map_or(EMPTY_VALUE, |c| c.title.as_str())
}

fn post_header(out: &mut String, post: &Post) {
    let _ = writeln!(out, "#{} {}", post.id, post.title);
    let _ = writeln!(
        out,
        "  {} | {} | {} | {}",
        format_date(&post.pub_date),
        post.author.full_name(),
        location_label(post.location.as_ref()),
        category_label(post)
    );
}

fn post_entry(out: &mut String, post: &Post) {
    post_header(out, post);
    let _ = writeln!(out, "  {}", excerpt(&post.text, EXCERPT_WORDS));
}

/// Main page.
pub fn render_feed(posts: &[Post]) -> String {
    let mut out = String::from("== Latest posts ==\n");
    if posts.is_empty() {
        out.push_str("Nothing published yet.\n");
        return out;
    }
    for post in posts {
        out.push('\n');
        post_entry(&mut out, post);
    }
    out
}

/// Post detail page. Full text.
pub fn render_post(post: &Post) -> String {
    let mut out = String::new();
    post_header(&mut out, post);
    out.push('\n');
    out.push_str(&post.text);
    out.push('\n');
    out
}

/// Category page: title, description, then its posts.
pub fn render_category(feed: &CategoryFeed) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", feed.category.title);
    if !feed.category.description.is_empty() {
        let _ = writeln!(out, "{}", feed.category.description);
    }
    for post in &feed.posts {
        out.push('\n');
        post_entry(&mut out, post);
    }
    out
}

/// Shown in place of a page that does not exist (or is hidden).
pub fn render_not_found() -> String {
    "404: page not found.\n".to_string()
}
