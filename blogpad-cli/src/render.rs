//! Plain-text rendering of posts and screen state.

use app::{components::post_form::FORM_HEADING, pages::DashboardState};
use shared::models::Post;
use std::fmt::Write;

const EXCERPT_CHARS: usize = 150;

/// One line per post: id, status, title and date.
pub fn post_line(post: &Post) -> String {
    let mut line = format!("#{:<6} ", post.id.to_string());
    if let Some(status) = post.status {
        let _ = write!(line, "[{status}] ");
    }
    line.push_str(&post.title);
    if let Some(date) = post.display_date() {
        let _ = write!(line, " ({date})");
    }
    if let Some(author) = &post.author {
        let _ = write!(line, " by {author}");
    }
    line
}

pub fn excerpt(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}

pub fn post_listing(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "No posts yet.\n".to_string();
    }
    let mut out = String::new();
    for post in posts {
        let _ = writeln!(out, "{}", post_line(post));
        let _ = writeln!(out, "    {}", excerpt(&post.content));
    }
    out
}

pub fn post_detail(post: &Post) -> String {
    format!("{}\n\n{}\n", post_line(post), post.content)
}

pub fn dashboard(state: &DashboardState) -> String {
    let mut out = String::from("== Admin Dashboard ==\n");
    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {error}");
    }
    if let Some(success) = &state.success {
        let _ = writeln!(out, "* {success}");
    }
    if state.show_create_form {
        let _ = writeln!(out, "-- {FORM_HEADING} --");
    } else {
        out.push_str(&post_listing(&state.posts));
    }
    out
}
