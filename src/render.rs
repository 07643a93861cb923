// Rendering: posts are turned into plain view descriptions first, then
// painted for the terminal with the active theme.

use crate::models::Post;
use crossterm::style::{Color, Stylize};
use std::fmt::Write as _;

pub const NO_COMMENTS: &str = "No comments yet.";

/// What a user can do with a rendered post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Delete(i64),
    Edit(i64),
    AddComment(i64),
}

impl PostAction {
    pub fn label(&self) -> &'static str {
        match self {
            PostAction::Delete(_) => "Delete",
            PostAction::Edit(_) => "Edit",
            PostAction::AddComment(_) => "Add Comment",
        }
    }
}

/// View description of one post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
    pub id: i64,
    pub heading: String,
    pub meta: String,
    pub body: String,
    pub details: String,
    pub actions: [PostAction; 3],
    /// Rendered comment lines, or the single placeholder line.
    pub comments: Vec<String>,
}

/// Replace the whole view with one card per post, in response order.
pub fn render(posts: &[Post]) -> Vec<PostCard> {
    posts.iter().map(card).collect()
}

fn card(post: &Post) -> PostCard {
    let comments = if post.comments.is_empty() {
        vec![NO_COMMENTS.to_string()]
    } else {
        post.comments
            .iter()
            .map(|c| format!("{}: {} ({})", c.author, c.text, c.timestamp))
            .collect()
    };
    PostCard {
        id: post.id,
        heading: post.title.clone(),
        meta: format!("By {} on {}", post.author, post.date),
        body: post.content.clone(),
        details: format!(
            "Category: {} | Tags: {}",
            post.category,
            post.tags.join(", ")
        ),
        actions: [
            PostAction::Delete(post.id),
            PostAction::Edit(post.id),
            PostAction::AddComment(post.id),
        ],
        comments,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn accent(self) -> Color {
        match self {
            Theme::Light => Color::DarkBlue,
            Theme::Dark => Color::Cyan,
        }
    }

    fn muted(self) -> Color {
        match self {
            Theme::Light => Color::DarkGrey,
            Theme::Dark => Color::Grey,
        }
    }
}

/// Terminal text for a list of cards.
pub fn paint(cards: &[PostCard], theme: Theme) -> String {
    if cards.is_empty() {
        return format!("{}\n", "No posts.".with(theme.muted()));
    }
    let mut out = String::new();
    for card in cards {
        let actions: Vec<String> = card
            .actions
            .iter()
            .map(|a| format!("[{}]", a.label()))
            .collect();
        let _ = writeln!(
            out,
            "{} {}",
            format!("#{}", card.id).with(theme.muted()),
            card.heading.as_str().bold().with(theme.accent())
        );
        let _ = writeln!(out, "  {}", card.meta.as_str().with(theme.muted()));
        let _ = writeln!(out, "  {}", card.body);
        let _ = writeln!(out, "  {}", card.details);
        let _ = writeln!(out, "  {}", actions.join(" ").with(theme.muted()));
        for line in &card.comments {
            let _ = writeln!(out, "    {}", line.as_str().italic());
        }
        out.push('\n');
    }
    out
}
