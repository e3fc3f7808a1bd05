//! Plain-text rendering of title boxes, breadcrumbs, menus and record lists.

use crate::models::comment::{Category, CategoryCounts, Comment, ADMIN_AUTHOR_ID};
use crate::models::user::{User, UserId};
use crate::stores::user_store::UserStore;
use std::io::{self, Write};

/// Text columns inside the title box
pub const TITLE_WIDTH: usize = 38;

const BORDER: &str = "==========================================";

/// Split a title into lines of at most `width` chars.
///
/// Lines break at the last space inside the window; a window without a
/// usable space is cut hard at `width`.
pub fn wrap_title(title: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= width {
        return vec![title.to_string()];
    }

    let slice = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

    let mut lines = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    let mut last_space: Option<usize> = None;

    while pos < chars.len() {
        if pos - start >= width {
            match last_space.filter(|&space| space > start) {
                Some(space) => {
                    lines.push(slice(start, space));
                    start = space + 1;
                    pos = start;
                    last_space = None;
                }
                None => {
                    lines.push(slice(start, pos));
                    start = pos;
                }
            }
        } else {
            if chars[pos] == ' ' {
                last_space = Some(pos);
            }
            pos += 1;
        }
    }

    if start < chars.len() {
        lines.push(slice(start, chars.len()));
    }

    lines
}

/// One boxed line: `= ` + centered text + ` =`. Odd-length text gets the spare space on the right.
pub fn centered_line(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let padding = width.saturating_sub(len);
    let left = padding / 2;
    let right = padding / 2 + len % 2;

    format!("= {}{}{} =", " ".repeat(left), text, " ".repeat(right))
}

pub fn print_title(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{BORDER}")?;
    for line in wrap_title(title, TITLE_WIDTH) {
        writeln!(out, "{}", centered_line(&line, TITLE_WIDTH))?;
    }
    writeln!(out, "{BORDER}")
}

pub fn print_breadcrumbs(out: &mut impl Write, links: &[&str]) -> io::Result<()> {
    let mut trail = String::from("Main Menu");
    for link in links {
        trail.push_str(" > ");
        trail.push_str(link);
    }
    writeln!(out, "{trail}")
}

pub fn print_menu(out: &mut impl Write, items: &[&str]) -> io::Result<()> {
    for (index, item) in items.iter().enumerate() {
        writeln!(out, "{}. {}", index + 1, item)?;
    }
    Ok(())
}

pub fn print_users(out: &mut impl Write, users: &[User]) -> io::Result<()> {
    if users.is_empty() {
        return writeln!(out, "No users yet.");
    }

    writeln!(out, "{:<6}| Username", "ID")?;
    writeln!(out, "------+--------------------")?;
    for user in users {
        writeln!(out, "{:<6}| {}", user.id, user.username)?;
    }
    Ok(())
}

/// Name shown for a comment author; users deleted since keep their id
pub fn author_label(users: &UserStore, author_id: UserId) -> String {
    if author_id == ADMIN_AUTHOR_ID {
        return "admin".to_string();
    }
    users
        .find_by_id(author_id)
        .map(|user| user.username)
        .unwrap_or_else(|_| format!("user #{author_id}"))
}

pub fn print_comments(out: &mut impl Write, comments: &[Comment], users: &UserStore) -> io::Result<()> {
    if comments.is_empty() {
        return writeln!(out, "No comments yet.");
    }

    for comment in comments {
        writeln!(
            out,
            "[{}] ({}) {}: {}",
            comment.id,
            comment.category,
            author_label(users, comment.author_id),
            comment.text
        )?;
    }
    Ok(())
}

pub fn print_category_counts(out: &mut impl Write, counts: &CategoryCounts) -> io::Result<()> {
    for category in Category::ALL {
        writeln!(out, "{:<10}: {}", category.as_str(), counts.get(category))?;
    }
    writeln!(out, "{:<10}: {}", "total", counts.total())
}
