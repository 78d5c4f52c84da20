use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone, Utc};
use tracing::warn;

use crate::domain::post::Post;
use crate::presentation::dialog::Dialog;
use crate::presentation::view::View;

/// Callbacks the core issues to whatever paints the board.
///
/// Every method is a full replacement of the corresponding area: a list
/// render replaces the previous list, an opened dialog replaces the
/// previous dialog.
pub trait Renderer {
    /// Activates a top-level view (and, for the form, its create/edit heading).
    fn show_view(&mut self, view: View);
    /// Never called with an empty slice; see [`render_empty`](Self::render_empty).
    fn render_list(&mut self, posts: &[Post]);
    fn render_empty(&mut self);
    fn populate_form(&mut self, post: &Post);
    fn clear_form(&mut self);
    fn fill_description(&mut self, description: &str);
    fn open_dialog(&mut self, dialog: &Dialog);
    fn close_dialog(&mut self);
}

/// Renders `posts` as a list, or the "no posts" indicator when there are none.
pub fn render_posts(ui: &mut dyn Renderer, posts: &[Post]) {
    if posts.is_empty() {
        ui.render_empty();
    } else {
        ui.render_list(posts);
    }
}

/// Card date pattern used when none is configured, or when the configured
/// one cannot be formatted.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Footer line of a post card: creation date, plus the update date once the
/// post has been edited.
pub fn post_dates<Tz>(post: &Post, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let created = stamp(post.created_at(), tz, pattern);
    match post.updated_at() {
        Some(updated) => format!("Created {created} • Updated {}", stamp(updated, tz, pattern)),
        None => format!("Created {created}"),
    }
}

fn stamp<Tz>(at: DateTime<Utc>, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let at = at.with_timezone(tz);
    let mut out = String::new();
    if write!(out, "{}", at.format(pattern)).is_err() {
        warn!(pattern, "timestamp pattern cannot be formatted, using default");
        out.clear();
        // The default pattern only uses specifiers that always format.
        let _ = write!(out, "{}", at.format(DEFAULT_TIMESTAMP_FORMAT));
    }
    out
}
