//! Line-oriented painter for the board.
//!
//! Keeps the few bits of screen state a browser would keep in the DOM: the
//! form fields, the ids and titles of the rendered cards, and whether the
//! description field is still flashed after a generate.

use std::io::{self, Write};

use blog_core::{Dialog, DialogAction, FormMode, Post, PostId, Renderer, View, post_dates};
use chrono::Local;
use tracing::warn;

const HELP: &str = "\
Commands:
  list                 show the posts tab
  new                  start a new post
  form                 switch to the form tab
  edit <id>            edit a post from the list
  delete <id>          delete a post from the list (asks first)
  title <text>         set the form title
  desc <text>          set the form description
  generate             fill the description with a random one
  submit               save the form
  cancel               leave the form, or cancel the open dialog
  yes | no | ok        answer the open dialog
  esc | outside        dismiss the open dialog
  close                close the open dialog
  dump                 print all posts as JSON
  help                 show this text
  quit                 leave";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FormBuffer {
    pub(crate) title: String,
    pub(crate) description: String,
}

/// A rendered post card, as far as the delete button needs to know it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Card {
    pub(crate) id: PostId,
    pub(crate) title: String,
}

#[derive(Debug)]
pub(crate) struct TerminalRenderer<W: Write> {
    out: W,
    timestamp_format: String,
    view: View,
    form: FormBuffer,
    cards: Vec<Card>,
    highlighted: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub(crate) fn new(out: W, timestamp_format: impl Into<String>) -> Self {
        Self {
            out,
            timestamp_format: timestamp_format.into(),
            view: View::default(),
            form: FormBuffer::default(),
            cards: Vec::new(),
            highlighted: false,
        }
    }

    pub(crate) fn form(&self) -> &FormBuffer {
        &self.form
    }

    pub(crate) fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.form.title = title;
        self.print_form_fields();
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.form.description = description;
        self.highlighted = false;
        self.print_form_fields();
    }

    pub(crate) fn clear_highlight(&mut self) {
        if !self.highlighted {
            return;
        }
        self.highlighted = false;
        if self.view.is_form() {
            self.print_form_fields();
        }
    }

    pub(crate) fn notice(&mut self, message: &str) {
        self.emit(format_args!("! {message}\n"));
    }

    pub(crate) fn print_help(&mut self) {
        self.emit(format_args!("{HELP}\n"));
    }

    pub(crate) fn print_raw(&mut self, text: &str) {
        self.emit(format_args!("{text}\n"));
    }

    pub(crate) fn prompt(&mut self) {
        self.emit(format_args!("> "));
        self.flush();
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn print_form_fields(&mut self) {
        let marker = if self.highlighted { " *" } else { "" };
        let text = format!(
            "  Title: {}\n  Description{marker}: {}\n",
            self.form.title, self.form.description
        );
        self.emit(format_args!("{text}"));
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(err) = self.out.write_fmt(args) {
            warn!(error = %err, "failed to write to terminal");
        }
    }

    fn flush(&mut self) {
        if let Err(err) = self.out.flush() {
            warn!(error = %err, "failed to flush terminal");
        }
    }
}

impl TerminalRenderer<io::Stdout> {
    pub(crate) fn stdout(timestamp_format: impl Into<String>) -> Self {
        Self::new(io::stdout(), timestamp_format)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn show_view(&mut self, view: View) {
        self.view = view;
        let (posts_tab, form_tab) = if view.is_form() {
            ("  Posts  ", "[ Form ]")
        } else {
            ("[ Posts ]", "  Form  ")
        };
        self.emit(format_args!("\n{posts_tab} {form_tab}\n"));

        match view {
            View::List => {}
            View::Form(FormMode::Create) => {
                self.emit(format_args!("New post\n"));
                self.print_form_fields();
            }
            View::Form(FormMode::Edit(id)) => {
                self.emit(format_args!("Edit post #{id}\n"));
                self.print_form_fields();
            }
        }
    }

    fn render_list(&mut self, posts: &[Post]) {
        self.cards = posts
            .iter()
            .map(|post| Card {
                id: post.id(),
                title: post.title().to_string(),
            })
            .collect();

        let mut text = String::new();
        for post in posts {
            text.push_str(&format!("#{} {}\n", post.id(), post.title()));
            if !post.description().is_empty() {
                text.push_str(&format!("    {}\n", post.description()));
            }
            text.push_str(&format!(
                "    {}\n",
                post_dates(post, &Local, &self.timestamp_format)
            ));
        }
        self.emit(format_args!("{text}"));
    }

    fn render_empty(&mut self) {
        self.cards.clear();
        self.emit(format_args!("No posts yet. Type `new` to write one.\n"));
    }

    fn populate_form(&mut self, post: &Post) {
        self.form = FormBuffer {
            title: post.title().to_string(),
            description: post.description().to_string(),
        };
        self.highlighted = false;
        if self.view.is_form() {
            self.print_form_fields();
        }
    }

    fn clear_form(&mut self) {
        self.form = FormBuffer::default();
        self.highlighted = false;
    }

    fn fill_description(&mut self, description: &str) {
        self.form.description = description.to_string();
        self.highlighted = true;
        self.print_form_fields();
    }

    fn open_dialog(&mut self, dialog: &Dialog) {
        let (Some(mode), Some(title), Some(message)) =
            (dialog.mode(), dialog.title(), dialog.message())
        else {
            return;
        };

        let keys = dialog
            .actions()
            .iter()
            .map(|action| match action {
                DialogAction::Cancel => format!("[no] {}", action.label()),
                DialogAction::Confirm => format!("[yes] {}", action.label()),
                DialogAction::Acknowledge => format!("[ok] {}", action.label()),
            })
            .collect::<Vec<_>>()
            .join("  ");

        let text = format!(
            "+-- {} ({}) --\n| {message}\n| {keys}\n+--\n",
            title,
            mode.as_str()
        );
        self.emit(format_args!("{text}"));
    }

    fn close_dialog(&mut self) {
        self.emit(format_args!("(dialog closed)\n"));
    }
}
