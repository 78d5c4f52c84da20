//! A [`Renderer`] that records every callback instead of painting.
//!
//! Handy for headless sessions and for asserting what a host would have
//! been asked to draw.

use crate::domain::post::{Post, PostId};
use crate::presentation::dialog::Dialog;
use crate::presentation::renderer::Renderer;
use crate::presentation::view::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    View(View),
    List(Vec<PostId>),
    Empty,
    PopulateForm {
        id: PostId,
        title: String,
        description: String,
    },
    ClearForm,
    FillDescription(String),
    OpenDialog(Dialog),
    CloseDialog,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn last(&self) -> Option<&RenderEvent> {
        self.events.last()
    }

    /// Ids of the most recent list render; `Some(vec![])` if the empty state
    /// was rendered last, `None` if nothing was rendered yet.
    pub fn last_list(&self) -> Option<Vec<PostId>> {
        self.events.iter().rev().find_map(|event| match event {
            RenderEvent::List(ids) => Some(ids.clone()),
            RenderEvent::Empty => Some(Vec::new()),
            _ => None,
        })
    }

    /// The dialog currently painted, following open/close callbacks.
    pub fn visible_dialog(&self) -> Option<&Dialog> {
        self.events.iter().rev().find_map(|event| match event {
            RenderEvent::OpenDialog(dialog) => Some(Some(dialog)),
            RenderEvent::CloseDialog => Some(None),
            _ => None,
        })?
    }
}

impl Renderer for RecordingRenderer {
    fn show_view(&mut self, view: View) {
        self.events.push(RenderEvent::View(view));
    }

    fn render_list(&mut self, posts: &[Post]) {
        self.events
            .push(RenderEvent::List(posts.iter().map(Post::id).collect()));
    }

    fn render_empty(&mut self) {
        self.events.push(RenderEvent::Empty);
    }

    fn populate_form(&mut self, post: &Post) {
        self.events.push(RenderEvent::PopulateForm {
            id: post.id(),
            title: post.title().to_string(),
            description: post.description().to_string(),
        });
    }

    fn clear_form(&mut self) {
        self.events.push(RenderEvent::ClearForm);
    }

    fn fill_description(&mut self, description: &str) {
        self.events
            .push(RenderEvent::FillDescription(description.to_string()));
    }

    fn open_dialog(&mut self, dialog: &Dialog) {
        self.events.push(RenderEvent::OpenDialog(dialog.clone()));
    }

    fn close_dialog(&mut self) {
        self.events.push(RenderEvent::CloseDialog);
    }
}
