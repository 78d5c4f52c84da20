//! Core of a single-page post board kept entirely in memory.
//!
//! The crate holds the post collection and the interaction state machine:
//! which view is active, which post is being edited and which dialog is
//! open. Painting is left to a host through the [`Renderer`] port; the host
//! forwards user actions as [`Command`]s to [`BlogApp::dispatch`].

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::description_generator::{
    CANNED_DESCRIPTIONS, DescriptionGenerator, RandomIndex, ScriptedIndex, ThreadRandom,
};
pub use application::post_store::PostStore;
pub use data::post_repository::{NewPost, PostPatch, PostRepository};
pub use data::repositories::memory::post_repository::InMemoryPostRepository;
pub use domain::error::DomainError;
pub use domain::post::{Post, PostDraft, PostId};
pub use infrastructure::clock::{Clock, FixedClock, SystemClock};
pub use presentation::app::{BlogApp, Command};
pub use presentation::dialog::{
    BoundAction, Dialog, DialogAction, DialogController, DialogMode, Dismissal, Invocation,
};
pub use presentation::recorder::{RecordingRenderer, RenderEvent};
pub use presentation::renderer::{DEFAULT_TIMESTAMP_FORMAT, Renderer, post_dates, render_posts};
pub use presentation::view::{FormEntry, FormMode, Outcome, View, ViewController};
