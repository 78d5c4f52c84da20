use tracing::{debug, warn};

use crate::application::description_generator::DescriptionGenerator;
use crate::application::post_store::PostStore;
use crate::data::post_repository::PostRepository;
use crate::domain::post::{PostDraft, PostId};
use crate::presentation::dialog::{BoundAction, Dialog};
use crate::presentation::renderer::{Renderer, render_posts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PostId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    List,
    Form(FormMode),
}

impl View {
    pub fn is_form(&self) -> bool {
        matches!(self, View::Form(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            View::List => "list",
            View::Form(FormMode::Create) => "form_create",
            View::Form(FormMode::Edit(_)) => "form_edit",
        }
    }
}

/// How the form was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEntry {
    /// "New post": always starts a blank create form.
    NewPost,
    /// Switching tabs: resumes an edit in progress, if any.
    Tab,
}

/// A user-visible result of a view action, surfaced through the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { title: String },
    Updated { title: String },
    Deleted { title: String },
    ValidationFailed,
    EditNotFound { id: PostId },
    UpdateFailed { id: PostId },
    ConfirmDelete { id: PostId, title: String },
}

impl Outcome {
    pub fn into_dialog(self) -> Dialog {
        match self {
            Outcome::Created { title } => {
                Dialog::success("Post created", format!("Post \"{title}\" was created."))
            }
            Outcome::Updated { title } => {
                Dialog::success("Post updated", format!("Post \"{title}\" was updated."))
            }
            Outcome::Deleted { title } => {
                Dialog::success("Post deleted", format!("Post \"{title}\" was deleted."))
            }
            Outcome::ValidationFailed => Dialog::error("Title required", "The title is required."),
            Outcome::EditNotFound { id } => {
                Dialog::error("Post not found", format!("Post #{id} no longer exists."))
            }
            Outcome::UpdateFailed { id } => Dialog::error(
                "Update failed",
                format!("Post #{id} could not be updated because it no longer exists."),
            ),
            Outcome::ConfirmDelete { id, title } => Dialog::confirm(
                "Delete post",
                format!("Are you sure you want to delete the post \"{title}\"?"),
                BoundAction::DeletePost { id, title },
            ),
        }
    }
}

/// Which screen is active and which post, if any, the form is editing.
///
/// Holds only the id of the edited post; the post itself stays in the store.
#[derive(Debug, Default)]
pub struct ViewController {
    view: View,
    editing_id: Option<PostId>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn editing_id(&self) -> Option<PostId> {
        self.editing_id
    }

    /// Keeps `editing_id`, so a later tab switch can resume the edit.
    pub fn show_list<R: PostRepository>(&mut self, store: &PostStore<R>, ui: &mut dyn Renderer) {
        self.enter(View::List, ui);
        render_posts(ui, store.list_posts());
    }

    pub fn show_form(&mut self, entry: FormEntry, ui: &mut dyn Renderer) {
        match (entry, self.editing_id) {
            (FormEntry::Tab, Some(id)) => self.enter(View::Form(FormMode::Edit(id)), ui),
            _ => {
                self.editing_id = None;
                ui.clear_form();
                self.enter(View::Form(FormMode::Create), ui);
            }
        }
    }

    /// Returns an outcome only when the post is missing; the view does not change then.
    pub fn edit<R: PostRepository>(
        &mut self,
        id: PostId,
        store: &PostStore<R>,
        ui: &mut dyn Renderer,
    ) -> Option<Outcome> {
        let post = match store.require_post(id) {
            Ok(post) => post,
            Err(err) => {
                warn!(post_id = id, %err, "edit requested for missing post");
                return Some(Outcome::EditNotFound { id });
            }
        };

        ui.populate_form(post);
        self.editing_id = Some(id);
        self.enter(View::Form(FormMode::Edit(id)), ui);
        None
    }

    pub fn submit<R: PostRepository>(
        &mut self,
        title: &str,
        description: &str,
        store: &mut PostStore<R>,
        ui: &mut dyn Renderer,
    ) -> Outcome {
        let draft = match PostDraft::new(title, description).validate() {
            Ok(draft) => draft,
            Err(err) => {
                debug!(%err, "form rejected");
                return Outcome::ValidationFailed;
            }
        };

        let outcome = match self.editing_id {
            Some(id) => match store.update_post(id, &draft.title, &draft.description) {
                Ok(Some(post)) => Outcome::Updated {
                    title: post.title().to_string(),
                },
                Ok(None) => {
                    warn!(post_id = id, "edited post vanished before save");
                    return Outcome::UpdateFailed { id };
                }
                Err(err) => {
                    debug!(%err, "store rejected form");
                    return Outcome::ValidationFailed;
                }
            },
            None => match store.create_post(&draft.title, &draft.description) {
                Ok(post) => Outcome::Created {
                    title: post.title().to_string(),
                },
                Err(err) => {
                    debug!(%err, "store rejected form");
                    return Outcome::ValidationFailed;
                }
            },
        };

        self.editing_id = None;
        ui.clear_form();
        self.show_list(store, ui);
        outcome
    }

    /// Leaves the form without saving.
    pub fn cancel<R: PostRepository>(&mut self, store: &PostStore<R>, ui: &mut dyn Renderer) {
        self.editing_id = None;
        ui.clear_form();
        self.show_list(store, ui);
    }

    /// Does not touch the store; the delete runs once the returned confirm is accepted.
    pub fn request_delete(&self, id: PostId, title: impl Into<String>) -> Outcome {
        Outcome::ConfirmDelete {
            id,
            title: title.into(),
        }
    }

    pub fn confirm_delete<R: PostRepository>(
        &mut self,
        action: BoundAction,
        store: &mut PostStore<R>,
        ui: &mut dyn Renderer,
    ) -> Outcome {
        let BoundAction::DeletePost { id, title } = action;

        if !store.delete_post(id) {
            warn!(post_id = id, "confirmed delete found nothing to remove");
        }
        if self.editing_id == Some(id) {
            self.editing_id = None;
        }
        if self.view == View::List {
            render_posts(ui, store.list_posts());
        }
        Outcome::Deleted { title }
    }

    pub fn generate_description(&self, generator: &mut DescriptionGenerator, ui: &mut dyn Renderer) {
        ui.fill_description(generator.generate());
    }

    fn enter(&mut self, view: View, ui: &mut dyn Renderer) {
        debug!(from = self.view.as_str(), to = view.as_str(), "view changed");
        self.view = view;
        ui.show_view(view);
    }
}
