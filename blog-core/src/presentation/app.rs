use tracing::{debug, info};

use crate::application::description_generator::DescriptionGenerator;
use crate::application::post_store::PostStore;
use crate::data::post_repository::PostRepository;
use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
use crate::domain::post::PostId;
use crate::presentation::dialog::{DialogAction, DialogController, Dismissal, Invocation};
use crate::presentation::renderer::Renderer;
use crate::presentation::view::{FormEntry, Outcome, View, ViewController};

/// One user-facing action, as forwarded by the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShowList,
    NewPost,
    SwitchToForm,
    EditPost(PostId),
    SubmitForm { title: String, description: String },
    CancelForm,
    RequestDelete { id: PostId, title: String },
    GenerateDescription,
    Dialog(DialogAction),
    Dismiss(Dismissal),
    CloseDialog,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ShowList => "show_list",
            Command::NewPost => "new_post",
            Command::SwitchToForm => "switch_to_form",
            Command::EditPost(_) => "edit_post",
            Command::SubmitForm { .. } => "submit_form",
            Command::CancelForm => "cancel_form",
            Command::RequestDelete { .. } => "request_delete",
            Command::GenerateDescription => "generate_description",
            Command::Dialog(_) => "dialog_action",
            Command::Dismiss(_) => "dismiss_dialog",
            Command::CloseDialog => "close_dialog",
        }
    }

    fn targets_dialog(&self) -> bool {
        matches!(
            self,
            Command::Dialog(_) | Command::Dismiss(_) | Command::CloseDialog
        )
    }
}

/// A session: the post store, both controllers, the generator and the
/// renderer, wired together by [`dispatch`](Self::dispatch).
pub struct BlogApp<U: Renderer, R: PostRepository = InMemoryPostRepository> {
    store: PostStore<R>,
    view: ViewController,
    dialog: DialogController,
    generator: DescriptionGenerator,
    ui: U,
}

impl<U: Renderer> BlogApp<U> {
    pub fn new(ui: U) -> Self {
        Self::with_parts(PostStore::in_memory(), DescriptionGenerator::default(), ui)
    }
}

impl<U: Renderer, R: PostRepository> BlogApp<U, R> {
    pub fn with_parts(store: PostStore<R>, generator: DescriptionGenerator, ui: U) -> Self {
        Self {
            store,
            view: ViewController::new(),
            dialog: DialogController::new(),
            generator,
            ui,
        }
    }

    /// Paints the initial list view.
    pub fn start(&mut self) {
        self.view.show_list(&self.store, &mut self.ui);
    }

    /// Runs one command to completion. Returns `false` when the command is
    /// not available in the current state (for instance anything but a
    /// dialog command while a dialog is open) and nothing happened.
    pub fn dispatch(&mut self, command: Command) -> bool {
        let name = command.name();
        if self.dialog.is_open() && !command.targets_dialog() {
            debug!(command = name, "command blocked by open dialog");
            return false;
        }

        let view = self.view.view();
        let accepted = match command {
            Command::ShowList => {
                self.view.show_list(&self.store, &mut self.ui);
                true
            }
            Command::NewPost => {
                self.view.show_form(FormEntry::NewPost, &mut self.ui);
                true
            }
            Command::SwitchToForm => {
                self.view.show_form(FormEntry::Tab, &mut self.ui);
                true
            }
            Command::EditPost(id) if view == View::List => {
                if let Some(outcome) = self.view.edit(id, &self.store, &mut self.ui) {
                    self.surface(outcome);
                }
                true
            }
            Command::RequestDelete { id, title } if view == View::List => {
                let outcome = self.view.request_delete(id, title);
                self.surface(outcome);
                true
            }
            Command::SubmitForm { title, description } if view.is_form() => {
                let outcome = self
                    .view
                    .submit(&title, &description, &mut self.store, &mut self.ui);
                self.surface(outcome);
                true
            }
            Command::CancelForm if view.is_form() => {
                self.view.cancel(&self.store, &mut self.ui);
                true
            }
            Command::GenerateDescription if view.is_form() => {
                self.view
                    .generate_description(&mut self.generator, &mut self.ui);
                true
            }
            Command::Dialog(action) => {
                let invocation = self.dialog.invoke(action);
                self.settle(invocation)
            }
            Command::Dismiss(how) => {
                let invocation = self.dialog.dismiss(how);
                self.settle(invocation)
            }
            Command::CloseDialog if self.dialog.is_open() => {
                self.dialog.close();
                self.ui.close_dialog();
                true
            }
            _ => false,
        };

        if accepted {
            debug!(command = name, view = self.view.view().as_str(), "command handled");
        } else {
            debug!(command = name, view = view.as_str(), "command not available");
        }
        accepted
    }

    pub fn store(&self) -> &PostStore<R> {
        &self.store
    }

    /// Direct data-layer access. The list is not re-rendered by mutations
    /// made through this handle; dispatch [`Command::ShowList`] afterwards.
    pub fn store_mut(&mut self) -> &mut PostStore<R> {
        &mut self.store
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn dialog(&self) -> &DialogController {
        &self.dialog
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    fn surface(&mut self, outcome: Outcome) {
        let dialog = self.dialog.open(outcome.into_dialog());
        if let Some(mode) = dialog.mode() {
            info!(mode = mode.as_str(), title = dialog.title().unwrap_or_default(), "dialog opened");
        }
        self.ui.open_dialog(dialog);
    }

    fn settle(&mut self, invocation: Invocation) -> bool {
        match invocation {
            Invocation::Ignored => false,
            Invocation::Closed => {
                self.ui.close_dialog();
                true
            }
            Invocation::Confirmed(action) => {
                self.ui.close_dialog();
                let outcome = self
                    .view
                    .confirm_delete(action, &mut self.store, &mut self.ui);
                self.surface(outcome);
                true
            }
        }
    }
}

impl<U: Renderer + std::fmt::Debug, R: PostRepository + std::fmt::Debug> std::fmt::Debug
    for BlogApp<U, R>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogApp")
            .field("store", &self.store)
            .field("view", &self.view)
            .field("dialog", &self.dialog)
            .field("ui", &self.ui)
            .finish_non_exhaustive()
    }
}
