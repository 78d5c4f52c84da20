//! Turns typed lines into board commands.

use blog_core::{Command, DialogAction, Dismissal, PostId};
use thiserror::Error;

use crate::terminal::{Card, FormBuffer};

/// The escape key arrives as a lone ESC byte when the terminal is in line mode.
const ESCAPE_BYTE: &str = "\u{1b}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Blank,
    Help,
    Quit,
    Dump,
    SetTitle(String),
    SetDescription(String),
    Action(Action),
}

/// Buttons and keys of the board, before they are bound to current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    List,
    New,
    Form,
    Edit(PostId),
    Delete(PostId),
    Generate,
    Submit,
    Cancel,
    Yes,
    Ok,
    Escape,
    Outside,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum InputError {
    #[error("unknown command `{0}`; type `help` for the list")]
    Unknown(String),

    #[error("`{command}` expects a post id, got `{raw}`")]
    InvalidId { command: &'static str, raw: String },

    #[error("no post #{0} on the current list")]
    NoSuchCard(PostId),

    #[error("input is not valid UTF-8; line ignored")]
    InvalidUtf8,
}

/// Turns a raw line from the terminal into text.
pub(crate) fn decode_line(raw: Vec<u8>) -> Result<String, InputError> {
    String::from_utf8(raw).map_err(|_| InputError::InvalidUtf8)
}

pub(crate) fn parse_line(line: &str) -> Result<Input, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim() == ESCAPE_BYTE {
        return Ok(Input::Action(Action::Escape));
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Input::Blank);
    }

    let (word, rest) = trimmed
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim_start()))
        .unwrap_or((trimmed, ""));

    let input = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        "dump" => Input::Dump,
        "title" => Input::SetTitle(rest.to_string()),
        "desc" | "description" => Input::SetDescription(rest.to_string()),
        "list" => Input::Action(Action::List),
        "new" => Input::Action(Action::New),
        "form" => Input::Action(Action::Form),
        "edit" => Input::Action(Action::Edit(parse_id("edit", rest)?)),
        "delete" | "del" => Input::Action(Action::Delete(parse_id("delete", rest)?)),
        "generate" | "gen" => Input::Action(Action::Generate),
        "submit" | "save" => Input::Action(Action::Submit),
        "cancel" | "no" => Input::Action(Action::Cancel),
        "yes" | "confirm" => Input::Action(Action::Yes),
        "ok" => Input::Action(Action::Ok),
        "esc" | "escape" => Input::Action(Action::Escape),
        "outside" => Input::Action(Action::Outside),
        "close" => Input::Action(Action::Close),
        _ => return Err(InputError::Unknown(word.to_string())),
    };
    Ok(input)
}

fn parse_id(command: &'static str, raw: &str) -> Result<PostId, InputError> {
    let raw = raw.trim().trim_start_matches('#');
    raw.parse::<PostId>().map_err(|_| InputError::InvalidId {
        command,
        raw: raw.to_string(),
    })
}

/// What an action needs to know about the screen to become a command.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Screen<'a> {
    pub(crate) dialog_open: bool,
    pub(crate) form: &'a FormBuffer,
    pub(crate) cards: &'a [Card],
}

pub(crate) fn resolve(action: Action, screen: Screen<'_>) -> Result<Command, InputError> {
    let command = match action {
        Action::List => Command::ShowList,
        Action::New => Command::NewPost,
        Action::Form => Command::SwitchToForm,
        Action::Edit(id) => Command::EditPost(id),
        Action::Delete(id) => {
            let card = screen
                .cards
                .iter()
                .find(|card| card.id == id)
                .ok_or(InputError::NoSuchCard(id))?;
            Command::RequestDelete {
                id,
                title: card.title.clone(),
            }
        }
        Action::Generate => Command::GenerateDescription,
        Action::Submit => Command::SubmitForm {
            title: screen.form.title.clone(),
            description: screen.form.description.clone(),
        },
        Action::Cancel if screen.dialog_open => Command::Dialog(DialogAction::Cancel),
        Action::Cancel => Command::CancelForm,
        Action::Yes => Command::Dialog(DialogAction::Confirm),
        Action::Ok => Command::Dialog(DialogAction::Acknowledge),
        Action::Escape => Command::Dismiss(Dismissal::EscapeKey),
        Action::Outside => Command::Dismiss(Dismissal::OverlayClick),
        Action::Close => Command::CloseDialog,
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen<'a>(dialog_open: bool, form: &'a FormBuffer, cards: &'a [Card]) -> Screen<'a> {
        Screen {
            dialog_open,
            form,
            cards,
        }
    }

    #[test]
    fn parse_line_reads_simple_words() {
        assert_eq!(parse_line("list"), Ok(Input::Action(Action::List)));
        assert_eq!(parse_line("  NEW  "), Ok(Input::Action(Action::New)));
        assert_eq!(parse_line(""), Ok(Input::Blank));
        assert_eq!(parse_line("quit"), Ok(Input::Quit));
    }

    #[test]
    fn parse_line_keeps_field_text() {
        assert_eq!(
            parse_line("title   Hello world "),
            Ok(Input::SetTitle("Hello world".to_string()))
        );
        assert_eq!(parse_line("desc"), Ok(Input::SetDescription(String::new())));
    }

    #[test]
    fn parse_line_reads_ids() {
        assert_eq!(parse_line("edit 3"), Ok(Input::Action(Action::Edit(3))));
        assert_eq!(parse_line("delete #12"), Ok(Input::Action(Action::Delete(12))));
    }

    #[test]
    fn parse_line_rejects_bad_ids() {
        assert_eq!(
            parse_line("edit abc"),
            Err(InputError::InvalidId {
                command: "edit",
                raw: "abc".to_string()
            })
        );
        assert!(matches!(
            parse_line("delete"),
            Err(InputError::InvalidId { command: "delete", .. })
        ));
    }

    #[test]
    fn parse_line_maps_escape_byte() {
        assert_eq!(parse_line("\u{1b}\n"), Ok(Input::Action(Action::Escape)));
        assert_eq!(parse_line("esc"), Ok(Input::Action(Action::Escape)));
    }

    #[test]
    fn decode_line_rejects_invalid_utf8() {
        assert_eq!(decode_line(b"caf\xe9\n".to_vec()), Err(InputError::InvalidUtf8));
        assert_eq!(decode_line("café\n".as_bytes().to_vec()), Ok("café\n".to_string()));
    }

    #[test]
    fn parse_line_rejects_unknown_words() {
        assert_eq!(
            parse_line("frobnicate now"),
            Err(InputError::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn cancel_targets_dialog_when_one_is_open() {
        let form = FormBuffer::default();

        assert_eq!(
            resolve(Action::Cancel, screen(true, &form, &[])),
            Ok(Command::Dialog(DialogAction::Cancel))
        );
        assert_eq!(
            resolve(Action::Cancel, screen(false, &form, &[])),
            Ok(Command::CancelForm)
        );
    }

    #[test]
    fn submit_uses_form_buffer() {
        let form = FormBuffer {
            title: "T".to_string(),
            description: "D".to_string(),
        };

        assert_eq!(
            resolve(Action::Submit, screen(false, &form, &[])),
            Ok(Command::SubmitForm {
                title: "T".to_string(),
                description: "D".to_string()
            })
        );
    }

    #[test]
    fn delete_resolves_title_from_rendered_cards() {
        let form = FormBuffer::default();
        let cards = vec![Card {
            id: 4,
            title: "Four".to_string(),
        }];

        assert_eq!(
            resolve(Action::Delete(4), screen(false, &form, &cards)),
            Ok(Command::RequestDelete {
                id: 4,
                title: "Four".to_string()
            })
        );
        assert_eq!(
            resolve(Action::Delete(5), screen(false, &form, &cards)),
            Err(InputError::NoSuchCard(5))
        );
    }

    #[test]
    fn dismissal_keys_map_to_dismissals() {
        let form = FormBuffer::default();

        assert_eq!(
            resolve(Action::Escape, screen(true, &form, &[])),
            Ok(Command::Dismiss(Dismissal::EscapeKey))
        );
        assert_eq!(
            resolve(Action::Outside, screen(true, &form, &[])),
            Ok(Command::Dismiss(Dismissal::OverlayClick))
        );
    }
}
