use std::io::Write;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use blog_core::{BlogApp, Command};
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

mod infrastructure;
mod input;
mod terminal;

use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use input::{Input, Screen, decode_line, parse_line, resolve};
use terminal::TerminalRenderer;

const DEMO_POSTS: [(&str, &str); 2] = [
    ("First post", "Welcome to the board. Edit or delete me."),
    ("Second post", ""),
];

#[derive(Debug, Parser)]
#[command(name = "blog-cli", version, about = "Single-page post board in the terminal")]
struct Cli {
    /// Log filter, e.g. `info` or `blog_core=debug` (overrides LOG_LEVEL).
    #[arg(long)]
    log_level: Option<String>,

    /// strftime pattern for card dates (overrides BLOG_TIMESTAMP_FORMAT).
    #[arg(long)]
    timestamp_format: Option<String>,

    /// Start with two demo posts.
    #[arg(long)]
    seed_demo: bool,
}

/// What the loop should do after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// A description was just generated; flash it for a moment.
    Highlight,
    Quit,
}

enum Event {
    /// Bytes read by the last call; zero at end of input.
    Read(usize),
    HighlightExpired,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::from_env()?.with_overrides(
        cli.log_level,
        cli.timestamp_format,
        cli.seed_demo,
    )?;
    init_logging(&settings.log_level)?;
    info!(
        timestamp_format = %settings.timestamp_format,
        seed_demo = settings.seed_demo,
        "starting blog-cli"
    );

    let mut app = BlogApp::new(TerminalRenderer::stdout(settings.timestamp_format.clone()));
    if settings.seed_demo {
        seed_demo(&mut app)?;
    }
    app.start();
    app.ui_mut().print_raw("Type `help` for the list of commands.");

    let stdin = BufReader::new(tokio::io::stdin());
    run_session(&mut app, stdin, settings.highlight).await?;

    info!(posts = app.store().len(), "blog-cli finished");
    Ok(())
}

/// Reads lines until `quit` or end of input. Only I/O failures end the
/// session with an error; undecodable lines are reported and skipped.
async fn run_session<R, W>(
    app: &mut BlogApp<TerminalRenderer<W>>,
    mut reader: R,
    highlight: Duration,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    // Survives a read cancelled by the highlight deadline; partial bytes stay here.
    let mut buf = Vec::new();
    let mut highlight_until: Option<Instant> = None;

    loop {
        app.ui_mut().prompt();

        let event = match highlight_until {
            Some(deadline) => tokio::select! {
                read = reader.read_until(b'\n', &mut buf) => {
                    Event::Read(read.context("failed to read stdin")?)
                }
                _ = sleep_until(deadline) => Event::HighlightExpired,
            },
            None => Event::Read(
                reader
                    .read_until(b'\n', &mut buf)
                    .await
                    .context("failed to read stdin")?,
            ),
        };

        match event {
            Event::HighlightExpired => {
                highlight_until = None;
                app.ui_mut().clear_highlight();
                continue;
            }
            Event::Read(0) if buf.is_empty() => break,
            Event::Read(_) => {}
        }

        let line = match decode_line(std::mem::take(&mut buf)) {
            Ok(line) => line,
            Err(err) => {
                app.ui_mut().notice(&err.to_string());
                continue;
            }
        };

        match handle_line(app, &line)? {
            Flow::Continue => {}
            Flow::Highlight => highlight_until = Some(Instant::now() + highlight),
            Flow::Quit => break,
        }
    }

    Ok(())
}

fn seed_demo<W: Write>(app: &mut BlogApp<TerminalRenderer<W>>) -> Result<()> {
    for (title, description) in DEMO_POSTS {
        app.store_mut()
            .create_post(title, description)
            .with_context(|| format!("failed to seed demo post `{title}`"))?;
    }
    debug!(count = DEMO_POSTS.len(), "demo posts seeded");
    Ok(())
}

fn handle_line<W: Write>(app: &mut BlogApp<TerminalRenderer<W>>, line: &str) -> Result<Flow> {
    let input = match parse_line(line) {
        Ok(input) => input,
        Err(err) => {
            app.ui_mut().notice(&err.to_string());
            return Ok(Flow::Continue);
        }
    };

    match input {
        Input::Blank => {}
        Input::Help => app.ui_mut().print_help(),
        Input::Quit => return Ok(Flow::Quit),
        Input::Dump => {
            let json = serde_json::to_string_pretty(app.store().list_posts())
                .context("failed to serialize posts")?;
            app.ui_mut().print_raw(&json);
        }
        Input::SetTitle(title) => {
            if form_is_editable(app) {
                app.ui_mut().set_title(title);
            }
        }
        Input::SetDescription(description) => {
            if form_is_editable(app) {
                app.ui_mut().set_description(description);
            }
        }
        Input::Action(action) => {
            let screen = Screen {
                dialog_open: app.dialog().is_open(),
                form: app.ui().form(),
                cards: app.ui().cards(),
            };
            let command = match resolve(action, screen) {
                Ok(command) => command,
                Err(err) => {
                    app.ui_mut().notice(&err.to_string());
                    return Ok(Flow::Continue);
                }
            };

            let generated = command == Command::GenerateDescription;
            let name = command.name();
            if !app.dispatch(command) {
                let reason = if app.dialog().is_open() {
                    "answer the open dialog first"
                } else {
                    "not available here"
                };
                app.ui_mut().notice(&format!("`{name}`: {reason}"));
            } else if generated && app.ui().is_highlighted() {
                return Ok(Flow::Highlight);
            }
        }
    }

    Ok(Flow::Continue)
}

/// Typing into the form needs the form tab and no dialog in front of it.
fn form_is_editable<W: Write>(app: &mut BlogApp<TerminalRenderer<W>>) -> bool {
    let reason = if app.dialog().is_open() {
        "answer the open dialog first"
    } else if !app.view().view().is_form() {
        "switch to the form first (`new` or `form`)"
    } else {
        return true;
    };
    app.ui_mut().notice(reason);
    false
}
