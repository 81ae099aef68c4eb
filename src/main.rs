// reader-assistant — AI reading assistant for a native Hacker News reader
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Demo shell: drives the panel from a line-oriented REPL with no host
//! bridge attached, which exercises the whole fail-soft path (init reports
//! the desktop-app requirement, every request degrades to the fallback
//! reply).

use anyhow::Context as _;
use clap::Parser;
use reader_assistant::Cli;
use reader_assistant::client::{AssistantClient, CapabilityStatus};
use reader_assistant::panel::{MessageRole, PanelController, QuickAction, ReaderView};
use reader_assistant::ui::{Point, RenderedMessage, SelectionSnapshot, Size, UiSurface};
use std::cell::Cell;
use std::fs::OpenOptions;
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::sync::mpsc;

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    let local_set = tokio::task::LocalSet::new();
    rt.block_on(local_set.run_until(repl()))
}

async fn repl() -> anyhow::Result<()> {
    let surface: Rc<ConsoleSurface> = Rc::new(ConsoleSurface::default());
    let client = Rc::new(AssistantClient::new(None));
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut panel = PanelController::new(Rc::clone(&client), surface.clone(), event_tx);
    panel.set_visibility(true, ReaderView::Detail);

    println!("reader-assistant demo (no host bridge attached)");
    println!("commands: /toggle /status /actions /quit — anything else is sent to the assistant");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match line.trim() {
                    "" => {}
                    "/quit" => break,
                    "/toggle" => panel.toggle(),
                    "/status" => {
                        let status = client.check().await;
                        println!("[status] {}", status.message);
                    }
                    "/actions" => {
                        for action in panel.quick_actions() {
                            println!("[action] {}", action.label());
                        }
                    }
                    text => panel.send_freeform(text),
                }
            }
            Some(event) = event_rx.recv() => {
                panel.handle_event(event);
            }
        }
    }

    client.shutdown().await;
    Ok(())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_ref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!(
                "RUST_LOG is set, but tracing is disabled without --log-file <PATH>. \
Use --log-file to enable diagnostics."
            );
        }
        return Ok(());
    };

    let directives = cli
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(directives.as_str())
        .map_err(|e| anyhow::anyhow!("invalid tracing filter `{directives}`: {e}"))?;

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if cli.log_append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    Ok(())
}

/// Minimal stdout rendering surface for the demo shell.
#[derive(Default)]
struct ConsoleSurface {
    marker: Cell<bool>,
}

impl UiSurface for ConsoleSurface {
    fn focus_input(&self) {}

    fn set_panel_open(&self, open: bool) {
        println!("[panel] {}", if open { "open" } else { "closed" });
    }

    fn set_affordance_visible(&self, _visible: bool) {}

    fn set_selection_assist_marker(&self, active: bool) {
        self.marker.set(active);
    }

    fn selection_assist_marker(&self) -> bool {
        self.marker.get()
    }

    fn render_transcript(&self, messages: &[RenderedMessage], loading: bool) {
        if let Some(message) = messages.last() {
            let who = match message.role {
                MessageRole::User => "you",
                MessageRole::Assistant => "assistant",
            };
            println!("[{who}] {}", message.markup);
        }
        if loading {
            println!("[assistant] …");
        }
    }

    fn render_quick_actions(&self, actions: &[QuickAction]) {
        if actions.is_empty() {
            println!("[actions] open a story to get suggestions");
        }
    }

    fn show_capability_status(&self, status: &CapabilityStatus) {
        println!("[assistant] {}", status.message);
    }

    fn show_selection_menu(&self, _at: Point, _draft_enabled: bool) {}

    fn hide_selection_menu(&self) {}

    fn current_selection(&self) -> Option<SelectionSnapshot> {
        None
    }

    fn viewport(&self) -> Size {
        Size { width: 1280.0, height: 720.0 }
    }
}
