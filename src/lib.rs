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

//! Assistant orchestration core for a desktop Hacker News reader: a
//! capability-gated client for the host's optional AI feature, the panel
//! controller that owns the conversation, a selection-triggered context
//! menu, and the constrained markdown renderer used for responses.
//!
//! Everything the subsystem needs from its environment comes in through
//! two narrow seams: [`bridge::HostBridge`] (invoke a named remote
//! procedure on the hosting runtime) and [`ui::UiSurface`] (the rendering
//! environment). Every public operation is fail-soft — failures degrade to
//! "feature unavailable" or one fallback message, never to a crash.

pub mod bridge;
pub mod client;
pub mod item;
pub mod menu;
pub mod panel;
pub mod ui;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "reader-assistant", about = "Reading-assistant panel demo shell")]
pub struct Cli {
    /// Write diagnostics to this file (tracing stays off without it)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (falls back to RUST_LOG, then "info")
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}
