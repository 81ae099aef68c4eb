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

//! Host-command transport boundary.
//!
//! The hosting runtime exposes a single generic primitive: invoke a named
//! remote procedure with a JSON argument and get a JSON result back, or a
//! rejection. Everything above this module treats the transport as opaque.
//! A runtime without the bridge (a plain-browser build, a test harness)
//! is modeled as the bridge simply not being there — never as an error.

use async_trait::async_trait;
use serde_json::Value;

/// Remote procedure names understood by the hosting runtime.
pub mod commands {
    pub const CHECK: &str = "copilot_check";
    pub const INIT: &str = "copilot_init";
    pub const SUMMARIZE: &str = "copilot_summarize";
    pub const ANALYZE_DISCUSSION: &str = "copilot_analyze_discussion";
    pub const EXPLAIN: &str = "copilot_explain";
    pub const DRAFT_REPLY: &str = "copilot_draft_reply";
    pub const ASK: &str = "copilot_ask";
    pub const SHUTDOWN: &str = "copilot_shutdown";
}

/// A rejected host call. Rejections may arrive without any usable message
/// (the host threw a bare value); callers supply a per-operation fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("{0}")]
    Rejected(String),
    #[error("host call rejected without a message")]
    Unspecified,
}

impl BridgeError {
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Unspecified => fallback.to_owned(),
        }
    }
}

/// The host-provided invoke primitive.
///
/// Implementations run on the single logical UI thread; futures are not
/// required to be `Send`.
#[async_trait(?Send)]
pub trait HostBridge {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, BridgeError>;
}
