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

use serde::{Deserialize, Serialize};

/// Status of the host-side assistant capability, as reported by
/// `copilot_check` / `copilot_init`.
///
/// `available` is kept consistent with the most recent probe or call: any
/// failure degrades it to `false` with a descriptive message, it is never
/// left stale as `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityStatus {
    pub available: bool,
    pub running: bool,
    #[serde(default)]
    pub cli_installed: bool,
    #[serde(default)]
    pub cli_authenticated: bool,
    pub message: String,
}

impl CapabilityStatus {
    /// Fixed status returned when the host bridge is absent entirely.
    pub const BRIDGE_ABSENT_MESSAGE: &'static str = "AI assistant requires the desktop app.";

    #[must_use]
    pub fn unchecked() -> Self {
        Self::degraded("AI assistant has not been checked yet.")
    }

    #[must_use]
    pub fn bridge_absent() -> Self {
        Self::degraded(Self::BRIDGE_ABSENT_MESSAGE)
    }

    #[must_use]
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            available: false,
            running: false,
            cli_installed: false,
            cli_authenticated: false,
            message: message.into(),
        }
    }
}

impl Default for CapabilityStatus {
    fn default() -> Self {
        Self::unchecked()
    }
}

/// Story metadata sent along with a summarize request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoryContext {
    pub title: String,
    pub url: Option<String>,
    pub domain: Option<String>,
    pub score: u32,
    pub comment_count: u32,
    pub author: Option<String>,
    pub text: Option<String>,
}

/// Thread snapshot sent along with a discussion-analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscussionContext {
    pub story_title: String,
    pub comment_count: u32,
    pub top_comments: Vec<CommentSummary>,
}

/// One top-level comment reduced for AI context.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommentSummary {
    pub author: String,
    pub text_preview: String,
    pub reply_count: u32,
}

/// Context for drafting a reply to a comment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReplyContext {
    pub parent_comment: String,
    pub parent_author: String,
    pub story_title: String,
    pub user_draft: Option<String>,
}

/// A completed response from the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub content: String,
}
