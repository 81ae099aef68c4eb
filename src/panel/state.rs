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

use crate::client::{AssistantResponse, CapabilityStatus};
use crate::item::{Comment, Story};
use std::time::SystemTime;
use uuid::Uuid;

/// One transcript entry. Append-only: never mutated after creation, never
/// reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: SystemTime,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::of(MessageRole::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::of(MessageRole::Assistant, content)
    }

    fn of(role: MessageRole, content: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), role, content: content.into(), timestamp: SystemTime::now() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// The story (and its top-level comments) the panel is currently bound to.
/// Cleared when the user leaves the story's view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    pub story: Option<Story>,
    pub comments: Vec<Comment>,
}

impl ConversationContext {
    pub fn clear(&mut self) {
        self.story = None;
        self.comments.clear();
    }
}

/// Canned analyses offered for the bound story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Summarize,
    AnalyzeDiscussion,
    AskAboutThis,
}

impl QuickAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Summarize => "Summarize",
            Self::AnalyzeDiscussion => "Analyze Discussion",
            Self::AskAboutThis => "Ask About This",
        }
    }
}

/// Derive the quick-action row purely from the bound context: a linked
/// story offers Summarize, a discussed one offers Analyze Discussion, any
/// bound story offers Ask About This. No story, no actions.
#[must_use]
pub fn quick_actions(context: &ConversationContext) -> Vec<QuickAction> {
    let Some(story) = context.story.as_ref() else {
        return Vec::new();
    };
    let mut actions = Vec::new();
    if story.url.is_some() {
        actions.push(QuickAction::Summarize);
    }
    if !context.comments.is_empty() {
        actions.push(QuickAction::AnalyzeDiscussion);
    }
    actions.push(QuickAction::AskAboutThis);
    actions
}

/// Completion events delivered back to the controller by spawned client
/// tasks. The host's event loop owns the receiver and routes these into
/// [`PanelController::handle_event`](super::PanelController::handle_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    InitFinished(CapabilityStatus),
    RequestFinished(Option<AssistantResponse>),
}
