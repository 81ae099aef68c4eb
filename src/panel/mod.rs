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

//! Panel controller: conversation lifecycle, context binding, quick-action
//! derivation and rendering orchestration.

mod controller;
mod state;
mod visibility;

pub use controller::{FALLBACK_REPLY, PanelController};
pub use state::{
    ConversationContext, Message, MessageRole, PanelEvent, QuickAction, quick_actions,
};
pub use visibility::{ReaderView, assistant_visible};
