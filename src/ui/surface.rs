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

//! Injected UI-surface abstraction.
//!
//! The controller and the selection menu never touch the rendering
//! environment directly; everything they need from it — element focus,
//! visibility toggles, transcript rendering, the selection API, viewport
//! dimensions — goes through this trait, so the orchestration logic runs
//! unchanged against a real window, a terminal, or a test recorder.

use crate::client::CapabilityStatus;
use crate::panel::{MessageRole, QuickAction};
use uuid::Uuid;

/// A point in surface coordinates (CSS-pixel semantics, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// An axis-aligned rectangle, e.g. a selection's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One transcript entry, ready for display. `markup` contains only tags
/// inserted by the markdown renderer; all message text inside is escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub markup: String,
}

/// Which recognized content region a selection's anchor ancestor falls in.
/// Comment regions carry the enclosing comment's identity for reply drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRegion {
    Comment { id: u32, author: String, body: String },
    Article,
}

/// The surface's view of the current text selection. `region` is `None`
/// when the selection lies outside every recognized content region.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    pub text: String,
    pub rect: Rect,
    pub region: Option<SelectionRegion>,
}

/// Capability set the orchestration core needs from its host surface.
///
/// Methods take `&self`; implementations use interior mutability. All calls
/// happen on the single logical UI thread.
pub trait UiSurface {
    /// Move keyboard focus to the panel's input field.
    fn focus_input(&self);

    /// Reflect the panel's open/closed state (display, pressed/expanded
    /// indicators on the toggle affordance).
    fn set_panel_open(&self, open: bool);

    /// Show or hide the whole assistant affordance.
    fn set_affordance_visible(&self, visible: bool);

    /// Toggle the document-level marker other components (the selection
    /// menu) consult for eligibility.
    fn set_selection_assist_marker(&self, active: bool);

    fn selection_assist_marker(&self) -> bool;

    /// Replace the rendered transcript. `loading` asks the surface to show
    /// an in-flight indicator after the last message.
    fn render_transcript(&self, messages: &[RenderedMessage], loading: bool);

    /// Replace the quick-action row. An empty slice means no story is bound
    /// and the surface shows its hint copy instead.
    fn render_quick_actions(&self, actions: &[QuickAction]);

    /// Surface the latest capability status (availability notices).
    fn show_capability_status(&self, status: &CapabilityStatus);

    fn show_selection_menu(&self, at: Point, draft_enabled: bool);

    fn hide_selection_menu(&self);

    /// Snapshot the current text selection, if any.
    fn current_selection(&self) -> Option<SelectionSnapshot>;

    fn viewport(&self) -> Size;
}
