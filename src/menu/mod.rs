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

//! Selection context menu: two actions ("Explain This", "Draft Reply")
//! anchored to a validated text selection inside a recognized content
//! region. The menu never talks to the capability client itself; it
//! dispatches into the panel controller's entry points.

pub mod position;

use crate::item;
use crate::panel::PanelController;
use crate::ui::{Point, SelectionRegion, Size, UiSurface};

/// Fixed menu dimensions used for anchoring (styling is external).
pub const MENU_SIZE: Size = Size { width: 240.0, height: 44.0 };

/// Selections shorter than this (after trimming) never open the menu.
const MIN_SELECTION_CHARS: usize = 3;
/// Captured comment bodies are cut to this many plaintext characters.
const COMMENT_BODY_LIMIT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Explain,
    DraftReply,
}

/// What a validated selection captured: the text, the region it came from
/// (with the enclosing comment's identity when applicable) and the anchor
/// the menu was shown at.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedSelection {
    pub text: String,
    pub region: SelectionRegion,
    pub anchor: Point,
}

/// Transient menu state, recomputed on every qualifying pointer release.
#[derive(Default)]
pub struct SelectionMenu {
    captured: Option<CapturedSelection>,
    visible: bool,
}

impl SelectionMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn captured(&self) -> Option<&CapturedSelection> {
        self.captured.as_ref()
    }

    /// Validate the current selection and show the menu over it. Returns
    /// whether the menu was (re)shown. Ineligible or invalid selections
    /// leave any previously captured state untouched.
    pub fn on_pointer_release(&mut self, surface: &dyn UiSurface) -> bool {
        if !surface.selection_assist_marker() {
            return false;
        }
        let Some(snapshot) = surface.current_selection() else {
            return false;
        };
        let text = snapshot.text.trim();
        if text.chars().count() < MIN_SELECTION_CHARS {
            return false;
        }
        let Some(region) = snapshot.region else {
            return false;
        };
        let region = match region {
            SelectionRegion::Comment { id, author, body } => SelectionRegion::Comment {
                id,
                author,
                body: item::plain_text_preview(&body, COMMENT_BODY_LIMIT),
            },
            SelectionRegion::Article => SelectionRegion::Article,
        };
        let anchor = position::anchor(snapshot.rect, MENU_SIZE, surface.viewport());
        let draft_enabled = matches!(region, SelectionRegion::Comment { .. });

        self.captured = Some(CapturedSelection { text: text.to_owned(), region, anchor });
        self.visible = true;
        surface.show_selection_menu(anchor, draft_enabled);
        true
    }

    /// Hide the menu (outside pointer-press, Escape). Captured data is kept
    /// until the next selection validates.
    pub fn dismiss(&mut self, surface: &dyn UiSurface) {
        if self.visible {
            self.visible = false;
            surface.hide_selection_menu();
        }
    }

    /// Run one of the menu's actions against the panel. The menu hides
    /// synchronously before the (async) request begins, and the captured
    /// selection is consumed.
    pub fn dispatch(
        &mut self,
        action: MenuAction,
        panel: &mut PanelController,
        surface: &dyn UiSurface,
    ) {
        let Some(captured) = self.captured.take() else {
            return;
        };
        self.visible = false;
        surface.hide_selection_menu();

        match action {
            MenuAction::Explain => panel.run_explain(&captured.text),
            MenuAction::DraftReply => {
                // Only comment regions enable the draft action.
                if let SelectionRegion::Comment { author, body, .. } = captured.region {
                    panel.run_draft_reply(&captured.text, &author, &body);
                }
            }
        }
    }
}
