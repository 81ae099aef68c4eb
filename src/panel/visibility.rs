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

/// Which view of the reader is on screen. Handed in by the navigation
/// layer on every route change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderView {
    List,
    Detail,
    Search,
    User,
    Settings,
}

/// Visibility policy for the whole assistant affordance: offered only while
/// reading a story detail in zen mode. Pure function of its two inputs.
#[must_use]
pub const fn assistant_visible(zen_mode: bool, view: ReaderView) -> bool {
    zen_mode && matches!(view, ReaderView::Detail)
}
