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

use crate::ui::{Point, Rect, Size};

/// Minimum distance kept between the menu and the viewport edges.
pub const EDGE_GAP: f64 = 8.0;

/// Where to place the selection menu: centered horizontally above the
/// selection rectangle with an [`EDGE_GAP`] gap, shifted to stay at least
/// [`EDGE_GAP`] from the left/right viewport edges, and flipped below the
/// selection when it would cross the top edge. Pure geometry, no animation.
#[must_use]
pub fn anchor(selection: Rect, menu: Size, viewport: Size) -> Point {
    let centered = selection.x + selection.width / 2.0 - menu.width / 2.0;
    let max_x = (viewport.width - menu.width - EDGE_GAP).max(EDGE_GAP);
    let x = centered.clamp(EDGE_GAP, max_x);

    let above = selection.y - menu.height - EDGE_GAP;
    let y = if above < 0.0 { selection.y + selection.height + EDGE_GAP } else { above };

    Point { x, y }
}
