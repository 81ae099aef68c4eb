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

//! Reader domain types shared by the panel and the AI context builders.
//!
//! Field names follow the upstream item API (`by`, `kids`, `descendants`);
//! the view layer hands these over as-is when binding the panel to a story.

use serde::{Deserialize, Serialize};

/// The story the panel is currently bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub descendants: u32,
}

/// A top-level comment on the bound story. `text` is the item API's HTML
/// fragment; use [`plain_text_preview`] before showing or forwarding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u32,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub kids: Vec<u32>,
}

/// Extract the registrable-ish host from a URL, the way the reader shows
/// story domains: scheme, path, port and a leading `www.` stripped.
#[must_use]
pub fn domain_of(url: &str) -> Option<String> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host = host.rsplit('@').next().unwrap_or(host);
    let host = host.split(':').next().unwrap_or(host);
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() || !host.contains('.') {
        return None;
    }
    Some(host.to_ascii_lowercase())
}

/// Reduce an HTML comment fragment to plain text: tags dropped (`<p>` and
/// `<br>` become spaces), the entities the item API emits decoded, runs of
/// whitespace collapsed, then cut to at most `max_chars` characters.
#[must_use]
pub fn plain_text_preview(html: &str, max_chars: usize) -> String {
    let mut text = String::with_capacity(html.len().min(max_chars * 4));
    let mut chars = html.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '<' => {
                // Skip to the closing bracket; block-ish tags become spaces.
                let mut tag = String::new();
                for inner in chars.by_ref() {
                    if inner == '>' {
                        break;
                    }
                    tag.push(inner);
                }
                let tag = tag.trim_start_matches('/').to_ascii_lowercase();
                if tag.starts_with('p') || tag.starts_with("br") {
                    text.push(' ');
                }
            }
            '&' => text.push_str(&decode_entity(&mut chars)),
            _ => text.push(ch),
        }
    }

    let mut collapsed = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                collapsed.push(' ');
            }
            last_was_space = true;
        } else {
            collapsed.push(ch);
            last_was_space = false;
        }
    }
    let collapsed = collapsed.trim_end();

    collapsed.chars().take(max_chars).collect()
}

/// Decode one `&...;` entity, consuming it from the iterator. Unknown
/// entities are passed through verbatim.
fn decode_entity(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&next) = chars.peek() {
        if next == ';' {
            chars.next();
            return match name.as_str() {
                "amp" => "&".to_owned(),
                "lt" => "<".to_owned(),
                "gt" => ">".to_owned(),
                "quot" | "#34" => "\"".to_owned(),
                "#x27" | "#39" | "apos" => "'".to_owned(),
                "#x2F" | "#47" => "/".to_owned(),
                "nbsp" => " ".to_owned(),
                other => format!("&{other};"),
            };
        }
        if !next.is_ascii_alphanumeric() && next != '#' {
            break;
        }
        name.push(next);
        chars.next();
    }
    format!("&{name}")
}
