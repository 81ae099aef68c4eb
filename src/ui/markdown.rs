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

//! Constrained markdown → markup renderer for assistant responses.
//!
//! Supported subset: fenced code blocks, inline code, headings 1–3, bold,
//! italic, unordered and ordered lists, paragraph breaks on blank lines.
//! Headings map one level below the panel's own `<h2>` so the document
//! outline stays intact.
//!
//! Untrusted text never reaches the output unescaped: every character is
//! escaped as it is emitted, and code spans are consumed in the same pass
//! as emphasis, so markdown syntax inside a code span is never
//! reinterpreted. One-shot and stateless; feeding the output back in is
//! unsupported.

/// Render a constrained-markdown string to a markup fragment.
#[must_use]
pub fn render(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    let mut block = Block::Idle;

    for line in input.lines() {
        if matches!(block, Block::FencedCode(_)) {
            if line.trim_start().starts_with("```") {
                flush(&mut out, std::mem::replace(&mut block, Block::Idle));
            } else if let Block::FencedCode(code) = &mut block {
                if !code.is_empty() {
                    code.push('\n');
                }
                code.push_str(&escape(line));
            }
            continue;
        }

        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            flush(&mut out, std::mem::replace(&mut block, Block::FencedCode(String::new())));
            continue;
        }
        if trimmed.is_empty() {
            flush(&mut out, std::mem::replace(&mut block, Block::Idle));
            continue;
        }
        if let Some((level, text)) = heading_of(trimmed) {
            flush(&mut out, std::mem::replace(&mut block, Block::Idle));
            // Panel headline is <h2>; content headings start one level below.
            let tag_level = level + 2;
            out.push_str(&format!("<h{tag_level}>{}</h{tag_level}>\n", render_inline(text)));
            continue;
        }
        if let Some(text) = unordered_item_of(trimmed) {
            if let Block::UnorderedList(items) = &mut block {
                items.push(render_inline(text));
            } else {
                let fresh = Block::UnorderedList(vec![render_inline(text)]);
                flush(&mut out, std::mem::replace(&mut block, fresh));
            }
            continue;
        }
        if let Some(text) = ordered_item_of(trimmed) {
            if let Block::OrderedList(items) = &mut block {
                items.push(render_inline(text));
            } else {
                let fresh = Block::OrderedList(vec![render_inline(text)]);
                flush(&mut out, std::mem::replace(&mut block, fresh));
            }
            continue;
        }
        if let Block::Paragraph(text) = &mut block {
            text.push(' ');
            text.push_str(&render_inline(trimmed));
        } else {
            let fresh = Block::Paragraph(render_inline(trimmed));
            flush(&mut out, std::mem::replace(&mut block, fresh));
        }
    }
    flush(&mut out, block);

    // Single fragment, no trailing newline.
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Escape markup-special characters. Applied to all untrusted text before
/// any renderer tag is emitted.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_escaped(&mut out, ch);
    }
    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}

/// Block-scanner state. Exactly one block accumulates at a time.
enum Block {
    Idle,
    Paragraph(String),
    UnorderedList(Vec<String>),
    OrderedList(Vec<String>),
    FencedCode(String),
}

fn flush(out: &mut String, block: Block) {
    match block {
        Block::Idle => {}
        Block::Paragraph(text) => {
            out.push_str("<p>");
            out.push_str(&text);
            out.push_str("</p>\n");
        }
        Block::UnorderedList(items) => {
            out.push_str("<ul>");
            for item in items {
                out.push_str("<li>");
                out.push_str(&item);
                out.push_str("</li>");
            }
            out.push_str("</ul>\n");
        }
        Block::OrderedList(items) => {
            out.push_str("<ol>");
            for item in items {
                out.push_str("<li>");
                out.push_str(&item);
                out.push_str("</li>");
            }
            out.push_str("</ol>\n");
        }
        Block::FencedCode(code) => {
            out.push_str("<pre><code>");
            out.push_str(&code);
            out.push_str("</code></pre>\n");
        }
    }
}

fn heading_of(line: &str) -> Option<(usize, &str)> {
    for level in (1..=3).rev() {
        if let Some(rest) = line.strip_prefix(&"###"[..level])
            && let Some(text) = rest.strip_prefix(' ')
        {
            return Some((level, text.trim()));
        }
    }
    None
}

fn unordered_item_of(line: &str) -> Option<&str> {
    line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")).map(str::trim)
}

fn ordered_item_of(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ").map(str::trim)
}

/// Inline scanner: a single left-to-right pass. Code spans are consumed
/// before emphasis can see them; unmatched delimiters fall through as
/// literal (escaped) text.
fn render_inline(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '`' => {
                if let Some(end) = find_char(&chars, i + 1, '`') {
                    out.push_str("<code>");
                    for &ch in &chars[i + 1..end] {
                        push_escaped(&mut out, ch);
                    }
                    out.push_str("</code>");
                    i = end + 1;
                } else {
                    out.push('`');
                    i += 1;
                }
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    if let Some(end) = find_double_star(&chars, i + 2) {
                        let inner: String = chars[i + 2..end].iter().collect();
                        out.push_str("<strong>");
                        out.push_str(&render_inline(&inner));
                        out.push_str("</strong>");
                        i = end + 2;
                    } else {
                        out.push('*');
                        i += 1;
                    }
                } else if let Some(end) = find_char(&chars, i + 1, '*') {
                    let inner: String = chars[i + 1..end].iter().collect();
                    out.push_str("<em>");
                    out.push_str(&render_inline(&inner));
                    out.push_str("</em>");
                    i = end + 1;
                } else {
                    out.push('*');
                    i += 1;
                }
            }
            ch => {
                push_escaped(&mut out, ch);
                i += 1;
            }
        }
    }
    out
}

fn find_char(chars: &[char], from: usize, needle: char) -> Option<usize> {
    (from..chars.len()).find(|&j| chars[j] == needle)
}

fn find_double_star(chars: &[char], from: usize) -> Option<usize> {
    if chars.len() < 2 {
        return None;
    }
    (from..chars.len() - 1).find(|&j| chars[j] == '*' && chars[j + 1] == '*')
}
