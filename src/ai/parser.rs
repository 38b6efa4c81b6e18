//! Response parser for generated copy
//!
//! Providers wrap answers in markdown fences, prefix them with labels or add
//! chatter around the actual content. The parser strips all of that and turns
//! the raw completion into a [`SlotValue`] for the slot's kind.

use crate::content::schema::{SlotKind, SlotValue};
use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde_json::Value;

/// Tags kept in generated HTML, always without attributes
const ALLOWED_TAGS: &[&str] = &["p", "strong", "em", "b", "i", "ul", "ol", "li", "br"];

/// Parser for completions of content slots
#[derive(Debug)]
pub struct ResponseParser {
    /// Regex for detecting markdown code blocks
    markdown_block_start: Regex,
    /// Regex for detecting markdown code block end
    markdown_block_end: Regex,
    /// Leading `Tagline:` style labels
    label_prefix: Regex,
    /// Bullets and numbering in front of list entries
    list_marker: Regex,
    /// Doctype, comments, and elements dropped together with their content
    dropped_markup: Regex,
    /// Any opening or closing tag, capturing the slash and the tag name
    markup_tag: Regex,
}

impl ResponseParser {
    /// Create a new ResponseParser with compiled regexes
    pub fn new() -> Self {
        Self {
            markdown_block_start: Regex::new(r"```[\w]*\n?").unwrap(),
            markdown_block_end: Regex::new(r"\n?```\s*$").unwrap(),
            label_prefix: Regex::new(
                r"(?i)^\s*(?:business name|company name|name|tagline|slogan|description|answer|text)\s*:\s*",
            )
            .unwrap(),
            list_marker: Regex::new(r"^\s*(?:[-*\u{2022}]|\d+[.)])\s*").unwrap(),
            dropped_markup: Regex::new(
                r"(?is)<!doctype[^>]*>|<!--.*?-->|<(?:head|script|style|iframe|object|embed|noscript|template|svg|math)\b[^>]*>.*?</(?:head|script|style|iframe|object|embed|noscript|template|svg|math)\s*>",
            )
            .unwrap(),
            markup_tag: Regex::new(r"(?s)<\s*(/?)\s*([A-Za-z][A-Za-z0-9]*)\b[^>]*>").unwrap(),
        }
    }

    /// Parse a completion for a slot of the given kind
    pub fn parse(&self, response: &str, kind: SlotKind) -> Result<SlotValue> {
        tracing::trace!("Raw response ({} chars): {}", response.len(), response);

        let cleaned = self.remove_markdown_blocks(response);
        let value = match kind {
            SlotKind::Name => SlotValue::Text(self.parse_name(&cleaned)),
            SlotKind::Text => SlotValue::Text(self.parse_text(&cleaned)),
            SlotKind::Html => SlotValue::Text(self.parse_html(&cleaned)),
            SlotKind::List => SlotValue::List(self.parse_list(&cleaned)),
        };

        if value.is_blank() {
            return Err(Error::Parse(format!(
                "{:?} response was empty after cleanup",
                kind
            )));
        }

        Ok(value)
    }

    /// Remove markdown code block delimiters
    fn remove_markdown_blocks(&self, text: &str) -> String {
        let text = self.markdown_block_start.replace_all(text, "");
        let text = self.markdown_block_end.replace_all(&text, "");
        text.trim().to_string()
    }

    /// First meaningful line, without labels, quotes or markdown emphasis
    fn parse_name(&self, text: &str) -> String {
        let line = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();

        let line = self.label_prefix.replace(line, "");
        strip_quotes(line.trim_matches(|c: char| c == '*' || c == '#' || c == '_').trim())
            .trim_end_matches('.')
            .trim()
            .to_string()
    }

    /// Single paragraph with collapsed whitespace
    fn parse_text(&self, text: &str) -> String {
        let text = self.label_prefix.replace(text, "");
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        strip_quotes(&collapsed).to_string()
    }

    /// Inner markup only; bare prose becomes a paragraph
    fn parse_html(&self, text: &str) -> String {
        let text = self.sanitize_html(text);
        let text = text.trim();

        if text.is_empty() || text.starts_with('<') {
            return text.to_string();
        }

        text.split("\n\n")
            .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|p| !p.is_empty())
            .map(|p| format!("<p>{}</p>", p))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Keep only allowlisted tags, stripped of every attribute
    fn sanitize_html(&self, text: &str) -> String {
        let text = self.dropped_markup.replace_all(text, "");
        self.markup_tag
            .replace_all(&text, |caps: &Captures<'_>| {
                let name = caps[2].to_ascii_lowercase();
                if ALLOWED_TAGS.contains(&name.as_str()) {
                    format!("<{}{}>", &caps[1], name)
                } else {
                    String::new()
                }
            })
            .into_owned()
    }

    /// JSON array when present, else one entry per line or comma
    fn parse_list(&self, text: &str) -> Vec<String> {
        if let Some(items) = self.parse_json_list(text) {
            return items;
        }

        tracing::debug!("List response was not a JSON array, splitting lines");

        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let entries: Vec<String> = if lines.len() > 1 {
            lines.iter().map(|l| l.to_string()).collect()
        } else {
            text.split(',').map(str::to_string).collect()
        };

        entries
            .iter()
            .map(|entry| self.list_marker.replace(entry, ""))
            .map(|entry| {
                let entry = entry.trim().trim_end_matches(',');
                strip_quotes(entry.trim_start_matches('[').trim_end_matches(']')).to_string()
            })
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    fn parse_json_list(&self, text: &str) -> Option<Vec<String>> {
        let start = text.find('[')?;
        let end = text.rfind(']')?;
        if end <= start {
            return None;
        }

        let values: Vec<Value> = serde_json::from_str(&text[start..=end]).ok()?;
        let items: Vec<String> = values
            .iter()
            .filter_map(list_entry)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if items.is_empty() {
            None
        } else {
            Some(items)
        }
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Text of one JSON list entry; objects become `title: description`
fn list_entry(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            let title = ["name", "title", "item", "dish"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str));
            let detail = ["description", "text", "summary", "quote"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str));
            match (title, detail) {
                (Some(t), Some(d)) => Some(format!("{}: {}", t, d)),
                (Some(t), None) => Some(t.to_string()),
                (None, Some(d)) => Some(d.to_string()),
                (None, None) => None,
            }
        }
        _ => None,
    }
}

fn strip_quotes(text: &str) -> &str {
    let quotes: &[char] = &['"', '\'', '\u{201c}', '\u{201d}', '`'];
    let trimmed = text.trim();
    match (trimmed.chars().next(), trimmed.chars().last()) {
        (Some(first), Some(last)) if quotes.contains(&first) && quotes.contains(&last) => {
            trimmed.trim_matches(quotes).trim()
        }
        _ => trimmed,
    }
}
