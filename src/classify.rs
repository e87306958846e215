//! Line classification with regex checks over a single trimmed line.

use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:/\*\*?|//)\s*(.*)$").unwrap());

static RE_INTERFACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@interface\s+(\w+(?:\s*\(\w*\))?)").unwrap()
});

static RE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@end\b").unwrap());

static RE_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:returns?)\s+(.+)$").unwrap());

static RE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s+-\s+(.+)$").unwrap());

static RE_EXAMPLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:examples?):?$").unwrap());

static RE_LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*]|\d+\.)\s").unwrap());

// -- Section detection --------------------------------------------------------

/// A TomDoc section opened by a comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<'a> {
    /// `Returns <description>`
    Return(&'a str),
    /// `<name> - <description>`
    Param { name: &'a str, description: &'a str },
    /// `Examples:` header
    Examples,
}

/// Detect whether comment content opens a new section.
///
/// Checked in order return, parameter, examples; the first match wins, so
/// `Returns a - b` is a return line and never a parameter.
pub fn detect_section(content: &str) -> Option<Section<'_>> {
    if let Some(caps) = RE_RETURN.captures(content) {
        let desc = caps.get(1).map_or("", |m| m.as_str());
        return Some(Section::Return(desc));
    }
    if let Some(caps) = RE_PARAM.captures(content) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let description = caps.get(2).map_or("", |m| m.as_str());
        return Some(Section::Param { name, description });
    }
    if RE_EXAMPLES.is_match(content) {
        return Some(Section::Examples);
    }
    None
}

// -- Line predicates ----------------------------------------------------------

/// Content of a comment line with its `/**`, `/*` or `//` marker removed.
///
/// A `*/` closing a one-line block comment is dropped as well.
pub fn comment_content(line: &str) -> Option<&str> {
    let caps = RE_COMMENT.captures(line)?;
    let content = caps.get(1).map_or("", |m| m.as_str());
    Some(content.strip_suffix("*/").map_or(content, str::trim_end))
}

/// Name of the class (or `Class (Category)`) declared by an `@interface` line.
pub fn declaration_start(line: &str) -> Option<&str> {
    RE_INTERFACE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn is_declaration_end(line: &str) -> bool {
    RE_END.is_match(line)
}

pub fn is_list_item(content: &str) -> bool {
    RE_LIST_ITEM.is_match(content)
}
