//! Renderer module: trait-based comment dialect dispatch.

pub mod appledoc;
pub mod doxygen;

use crate::model::StructuredComment;
use std::borrow::Cow;

/// Target comment dialect selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Doxygen,
    Appledoc,
}

/// Trait for rendering a StructuredComment into a target comment syntax.
pub trait CommentRenderer {
    /// Full comment block for `comment`, newline-terminated. Empty when the
    /// comment has no content.
    fn render(&self, comment: &StructuredComment) -> String;

    /// One-line comment holding `content`, newline-terminated.
    fn single_line_comment(&self, content: &str) -> String;
}

/// Create a renderer for the given dialect.
///
/// `class_prefix` turns on Appledoc cross-reference rewriting; Doxygen ignores it.
pub fn create_renderer(dialect: Dialect, class_prefix: Option<&str>) -> Box<dyn CommentRenderer> {
    match dialect {
        Dialect::Doxygen => Box::new(doxygen::DoxygenRenderer),
        Dialect::Appledoc => Box::new(appledoc::AppledocRenderer::new(class_prefix)),
    }
}

/// Brief to render: the comment's own, or one derived from the first sentence
/// of its return description.
pub(crate) fn effective_brief(comment: &StructuredComment) -> Cow<'_, str> {
    if !comment.has_brief() && comment.has_return() {
        let sentence = comment.returns.split('.').next().unwrap_or_default();
        return Cow::Owned(format!("Returns {}", sentence));
    }
    Cow::Borrowed(comment.brief.trim())
}

/// Detail paragraphs, one per `\n`-separated segment, trimmed and non-empty.
pub(crate) fn detail_paragraphs(detail: &str) -> impl Iterator<Item = &str> {
    detail.split('\n').map(str::trim).filter(|p| !p.is_empty())
}

/// Example lines with surrounding blank lines removed.
pub(crate) fn example_lines(examples: &str) -> impl Iterator<Item = &str> {
    examples.trim_matches('\n').split('\n')
}
