//! Doxygen comment renderer.
//!
//! Brief goes on a `//!` line; everything else goes into a `/*! ... */` block
//! using `\code`, `\param` and `\return` commands.

use crate::model::StructuredComment;
use crate::render::{detail_paragraphs, effective_brief, example_lines, CommentRenderer};

pub struct DoxygenRenderer;

impl CommentRenderer for DoxygenRenderer {
    fn render(&self, comment: &StructuredComment) -> String {
        let mut output = String::new();
        if !comment.has_content() {
            return output;
        }

        let brief = effective_brief(comment);
        if !brief.is_empty() {
            output.push_str(&format!("//! {}", brief));
        }

        if comment.has_non_brief_content() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str("/*!\n");
            for paragraph in detail_paragraphs(&comment.detail) {
                output.push_str(&format!(" *  {}\n *\n", paragraph));
            }
            if comment.has_examples() {
                output.push_str(" * \\code\n");
                for line in example_lines(&comment.examples) {
                    output.push_str(&format!(" * {}\n", line));
                }
                output.push_str(" * \\endcode\n");
            }
            for (name, desc) in &comment.params {
                output.push_str(&format!(" *  \\param {} {}\n *\n", name, desc));
            }
            if comment.has_return() {
                output.push_str(&format!(" *  \\return {}\n", comment.returns));
            }
            output.push_str(" */");
        }

        output.push('\n');
        output
    }

    fn single_line_comment(&self, content: &str) -> String {
        format!("//! {}\n", content)
    }
}
