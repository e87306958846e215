//! Appledoc comment renderer.
//!
//! Emits `/** ... */` blocks with `@param`/`@return` directives. Example code is
//! indented with a tab so appledoc's markdown treats it as a code block.

use crate::model::StructuredComment;
use crate::render::{detail_paragraphs, effective_brief, example_lines, CommentRenderer};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// `[RACSignal return:]`-style selector references
static RE_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\[[\w :+\-]+\])").unwrap());

pub struct AppledocRenderer {
    /// Matches class names carrying the project prefix, when cross-references are on
    class_re: Option<Regex>,
}

impl AppledocRenderer {
    pub fn new(class_prefix: Option<&str>) -> Self {
        let class_re = class_prefix
            .filter(|p| !p.is_empty())
            .and_then(|p| Regex::new(&format!(r"(\s)({}\w+)\b", regex::escape(p))).ok());
        Self { class_re }
    }

    /// Rewrite symbol references so appledoc can link them.
    ///
    /// Selectors and prefixed class names need whitespace on both sides for
    /// appledoc to detect them. No-op without a class prefix.
    fn add_crossrefs<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let Some(ref class_re) = self.class_re else {
            return Cow::Borrowed(text);
        };
        let padded = RE_SELECTOR.replace_all(text, " $1 ");
        let linked = class_re.replace_all(&padded, "$1$2 ").into_owned();
        Cow::Owned(linked)
    }
}

impl CommentRenderer for AppledocRenderer {
    fn render(&self, comment: &StructuredComment) -> String {
        let mut output = String::new();
        if !comment.has_content() {
            return output;
        }

        output.push_str("/**");
        let brief = effective_brief(comment);
        if !brief.is_empty() {
            output.push(' ');
            output.push_str(&self.add_crossrefs(&brief));
        }

        if !comment.has_non_brief_content() {
            output.push_str(" */\n");
            return output;
        }

        output.push_str("\n *\n");
        let detail = self.add_crossrefs(&comment.detail);
        for paragraph in detail_paragraphs(&detail) {
            output.push_str(&format!(" *  {}\n *\n", paragraph));
        }
        if comment.has_examples() {
            for line in example_lines(&comment.examples) {
                output.push_str(&format!(" *\t{}\n", line));
            }
            output.push_str(" *\n");
        }
        for (name, desc) in &comment.params {
            output.push_str(&format!(
                " *  @param {} {}\n *\n",
                name,
                self.add_crossrefs(desc)
            ));
        }
        if comment.has_return() {
            output.push_str(&format!(
                " *  @return {}\n",
                self.add_crossrefs(&comment.returns)
            ));
        }
        output.push_str(" */\n");
        output
    }

    fn single_line_comment(&self, content: &str) -> String {
        format!("/** {} */\n", content)
    }
}
