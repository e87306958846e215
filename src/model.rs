//! Data model for one TomDoc comment block, independent of output format.

/// Structured content of a single TomDoc comment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StructuredComment {
    /// First sentence(s), up to the first blank comment line
    pub brief: String,
    /// Prose paragraphs separated by `\n`
    pub detail: String,
    /// `name - description` entries in first-appearance order
    pub params: Vec<(String, String)>,
    /// `Returns ...` text
    pub returns: String,
    /// Lines following an `Examples` header, each prefixed with `\n`
    pub examples: String,
    /// Parameter still accumulating continuation lines
    pub(crate) pending: Option<(String, String)>,
}

impl StructuredComment {
    pub fn has_brief(&self) -> bool {
        !self.brief.is_empty()
    }

    pub fn has_detail(&self) -> bool {
        !self.detail.is_empty()
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    pub fn has_return(&self) -> bool {
        !self.returns.is_empty()
    }

    pub fn has_examples(&self) -> bool {
        !self.examples.is_empty()
    }

    pub fn has_non_brief_content(&self) -> bool {
        self.has_detail() || self.has_params() || self.has_examples() || self.has_return()
    }

    pub fn has_content(&self) -> bool {
        self.has_brief() || self.has_non_brief_content()
    }

    /// Commit the pending parameter, if any, and start a new one.
    pub fn start_param(&mut self, name: &str, description: &str) {
        self.finish_param();
        self.pending = Some((name.to_string(), description.to_string()));
    }

    /// Append a continuation line to the pending parameter's description.
    pub fn extend_param(&mut self, text: &str) {
        if let Some((_, desc)) = &mut self.pending {
            join_words(desc, text);
        }
    }

    /// Commit the pending parameter into `params`.
    ///
    /// A repeated name overwrites the earlier description but keeps its position.
    pub fn finish_param(&mut self) {
        let Some((name, desc)) = self.pending.take() else {
            return;
        };
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = desc,
            None => self.params.push((name, desc)),
        }
    }

    #[cfg(test)]
    pub(crate) fn has_pending_param(&self) -> bool {
        self.pending.is_some()
    }
}

/// Space-join `text` onto `dest`, without a leading space on the first word.
pub fn join_words(dest: &mut String, text: &str) {
    if !dest.is_empty() {
        dest.push(' ');
    }
    dest.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_comment_has_no_content() {
        let comment = StructuredComment::default();
        assert!(!comment.has_content());
        assert!(!comment.has_non_brief_content());
    }

    #[test]
    fn brief_only_is_content_but_not_non_brief() {
        let comment = StructuredComment {
            brief: "Does a thing.".to_string(),
            ..Default::default()
        };
        assert!(comment.has_content());
        assert!(!comment.has_non_brief_content());
    }

    #[test]
    fn pending_param_is_not_content_until_finished() {
        let mut comment = StructuredComment::default();
        comment.start_param("value", "The value");
        assert!(!comment.has_params());
        comment.extend_param("to send.");
        comment.finish_param();
        assert_eq!(
            comment.params,
            vec![("value".to_string(), "The value to send.".to_string())]
        );
        assert!(!comment.has_pending_param());
    }

    #[test]
    fn finish_param_twice_commits_once() {
        let mut comment = StructuredComment::default();
        comment.start_param("a", "first");
        comment.finish_param();
        comment.finish_param();
        assert_eq!(comment.params.len(), 1);
    }

    #[test]
    fn start_param_commits_previous() {
        let mut comment = StructuredComment::default();
        comment.start_param("a", "first");
        comment.start_param("b", "second");
        comment.finish_param();
        let names: Vec<&str> = comment.params.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn duplicate_param_overwrites_in_place() {
        let mut comment = StructuredComment::default();
        comment.start_param("a", "first");
        comment.start_param("b", "second");
        comment.start_param("a", "again");
        comment.finish_param();
        assert_eq!(
            comment.params,
            vec![
                ("a".to_string(), "again".to_string()),
                ("b".to_string(), "second".to_string()),
            ]
        );
    }

    #[test]
    fn join_words_skips_leading_space() {
        let mut text = String::new();
        join_words(&mut text, "one");
        join_words(&mut text, "two");
        assert_eq!(text, "one two");
    }
}
