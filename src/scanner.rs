//! TomDoc comment scanner: a line-by-line state machine.
//!
//! Tracks two independent states: where we are inside a TomDoc comment
//! ([`Phase`]) and whether we are inside an `@interface ... @end` block
//! ([`Structure`]). Comments inside a declaration are re-rendered in the target
//! dialect; comments outside one are copied through untouched.

use crate::classify::{self, Section};
use crate::model::{join_words, StructuredComment};
use crate::render::CommentRenderer;
use std::io::{self, Read, Write};
use std::mem;
use tracing::{debug, info, warn};

/// Per-run scanner settings.
#[derive(Debug, Default, Clone)]
pub struct ScanConfig {
    /// Name of the header being converted, for log messages
    pub source_name: Option<String>,
}

/// Position inside a TomDoc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Outside,
    /// Comment opened with blank lines only
    Shell,
    Brief,
    Detail,
    Param,
    Examples,
    Return,
}

/// Position relative to `@interface` / `@end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Structure {
    OutsideDecl,
    InsideDecl,
}

pub struct Scanner<'r> {
    renderer: &'r dyn CommentRenderer,
    phase: Phase,
    structure: Structure,
    comment: StructuredComment,
    /// Raw lines of the current comment, replayed when it sits outside a declaration
    raw: String,
}

impl<'r> Scanner<'r> {
    pub fn new(renderer: &'r dyn CommentRenderer) -> Self {
        Self {
            renderer,
            phase: Phase::Outside,
            structure: Structure::OutsideDecl,
            comment: StructuredComment::default(),
            raw: String::new(),
        }
    }

    /// Feed one source line (without its newline), appending any output to `out`.
    pub fn scan_line(&mut self, line: &str, out: &mut String) {
        let trimmed = line.trim();
        let content = match classify::comment_content(trimmed) {
            Some(content) => Some(content),
            None if trimmed.is_empty() && self.phase != Phase::Outside => Some(""),
            None => None,
        };

        match content {
            Some(content) => {
                self.phase = self.comment_line(content);
                self.raw.push_str(line);
                self.raw.push('\n');
            }
            None => self.structural_line(line, trimmed, out),
        }
    }

    /// Flush a comment still open at end of input.
    pub fn finish(&mut self, out: &mut String) {
        self.close_comment(out);
    }

    // -- Comment lines --------------------------------------------------------

    fn comment_line(&mut self, content: &str) -> Phase {
        match self.phase {
            Phase::Outside | Phase::Shell => self.on_start(content),
            Phase::Brief => self.on_brief(content),
            Phase::Detail => self.on_detail(content),
            Phase::Examples => self.on_examples(content),
            Phase::Param => self.on_param(content),
            Phase::Return => self.on_return(content),
        }
    }

    fn on_start(&mut self, content: &str) -> Phase {
        if content.is_empty() {
            return Phase::Shell;
        }
        if let Some(next) = self.open_section(content) {
            return next;
        }
        debug!(brief = content, "start of brief");
        join_words(&mut self.comment.brief, content);
        Phase::Brief
    }

    fn on_brief(&mut self, content: &str) -> Phase {
        if content.is_empty() {
            debug!("end of brief");
            return Phase::Detail;
        }
        join_words(&mut self.comment.brief, content);
        Phase::Brief
    }

    fn on_detail(&mut self, content: &str) -> Phase {
        if content.is_empty() {
            self.comment.detail.push('\n');
            return Phase::Detail;
        }
        if let Some(next) = self.open_section(content) {
            return next;
        }
        let separator = if classify::is_list_item(content) { '\n' } else { ' ' };
        self.comment.detail.push(separator);
        self.comment.detail.push_str(content);
        Phase::Detail
    }

    fn on_examples(&mut self, content: &str) -> Phase {
        if content.is_empty() {
            self.comment.examples.push('\n');
            return Phase::Examples;
        }
        if let Some(next) = self.open_section(content) {
            return next;
        }
        self.comment.examples.push('\n');
        self.comment.examples.push_str(content);
        Phase::Examples
    }

    fn on_param(&mut self, content: &str) -> Phase {
        if content.is_empty() {
            self.comment.finish_param();
            return Phase::Detail;
        }
        if let Some(next) = self.open_section(content) {
            return next;
        }
        self.comment.extend_param(content);
        Phase::Param
    }

    fn on_return(&mut self, content: &str) -> Phase {
        if content.is_empty() {
            return Phase::Detail;
        }
        join_words(&mut self.comment.returns, content);
        Phase::Return
    }

    /// Start a return, parameter or examples section if `content` opens one.
    fn open_section(&mut self, content: &str) -> Option<Phase> {
        let section = classify::detect_section(content)?;
        match section {
            Section::Return(desc) => {
                debug!(returns = desc, "start of return");
                self.comment.finish_param();
                self.comment.returns = desc.to_string();
                Some(Phase::Return)
            }
            Section::Param { name, description } => {
                debug!(param = name, description, "start of parameter");
                self.comment.start_param(name, description);
                Some(Phase::Param)
            }
            Section::Examples => {
                debug!("start of examples");
                self.comment.finish_param();
                self.comment.detail.push_str("\n**Examples**\n");
                Some(Phase::Examples)
            }
        }
    }

    // -- Non-comment lines ----------------------------------------------------

    fn structural_line(&mut self, line: &str, trimmed: &str, out: &mut String) {
        if let Some(name) = classify::declaration_start(trimmed) {
            debug!(name, "entering declaration");
            self.structure = Structure::InsideDecl;
            if self.phase == Phase::Outside {
                let text = format!("Documentation for {}", name);
                out.push_str(&self.renderer.single_line_comment(&text));
            }
        }

        self.close_comment(out);

        if classify::is_declaration_end(trimmed) && self.structure == Structure::InsideDecl {
            debug!("leaving declaration");
            self.structure = Structure::OutsideDecl;
        }

        out.push_str(line);
        out.push('\n');
    }

    fn close_comment(&mut self, out: &mut String) {
        if self.phase == Phase::Outside {
            return;
        }
        debug!(phase = ?self.phase, "leaving comment");

        self.comment.finish_param();
        let comment = mem::take(&mut self.comment);
        let raw = mem::take(&mut self.raw);
        self.phase = Phase::Outside;

        if !comment.has_content() {
            return;
        }
        match self.structure {
            Structure::InsideDecl => out.push_str(&self.renderer.render(&comment)),
            Structure::OutsideDecl => out.push_str(&raw),
        }
    }
}

/// Convert all of `input`, writing the result to `output`.
///
/// The whole input is read before anything is written, so a read failure
/// never leaves partial output behind.
pub fn process<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    renderer: &dyn CommentRenderer,
    config: &ScanConfig,
) -> io::Result<()> {
    if let Some(ref name) = config.source_name {
        info!("Parsing {}", name);
    }

    let mut source = Vec::new();
    input.read_to_end(&mut source)?;
    output.write_all(&convert_bytes(&source, renderer))?;
    output.flush()
}

/// Convert a header given as raw bytes.
///
/// Input that is not valid UTF-8 is read as Latin-1 and written back the same
/// way, so every byte outside a rendered comment comes out unchanged.
pub fn convert_bytes(source: &[u8], renderer: &dyn CommentRenderer) -> Vec<u8> {
    match std::str::from_utf8(source) {
        Ok(text) => convert(text, renderer).into_bytes(),
        Err(err) => {
            warn!(offset = err.valid_up_to(), "input is not UTF-8, reading it as Latin-1");
            let text: String = source.iter().map(|&b| char::from(b)).collect();
            // Rendered text is ASCII plus input characters, all below U+0100
            convert(&text, renderer)
                .chars()
                .map(|c| u8::try_from(c).unwrap_or(b'?'))
                .collect()
        }
    }
}

/// Convert an in-memory header.
pub fn convert(source: &str, renderer: &dyn CommentRenderer) -> String {
    let mut scanner = Scanner::new(renderer);
    let mut out = String::new();
    for line in source.lines() {
        scanner.scan_line(line, &mut out);
    }
    scanner.finish(&mut out);
    out
}
