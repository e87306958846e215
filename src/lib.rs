//! Convert TomDoc comments in Objective-C headers to Doxygen or Appledoc.
//!
//! The [`scanner`] walks a header line by line, collecting each TomDoc comment
//! into a [`model::StructuredComment`] and handing it to a
//! [`render::CommentRenderer`] when the comment belongs to an `@interface`.
//! Everything else is copied through unchanged.

pub mod classify;
pub mod model;
pub mod render;
pub mod scanner;
