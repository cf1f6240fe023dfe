//! Long option dispatch for small command line tools, plus the Markdown to
//! HTML plumbing of the `mdconv` binary.

pub mod args;
pub mod errors;
pub mod render;
