//! Text codec for INI-style files.
//!
//! This module handles:
//! - Line-oriented parsing with a tolerant grammar
//! - Canonical rendering
//! - Character encodings for reading and writing

pub mod encoding;
pub mod parser;
pub mod render;

pub use encoding::TextEncoding;
pub use parser::{DEFAULT_SECTION, Line, SectionHeader, classify_line, parse_into};
pub use render::{TIMESTAMP_FORMAT, render_document};
