//! ini-doc - in-memory model and text codec for INI-style configuration files.
//!
//! This library provides:
//! - A [`Document`] of named [`Section`]s holding named [`Entry`]s
//! - Case-insensitive names and insertion-ordered contents
//! - A tolerant line-oriented parser and a canonical renderer
//! - Typed "parse or default" views over stored text values
//!
//! # Example
//!
//! ```no_run
//! use ini_doc::Document;
//!
//! let mut config = Document::new();
//! config.add_entry("Login", "Username", "par0noid");
//! config.add_entry("Windows", "Trayicon", "on");
//!
//! if config.entry("windows", "trayicon").is_some_and(|e| e.to_bool()) {
//!     println!("trayicon enabled");
//! }
//!
//! if !config.save_as("Config.ini") {
//!     eprintln!("could not save");
//! }
//! ```

pub mod codec;
pub mod document;
pub mod error;

pub use codec::TextEncoding;
pub use document::{Document, Entry, Section, normalize_name};
pub use error::{IniError, Result};
