use crate::codec::TextEncoding;
use std::path::PathBuf;

/// Library-level structured errors for ini-doc.
///
/// These are faults. Expected outcomes such as "section already exists" or
/// "entry not found" are reported through `bool` and `Option` instead.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum IniError {
	#[error("Cannot read config file: {path}")]
	ReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Config file is not valid {encoding}: {path}")]
	DecodeError {
		path: PathBuf,
		encoding: TextEncoding,
	},

	#[error("Failed to write config file: {path}")]
	WriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Config has no bound path to save to")]
	NoPath,

	#[error("Section not found: {section}")]
	SectionNotFound { section: String },

	#[error("Entry not found: [{section}] {entry}")]
	EntryNotFound { section: String, entry: String },

	#[error("Invalid regex pattern: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}

/// Result type alias using IniError.
pub type Result<T> = std::result::Result<T, IniError>;
