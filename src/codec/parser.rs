use crate::document::Document;
use crate::error::{IniError, Result};
use regex::Regex;

/// Section that holds entries appearing before the first `[header]`.
pub const DEFAULT_SECTION: &str = "default";

/// Whole-line section header, matched after spaces and tabs are removed.
const SECTION_HEADER_PATTERN: &str = r"^\[(?P<section>[\w\-.]+)\]$";

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
	/// `key = value`. The key has all blanks removed; the value only leading ones.
	Entry { key: String, value: &'a str },

	/// `[name]`.
	Section(String),

	/// Comment, blank, or anything the grammar does not recognize.
	Ignored,
}

/// Compiled matcher for `[name]` section headers.
#[derive(Debug)]
pub struct SectionHeader {
	regex: Regex,
}

impl SectionHeader {
	pub fn new() -> Result<Self> {
		Ok(SectionHeader {
			regex: compile_regex(SECTION_HEADER_PATTERN)?,
		})
	}

	/// The section name if `stripped` is exactly one header.
	pub fn name<'a>(&self, stripped: &'a str) -> Option<&'a str> {
		self.regex
			.captures(stripped)
			.and_then(|caps| caps.name("section"))
			.map(|m| m.as_str())
	}
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| IniError::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})
}

/// Remove every space and tab.
fn strip_blanks(text: &str) -> String {
	text.chars().filter(|c| !matches!(c, ' ' | '\t')).collect()
}

/// Split on `\n`, `\r\n` or a lone `\r`.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
	text.split('\n')
		.flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Classify one line of input.
///
/// Only lines containing `=` or `[` are candidates. A candidate whose
/// blank-stripped form starts with `#` or `//` is a comment. A line with `=`
/// is an entry split at the first `=`; otherwise it must be a whole-line
/// `[name]` header. Malformed lines are ignored, never rejected.
pub fn classify_line<'a>(line: &'a str, header: &SectionHeader) -> Line<'a> {
	if !line.contains(['=', '[']) {
		return Line::Ignored;
	}

	let stripped = strip_blanks(line);
	if stripped.starts_with('#') || stripped.starts_with("//") {
		return Line::Ignored;
	}

	if let Some((key, value)) = line.split_once('=') {
		return Line::Entry {
			key: strip_blanks(key),
			value: value.trim_start_matches([' ', '\t']),
		};
	}

	match header.name(&stripped) {
		Some(name) => Line::Section(name.to_string()),
		None => Line::Ignored,
	}
}

/// Parse `text` into `doc`, adding sections and entries as they appear.
///
/// Duplicate sections and entries are dropped; the first occurrence wins.
pub fn parse_into(doc: &mut Document, text: &str) -> Result<()> {
	let header = SectionHeader::new()?;
	let mut current = DEFAULT_SECTION.to_string();

	for (number, line) in split_lines(text).enumerate() {
		match classify_line(line, &header) {
			Line::Entry { key, value } => {
				if !doc.add_entry(&current, &key, value) {
					tracing::trace!(line = number + 1, %key, "duplicate entry dropped");
				}
			}
			Line::Section(name) => {
				doc.add_section(&name);
				current = name;
			}
			Line::Ignored => {
				if !line.trim().is_empty() {
					tracing::trace!(line = number + 1, "ignored line");
				}
			}
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(text: &str) -> Document {
		Document::parse_str(text).unwrap()
	}

	#[test]
	fn test_compile_section_header() {
		assert!(SectionHeader::new().is_ok());
	}

	#[test]
	fn test_compile_invalid_regex() {
		let result = compile_regex(r"[invalid");
		match result.unwrap_err() {
			IniError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[invalid"),
			other => panic!("Expected InvalidPattern error, got {other:?}"),
		}
	}

	#[test]
	fn test_header_names() {
		let header = SectionHeader::new().unwrap();
		assert_eq!(header.name("[login]"), Some("login"));
		assert_eq!(header.name("[my-app.v2_x]"), Some("my-app.v2_x"));
		assert_eq!(header.name("[]"), None);
		assert_eq!(header.name("[a]b"), None);
		assert_eq!(header.name("[a/b]"), None);
		assert_eq!(header.name("x[a]"), None);
	}

	#[test]
	fn test_classify_entry() {
		let header = SectionHeader::new().unwrap();
		assert_eq!(
			classify_line(" user name\t=  par0noid ", &header),
			Line::Entry {
				key: "username".to_string(),
				value: "par0noid ",
			}
		);
	}

	#[test]
	fn test_classify_section_with_inner_blanks() {
		let header = SectionHeader::new().unwrap();
		assert_eq!(
			classify_line("  [ Login ]\t", &header),
			Line::Section("Login".to_string())
		);
	}

	#[test]
	fn test_classify_ignored() {
		let header = SectionHeader::new().unwrap();
		assert_eq!(classify_line("", &header), Line::Ignored);
		assert_eq!(classify_line("just text", &header), Line::Ignored);
		assert_eq!(classify_line("[broken", &header), Line::Ignored);
		assert_eq!(classify_line("  # [Foo]", &header), Line::Ignored);
		assert_eq!(classify_line("// key = 1", &header), Line::Ignored);
		assert_eq!(classify_line("\t/ / key = 1", &header), Line::Ignored);
	}

	#[test]
	fn test_value_containing_equals() {
		let doc = parse("[s]\nkey = a=b=c\n");
		assert_eq!(doc.entry("s", "key").unwrap().value(), "a=b=c");
	}

	#[test]
	fn test_value_keeps_trailing_and_inner_spacing() {
		let doc = parse("[s]\nkey =\t a  b \n");
		assert_eq!(doc.entry("s", "key").unwrap().value(), "a  b ");
	}

	#[test]
	fn test_empty_value() {
		let doc = parse("[s]\nkey =\n");
		assert_eq!(doc.entry("s", "key").unwrap().value(), "");
	}

	#[test]
	fn test_comments_never_create_anything() {
		let doc = parse("  # [Foo]\n// key = 1\n#x=y\n");
		assert!(doc.is_empty());
	}

	#[test]
	fn test_default_section() {
		let doc = parse("key = 1\n[other]\nx = 2\n");
		assert_eq!(doc.section_at(0).unwrap().name(), "default");
		assert_eq!(doc.entry("default", "key").unwrap().to_i32(), 1);
		assert_eq!(doc.entry("other", "x").unwrap().to_i32(), 2);
	}

	#[test]
	fn test_no_default_section_without_top_level_entries() {
		let doc = parse("[only]\nx = 1\n");
		assert_eq!(doc.len(), 1);
		assert!(!doc.has_section("default"));
	}

	#[test]
	fn test_duplicate_entry_first_wins() {
		let doc = parse("[s]\nkey = first\nKEY = second\n");
		assert_eq!(doc.section("s").unwrap().len(), 1);
		assert_eq!(doc.entry("s", "key").unwrap().value(), "first");
	}

	#[test]
	fn test_repeated_section_header_merges() {
		let doc = parse("[a]\nx = 1\n[b]\ny = 2\n[A]\nz = 3\n");
		assert_eq!(doc.len(), 2);
		assert_eq!(doc.section("a").unwrap().len(), 2);
		assert!(doc.has_entry("a", "z"));
	}

	#[test]
	fn test_malformed_header_keeps_current_section() {
		let doc = parse("[a]\n[bad header!]\nx = 1\n");
		assert_eq!(doc.len(), 1);
		assert!(doc.has_entry("a", "x"));
	}

	#[test]
	fn test_line_endings() {
		let doc = parse("[a]\r\nx = 1\r\ny = 2\rz = 3");
		assert_eq!(doc.entry("a", "x").unwrap().value(), "1");
		assert_eq!(doc.entry("a", "y").unwrap().value(), "2");
		assert_eq!(doc.entry("a", "z").unwrap().value(), "3");
	}

	#[test]
	fn test_entry_preserves_order() {
		let doc = parse("[s]\nzeta = 1\nalpha = 2\n");
		let section = doc.section("s").unwrap();
		assert_eq!(section.entry_at(0).unwrap().name(), "zeta");
		assert_eq!(section.entry_at(1).unwrap().name(), "alpha");
	}
}
