use crate::document::Document;
use chrono::NaiveDateTime;

/// Format of the timestamp in the leading `# Saved (...)` comment.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render `doc` in canonical form, stamped with `saved_at`.
///
/// ```text
/// # Saved (2018-05-17 13:45:10)
///
/// [section]
///
/// name = value
/// ```
pub fn render_document(doc: &Document, saved_at: NaiveDateTime) -> String {
	let mut out = format!("# Saved ({})\n", saved_at.format(TIMESTAMP_FORMAT));

	for section in doc {
		out.push_str(&format!("\n[{}]\n\n", section.name()));

		for entry in section {
			out.push_str(&format!("{} = {}\n", entry.name(), entry.value()));
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn stamp() -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2018, 5, 17)
			.unwrap()
			.and_hms_opt(13, 45, 10)
			.unwrap()
	}

	#[test]
	fn test_render_empty() {
		let doc = Document::new();
		assert_eq!(render_document(&doc, stamp()), "# Saved (2018-05-17 13:45:10)\n");
	}

	#[test]
	fn test_render_layout() {
		let mut doc = Document::new();
		doc.add_entry("Login", "Username", "par0noid");
		doc.add_entry("Login", "Password", "secret");
		doc.add_entry("Windows", "Trayicon", "on");
		doc.add_section("Empty");

		let expected = "\
# Saved (2018-05-17 13:45:10)

[login]

username = par0noid
password = secret

[windows]

trayicon = on

[empty]

";
		assert_eq!(render_document(&doc, stamp()), expected);
	}

	#[test]
	fn test_render_entries_without_blank_lines_between() {
		let mut doc = Document::new();
		doc.add_entry("s", "a", "1");
		doc.add_entry("s", "b", "");
		doc.add_entry("s", "c", "x = y");

		assert_eq!(
			render_document(&doc, stamp()),
			"# Saved (2018-05-17 13:45:10)\n\n[s]\n\na = 1\nb = \nc = x = y\n"
		);
	}

	#[test]
	fn test_render_then_parse_round_trip() {
		let mut doc = Document::new();
		doc.add_entry("a", "x", "1");
		doc.add_entry("a", "eq", "k=v");
		doc.add_entry("b.c", "flag", "on");

		let reparsed = Document::parse_str(&render_document(&doc, stamp())).unwrap();
		assert_eq!(reparsed, doc);
	}
}
