use std::fmt;

const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF16_BE: &[u8] = &[0xFE, 0xFF];

/// Character encoding used to read and write a config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
	#[default]
	Utf8,
	Utf16Le,
	Utf16Be,
	/// ISO-8859-1. Every byte maps to the code point of the same value.
	Latin1,
}

impl TextEncoding {
	pub fn as_str(&self) -> &'static str {
		match self {
			TextEncoding::Utf8 => "utf-8",
			TextEncoding::Utf16Le => "utf-16le",
			TextEncoding::Utf16Be => "utf-16be",
			TextEncoding::Latin1 => "latin-1",
		}
	}

	/// The encoding announced by a leading byte-order mark, if any.
	pub fn from_bom(bytes: &[u8]) -> Option<TextEncoding> {
		if bytes.starts_with(BOM_UTF8) {
			Some(TextEncoding::Utf8)
		} else if bytes.starts_with(BOM_UTF16_LE) {
			Some(TextEncoding::Utf16Le)
		} else if bytes.starts_with(BOM_UTF16_BE) {
			Some(TextEncoding::Utf16Be)
		} else {
			None
		}
	}

	/// Decode file contents, dropping a leading byte-order mark.
	///
	/// A byte-order mark takes precedence over `self`, so a UTF-16 file with
	/// a BOM reads correctly even when UTF-8 was requested.
	/// Returns `None` if the bytes are not valid in the chosen encoding.
	pub fn decode(&self, bytes: &[u8]) -> Option<String> {
		let encoding = TextEncoding::from_bom(bytes).unwrap_or(*self);

		match encoding {
			TextEncoding::Utf8 => {
				let bytes = bytes.strip_prefix(BOM_UTF8).unwrap_or(bytes);
				String::from_utf8(bytes.to_vec()).ok()
			}
			TextEncoding::Utf16Le => {
				let bytes = bytes.strip_prefix(BOM_UTF16_LE).unwrap_or(bytes);
				decode_utf16(bytes, u16::from_le_bytes)
			}
			TextEncoding::Utf16Be => {
				let bytes = bytes.strip_prefix(BOM_UTF16_BE).unwrap_or(bytes);
				decode_utf16(bytes, u16::from_be_bytes)
			}
			TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
		}
	}

	/// Encode text for writing.
	///
	/// UTF-16 output starts with its byte-order mark; UTF-8 output has none.
	/// Characters Latin-1 cannot represent are written as `?`.
	pub fn encode(&self, text: &str) -> Vec<u8> {
		match self {
			TextEncoding::Utf8 => text.as_bytes().to_vec(),
			TextEncoding::Utf16Le => {
				let mut out = BOM_UTF16_LE.to_vec();
				out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
				out
			}
			TextEncoding::Utf16Be => {
				let mut out = BOM_UTF16_BE.to_vec();
				out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
				out
			}
			TextEncoding::Latin1 => text
				.chars()
				.map(|c| u8::try_from(c).unwrap_or(b'?'))
				.collect(),
		}
	}
}

impl fmt::Display for TextEncoding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
	if bytes.len() % 2 != 0 {
		return None;
	}

	let units = bytes
		.chunks_exact(2)
		.map(|pair| to_unit([pair[0], pair[1]]));

	char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_is_utf8() {
		assert_eq!(TextEncoding::default(), TextEncoding::Utf8);
	}

	#[test]
	fn test_utf8_strips_bom() {
		let bytes = b"\xEF\xBB\xBFkey = v";
		assert_eq!(TextEncoding::Utf8.decode(bytes).unwrap(), "key = v");
	}

	#[test]
	fn test_utf8_rejects_invalid() {
		assert!(TextEncoding::Utf8.decode(&[0x66, 0xFF, 0x66]).is_none());
	}

	#[test]
	fn test_utf16le_round_trip() {
		let text = "[grüße]\nkey = ✓\n";
		let bytes = TextEncoding::Utf16Le.encode(text);
		assert!(bytes.starts_with(BOM_UTF16_LE));
		assert_eq!(TextEncoding::Utf16Le.decode(&bytes).unwrap(), text);
	}

	#[test]
	fn test_utf16be_round_trip() {
		let text = "a = b";
		let bytes = TextEncoding::Utf16Be.encode(text);
		assert_eq!(&bytes[..4], &[0xFE, 0xFF, 0x00, b'a']);
		assert_eq!(TextEncoding::Utf16Be.decode(&bytes).unwrap(), text);
	}

	#[test]
	fn test_utf16_rejects_odd_length_and_lone_surrogate() {
		assert!(TextEncoding::Utf16Le.decode(&[0x61, 0x00, 0x62]).is_none());
		// 0xD800 is a high surrogate with no low surrogate after it
		assert!(TextEncoding::Utf16Le.decode(&[0x00, 0xD8]).is_none());
	}

	#[test]
	fn test_from_bom() {
		assert_eq!(TextEncoding::from_bom(b"\xEF\xBB\xBFa"), Some(TextEncoding::Utf8));
		assert_eq!(TextEncoding::from_bom(&[0xFF, 0xFE, 0x61, 0x00]), Some(TextEncoding::Utf16Le));
		assert_eq!(TextEncoding::from_bom(&[0xFE, 0xFF, 0x00, 0x61]), Some(TextEncoding::Utf16Be));
		assert_eq!(TextEncoding::from_bom(b"[s]"), None);
	}

	#[test]
	fn test_bom_overrides_requested_encoding() {
		let text = "[s]\nkey = ✓\n";
		let le = TextEncoding::Utf16Le.encode(text);
		let be = TextEncoding::Utf16Be.encode(text);

		assert_eq!(TextEncoding::Utf8.decode(&le).unwrap(), text);
		assert_eq!(TextEncoding::Utf8.decode(&be).unwrap(), text);
		assert_eq!(TextEncoding::Latin1.decode(&le).unwrap(), text);
		assert_eq!(TextEncoding::Utf16Be.decode(&le).unwrap(), text);
	}

	#[test]
	fn test_latin1() {
		assert_eq!(TextEncoding::Latin1.decode(&[0x63, 0x61, 0x66, 0xE9]).unwrap(), "café");
		assert_eq!(TextEncoding::Latin1.encode("café ✓"), b"caf\xE9 ?".to_vec());
	}

	#[test]
	fn test_display() {
		assert_eq!(TextEncoding::Utf16Le.to_string(), "utf-16le");
	}
}
