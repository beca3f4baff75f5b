//! The in-memory configuration model.
//!
//! A [`Document`] owns an ordered list of [`Section`]s, each owning an
//! ordered list of [`Entry`]s. Names are compared case-insensitively through
//! [`normalize_name`]. Lookups never create anything.
//!
//! A document has no internal synchronization. Sharing one across threads
//! for mutation is unsupported; callers must serialize access themselves.

pub mod entry;
pub mod name;
pub mod section;

pub use entry::Entry;
pub use name::normalize_name;
pub use section::Section;

use crate::codec::{TextEncoding, parser, render};
use crate::document::name::name_matches;
use crate::error::{IniError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// A whole INI-style configuration, optionally bound to a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
	sections: Vec<Section>,
	encoding: TextEncoding,
	path: Option<PathBuf>,
}

impl Document {
	/// An empty, unbound document using UTF-8.
	pub fn new() -> Self {
		Self::default()
	}

	/// Read and parse `path` as UTF-8, binding the document to it.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		Self::load_with_encoding(path, TextEncoding::default())
	}

	/// Read and parse `path` in the given encoding, binding the document to it.
	pub fn load_with_encoding(path: impl AsRef<Path>, encoding: TextEncoding) -> Result<Self> {
		let path = path.as_ref();
		let bytes = std::fs::read(path).map_err(|source| IniError::ReadError {
			path: path.to_path_buf(),
			source,
		})?;

		let text = encoding.decode(&bytes).ok_or_else(|| IniError::DecodeError {
			path: path.to_path_buf(),
			encoding,
		})?;

		let mut doc = Self::parse_str(&text)?;
		doc.encoding = encoding;
		doc.path = Some(path.to_path_buf());

		tracing::debug!(
			path = %path.display(),
			%encoding,
			sections = doc.len(),
			"loaded config"
		);

		Ok(doc)
	}

	/// Parse in-memory text into an unbound document.
	pub fn parse_str(text: &str) -> Result<Self> {
		let mut doc = Self::new();
		parser::parse_into(&mut doc, text)?;
		Ok(doc)
	}

	/// The bound file path, if any.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// Change the encoding used by the next save.
	pub fn set_encoding(&mut self, encoding: TextEncoding) {
		self.encoding = encoding;
	}

	/// Number of sections.
	pub fn len(&self) -> usize {
		self.sections.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}

	/// Iterate over sections in insertion order.
	pub fn sections(&self) -> std::slice::Iter<'_, Section> {
		self.sections.iter()
	}

	/// Add an empty section. Returns `false` if it already exists.
	pub fn add_section(&mut self, name: &str) -> bool {
		if self.has_section(name) {
			return false;
		}

		self.sections.push(Section::new(name));
		true
	}

	/// Add an entry, creating its section first if needed.
	///
	/// Returns `false` and changes nothing if the entry already exists.
	pub fn add_entry(&mut self, section: &str, entry: &str, value: impl fmt::Display) -> bool {
		if let Some(existing) = self.section_mut(section) {
			return existing.add(entry, value);
		}

		let mut created = Section::new(section);
		created.add(entry, value);
		self.sections.push(created);
		true
	}

	/// Overwrite an existing entry's value.
	///
	/// Faults with [`IniError::SectionNotFound`] or [`IniError::EntryNotFound`]
	/// rather than creating anything.
	pub fn set_entry(&mut self, section: &str, entry: &str, value: impl fmt::Display) -> Result<()> {
		self.section_mut(section)
			.ok_or_else(|| IniError::SectionNotFound {
				section: normalize_name(section),
			})?
			.set(entry, value)
	}

	/// Remove a section and all of its entries. Returns `false` if absent.
	pub fn delete_section(&mut self, name: &str) -> bool {
		match self.position(name) {
			Some(index) => {
				self.sections.remove(index);
				true
			}
			None => false,
		}
	}

	/// Rename a section, keeping its position and entries.
	///
	/// Returns `false` if `from` does not exist or `to` names a different
	/// existing section.
	pub fn rename_section(&mut self, from: &str, to: &str) -> bool {
		let Some(index) = self.position(from) else {
			return false;
		};

		if self.position(to).is_some_and(|other| other != index) {
			return false;
		}

		self.sections[index].set_name(to);
		true
	}

	pub fn has_section(&self, name: &str) -> bool {
		self.position(name).is_some()
	}

	/// False when either the section or the entry is missing.
	pub fn has_entry(&self, section: &str, entry: &str) -> bool {
		self.section(section).is_some_and(|s| s.has_entry(entry))
	}

	/// Look up a section by name.
	pub fn section(&self, name: &str) -> Option<&Section> {
		self.sections.iter().find(|s| name_matches(s.name(), name))
	}

	pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
		self.sections.iter_mut().find(|s| name_matches(s.name(), name))
	}

	/// Look up a section by 0-based position.
	pub fn section_at(&self, index: usize) -> Option<&Section> {
		self.sections.get(index)
	}

	pub fn section_at_mut(&mut self, index: usize) -> Option<&mut Section> {
		self.sections.get_mut(index)
	}

	/// Look up an entry by section and entry name.
	pub fn entry(&self, section: &str, entry: &str) -> Option<&Entry> {
		self.section(section).and_then(|s| s.entry(entry))
	}

	/// Write to the bound path. Returns `false` on any failure.
	pub fn save(&self) -> bool {
		match self.try_save() {
			Ok(()) => true,
			Err(e) => {
				tracing::warn!(error = %e, "failed to save config");
				false
			}
		}
	}

	/// Rebind to `path`, then write. Returns `false` on any failure.
	pub fn save_as(&mut self, path: impl AsRef<Path>) -> bool {
		self.path = Some(path.as_ref().to_path_buf());
		self.save()
	}

	/// Write to the bound path, reporting why it failed.
	pub fn try_save(&self) -> Result<()> {
		let path = self.path.as_deref().ok_or(IniError::NoPath)?;
		let bytes = self.encoding.encode(&self.render());

		std::fs::write(path, bytes).map_err(|source| IniError::WriteError {
			path: path.to_path_buf(),
			source,
		})?;

		tracing::debug!(
			path = %path.display(),
			encoding = %self.encoding,
			sections = self.len(),
			"saved config"
		);

		Ok(())
	}

	/// Rebind to `path`, then behave as [`Document::try_save`].
	pub fn try_save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
		self.path = Some(path.as_ref().to_path_buf());
		self.try_save()
	}

	/// The canonical text form, headed by a timestamp comment in local time.
	pub fn render(&self) -> String {
		render::render_document(self, chrono::Local::now().naive_local())
	}

	fn position(&self, name: &str) -> Option<usize> {
		self.sections.iter().position(|s| name_matches(s.name(), name))
	}
}

impl fmt::Display for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

impl<'a> IntoIterator for &'a Document {
	type Item = &'a Section;
	type IntoIter = std::slice::Iter<'a, Section>;

	fn into_iter(self) -> Self::IntoIter {
		self.sections.iter()
	}
}
