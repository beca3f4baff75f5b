use crate::document::entry::Entry;
use crate::document::name::{name_matches, normalize_name};
use crate::error::{IniError, Result};
use std::fmt;

/// A named group of entries, written as a `[name]` header in the file.
///
/// Entries keep insertion order. Entry names are unique case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
	name: String,
	entries: Vec<Entry>,
}

impl Section {
	/// Create an empty section. The name is normalized.
	pub fn new(name: &str) -> Self {
		Section {
			name: normalize_name(name),
			entries: Vec::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub(crate) fn set_name(&mut self, name: &str) {
		self.name = normalize_name(name);
	}

	/// Number of entries in this section.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate over entries in insertion order.
	pub fn entries(&self) -> std::slice::Iter<'_, Entry> {
		self.entries.iter()
	}

	/// Add an entry.
	///
	/// Returns `false` and leaves the section unchanged if an entry with the
	/// same name already exists.
	pub fn add(&mut self, name: &str, value: impl fmt::Display) -> bool {
		if self.has_entry(name) {
			return false;
		}

		self.entries.push(Entry::new(name, value));
		true
	}

	/// Overwrite the value of an existing entry.
	///
	/// Unlike [`Section::add`], a missing entry is a fault: this returns
	/// [`IniError::EntryNotFound`] instead of creating it.
	pub fn set(&mut self, name: &str, value: impl fmt::Display) -> Result<()> {
		match self.entry_mut(name) {
			Some(entry) => {
				entry.set_value(value);
				Ok(())
			}
			None => Err(IniError::EntryNotFound {
				section: self.name.clone(),
				entry: normalize_name(name),
			}),
		}
	}

	/// Remove an entry. Returns `false` if it did not exist.
	pub fn delete(&mut self, name: &str) -> bool {
		match self.position(name) {
			Some(index) => {
				self.entries.remove(index);
				true
			}
			None => false,
		}
	}

	/// Rename an entry, keeping its position and value.
	///
	/// Returns `false` if `from` does not exist or `to` names a different
	/// existing entry.
	pub fn rename_entry(&mut self, from: &str, to: &str) -> bool {
		let Some(index) = self.position(from) else {
			return false;
		};

		if self.position(to).is_some_and(|other| other != index) {
			return false;
		}

		self.entries[index].set_name(to);
		true
	}

	pub fn has_entry(&self, name: &str) -> bool {
		self.position(name).is_some()
	}

	/// Look up an entry by name.
	pub fn entry(&self, name: &str) -> Option<&Entry> {
		self.entries.iter().find(|e| name_matches(e.name(), name))
	}

	pub fn entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
		self.entries.iter_mut().find(|e| name_matches(e.name(), name))
	}

	/// Look up an entry by 0-based position.
	pub fn entry_at(&self, index: usize) -> Option<&Entry> {
		self.entries.get(index)
	}

	fn position(&self, name: &str) -> Option<usize> {
		self.entries.iter().position(|e| name_matches(e.name(), name))
	}
}

impl<'a> IntoIterator for &'a Section {
	type Item = &'a Entry;
	type IntoIter = std::slice::Iter<'a, Entry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
