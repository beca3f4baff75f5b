/// Normalize a section or entry name for storage and comparison.
///
/// Every name-based lookup and every write of a name goes through here, so
/// two names are the same if and only if their normalized forms are equal.
pub fn normalize_name(name: &str) -> String {
	name.to_lowercase()
}

/// Compare a stored (already normalized) name against a caller-supplied one.
pub(crate) fn name_matches(stored: &str, candidate: &str) -> bool {
	stored == normalize_name(candidate)
}
