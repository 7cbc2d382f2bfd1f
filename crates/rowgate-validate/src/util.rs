//! Utility types for validation.

use std::collections::HashMap;

/// Column lookup keyed by trimmed lower-case name, preserving the
/// trimmed original spelling and the column position.
#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveSet {
    /// Maps normalized name -> (original name, index)
    inner: HashMap<String, (String, usize)>,
}

/// Normalization used for lookups: trim, then lower-case.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl CaseInsensitiveSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Insert a column name at `index`.
    ///
    /// Returns the original name already registered under the same key, if any;
    /// the existing entry is kept in that case.
    pub fn insert(&mut self, name: &str, index: usize) -> Option<&str> {
        let key = normalize_key(name);
        if self.inner.contains_key(&key) {
            return self.inner.get(&key).map(|(original, _)| original.as_str());
        }
        self.inner.insert(key, (name.trim().to_string(), index));
        None
    }

    /// Check if the set contains a name (case-insensitive, whitespace-trimmed).
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.inner.contains_key(&normalize_key(name.as_ref()))
    }

    /// Get the original name and position for a name.
    pub fn get(&self, name: impl AsRef<str>) -> Option<(&str, usize)> {
        self.inner
            .get(&normalize_key(name.as_ref()))
            .map(|(original, index)| (original.as_str(), *index))
    }

    /// Number of elements in the set.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if set is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_set() {
        let mut set = CaseInsensitiveSet::new();
        assert!(set.insert(" Age ", 0).is_none());
        assert!(set.insert("Survived", 1).is_none());

        assert!(set.contains("age"));
        assert!(set.contains("AGE"));
        assert!(set.contains("  survived"));
        assert!(!set.contains("name"));
        assert_eq!(set.get("age"), Some(("Age", 0)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_collision_keeps_first() {
        let mut set = CaseInsensitiveSet::new();
        set.insert("Age", 0);
        assert_eq!(set.insert("age ", 3), Some("Age"));
        assert_eq!(set.get("AGE"), Some(("Age", 0)));
    }
}
