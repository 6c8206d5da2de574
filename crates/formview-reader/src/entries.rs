//! Field entries
//!
//! Insertion-ordered name to value map. Re-inserting a name replaces the
//! value in place, so the first occurrence fixes the position and the last
//! one fixes the value.

use std::collections::HashMap;

/// One extracted field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    pub value: String,
}

/// Ordered field map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEntries {
    entries: Vec<FieldEntry>,
    by_name: HashMap<String, usize>,
}

impl FieldEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        if let Some(&index) = self.by_name.get(&name) {
            return Some(std::mem::replace(&mut self.entries[index].value, value));
        }
        self.by_name.insert(name.clone(), self.entries.len());
        self.entries.push(FieldEntry { name, value });
        None
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&index| self.entries[index].value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = &FieldEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl<'a> IntoIterator for &'a FieldEntries {
    type Item = &'a FieldEntry;
    type IntoIter = std::slice::Iter<'a, FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let mut entries = FieldEntries::new();
        entries.insert("user", "alice");
        entries.insert("bio", "Unknown");

        assert_eq!(entries.names().collect::<Vec<_>>(), vec!["user", "bio"]);
        assert_eq!(entries.get("bio"), Some("Unknown"));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_reinsert_keeps_position_takes_value() {
        let mut entries = FieldEntries::new();
        entries.insert("color", "red");
        entries.insert("size", "L");
        assert_eq!(entries.insert("color", "blue"), Some("red".to_string()));

        let pairs: Vec<_> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("color", "blue"), ("size", "L")]);
    }

    #[test]
    fn test_missing() {
        let entries = FieldEntries::new();
        assert!(entries.is_empty());
        assert!(!entries.contains("x"));
        assert_eq!(entries.get("x"), None);
    }
}
