//! Registry of character ranges and the values attached to them.
//!
//! Links are registered as content is set and looked up by character offset
//! when a tap resolves to a character. The registry is cleared wholesale
//! whenever content is replaced, since stored offsets only mean something
//! against the content they were registered for.

use crate::text::CharacterRange;

/// A registered range with its value.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkEntry<V> {
    pub range: CharacterRange,
    pub value: V,
}

/// Ordered, append-only collection of range entries.
///
/// Entries may overlap. Lookups scan in registration order and the first
/// entry containing the offset wins.
#[derive(Debug, Clone)]
pub struct RangeRegistry<V> {
    entries: Vec<LinkEntry<V>>,
}

impl<V> Default for RangeRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RangeRegistry<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry. Overlaps with existing entries are allowed.
    pub fn register(&mut self, range: CharacterRange, value: V) {
        self.entries.push(LinkEntry { range, value });
    }

    /// Slot of the first entry whose range contains `index`.
    pub fn find(&self, index: usize) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.range.contains(index))
    }

    /// Value of the first entry whose range contains `index`.
    pub fn lookup(&self, index: usize) -> Option<&V> {
        self.find(index).map(|slot| &self.entries[slot].value)
    }

    pub fn get(&self, slot: usize) -> Option<&LinkEntry<V>> {
        self.entries.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut LinkEntry<V>> {
        self.entries.get_mut(slot)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[LinkEntry<V>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: usize, end: usize) -> CharacterRange {
        CharacterRange::new(start, end).unwrap()
    }

    #[test]
    fn test_lookup_basic() {
        let mut registry = RangeRegistry::new();
        registry.register(range(0, 5), "hello");
        registry.register(range(6, 11), "world");

        assert_eq!(registry.lookup(0), Some(&"hello"));
        assert_eq!(registry.lookup(4), Some(&"hello"));
        assert_eq!(registry.lookup(8), Some(&"world"));

        // Gap and end are outside every range
        assert_eq!(registry.lookup(5), None);
        assert_eq!(registry.lookup(11), None);
    }

    #[test]
    fn test_overlapping_entries_first_registered_wins() {
        let mut registry = RangeRegistry::new();
        registry.register(range(0, 20), "outer");
        registry.register(range(5, 10), "inner");

        assert_eq!(registry.lookup(7), Some(&"outer"));
        assert_eq!(registry.find(7), Some(0));
        assert_eq!(registry.lookup(15), Some(&"outer"));
    }

    #[test]
    fn test_empty_registry() {
        let registry: RangeRegistry<u32> = RangeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.lookup(0), None);
    }

    #[test]
    fn test_empty_range_never_matches() {
        let mut registry = RangeRegistry::new();
        registry.register(range(3, 3), 1);
        assert_eq!(registry.lookup(3), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut registry = RangeRegistry::new();
        registry.register(range(0, 5), 1);
        registry.register(range(5, 10), 2);
        assert_eq!(registry.len(), 2);

        registry.clear();
        assert!(registry.is_empty());
        for index in 0..10 {
            assert_eq!(registry.lookup(index), None);
        }
    }

    #[test]
    fn test_entries_preserve_registration_order() {
        let mut registry = RangeRegistry::new();
        registry.register(range(10, 12), 'c');
        registry.register(range(0, 2), 'a');
        registry.register(range(5, 7), 'b');

        let values: Vec<char> = registry.entries().iter().map(|e| e.value).collect();
        assert_eq!(values, vec!['c', 'a', 'b']);
    }

    #[test]
    fn test_get_mut_updates_value() {
        let mut registry = RangeRegistry::new();
        registry.register(range(0, 3), 0u32);
        if let Some(entry) = registry.get_mut(0) {
            entry.value += 1;
        }
        assert_eq!(registry.get(0).map(|e| e.value), Some(1));
        assert!(registry.get(1).is_none());
    }
}
