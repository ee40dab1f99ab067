//! Character ranges measured in grapheme clusters.
//!
//! Offsets count extended grapheme clusters, not bytes or `char`s, so a
//! flag emoji or a letter with a combining accent is one character. Every
//! range is tied to the content that was current when it was created; the
//! same offsets mean nothing against different content.

use serde::Serialize;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{HyperspanError, HyperspanResult};

/// Number of grapheme clusters in `text`.
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Half-open interval `[start, end)` of character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct CharacterRange {
    start: usize,
    end: usize,
}

impl CharacterRange {
    /// Create a range, or `None` when `start > end`.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Create a range, reporting reversed bounds as an error.
    pub fn try_new(start: usize, end: usize) -> HyperspanResult<Self> {
        Self::new(start, end).ok_or(HyperspanError::InvalidRange { start, end })
    }

    /// Range of the first occurrence of `needle` in `text`.
    ///
    /// Only occurrences that start and end on character boundaries count:
    /// "cafe" does not occur in "cafe\u{301}". Returns `None` if `needle` is
    /// empty or does not occur.
    pub fn of(text: &str, needle: &str) -> Option<Self> {
        if needle.is_empty() {
            return None;
        }
        let boundaries: Vec<usize> = text
            .grapheme_indices(true)
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();

        boundaries.iter().enumerate().find_map(|(start, &byte_start)| {
            if !text[byte_start..].starts_with(needle) {
                return None;
            }
            let end = boundaries.binary_search(&(byte_start + needle.len())).ok()?;
            Some(Self { start, end })
        })
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `start <= index < end`
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Check that the range fits content of `len` characters.
    pub fn checked_within(self, len: usize) -> HyperspanResult<Self> {
        if self.end > len {
            return Err(HyperspanError::RangeOutOfBounds {
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(self)
    }

    /// Convert to a byte range into `text`, or `None` if the range does not fit.
    pub fn byte_range(&self, text: &str) -> Option<Range<usize>> {
        let mut boundaries = text
            .grapheme_indices(true)
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()));
        let start = boundaries.nth(self.start)?;
        let end = if self.is_empty() {
            start
        } else {
            boundaries.nth(self.end - self.start - 1)?
        };
        Some(start..end)
    }

    /// The substring covered by this range.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.byte_range(text).map(|r| &text[r])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_reversed_bounds() {
        assert!(CharacterRange::new(3, 2).is_none());
        assert!(CharacterRange::new(2, 2).is_some());
        assert!(matches!(
            CharacterRange::try_new(5, 1),
            Err(HyperspanError::InvalidRange { start: 5, end: 1 })
        ));
    }

    #[test]
    fn test_contains_is_half_open() {
        let range = CharacterRange::new(6, 11).unwrap();
        assert!(!range.contains(5));
        assert!(range.contains(6));
        assert!(range.contains(10));
        assert!(!range.contains(11));
    }

    #[test]
    fn test_empty_range_contains_nothing() {
        let range = CharacterRange::new(4, 4).unwrap();
        assert!(range.is_empty());
        assert!(!range.contains(4));
    }

    #[test]
    fn test_of_finds_plain_substring() {
        let range = CharacterRange::of("Hello world", "world").unwrap();
        assert_eq!((range.start(), range.end()), (6, 11));
        assert!(CharacterRange::of("Hello world", "moon").is_none());
        assert!(CharacterRange::of("Hello world", "").is_none());
    }

    #[test]
    fn test_of_counts_graphemes_not_bytes() {
        // The apostrophe is three bytes in UTF-8
        let text = "You\u{2019}ll be happy one day.";
        let range = CharacterRange::of(text, "day").unwrap();
        assert_eq!((range.start(), range.end()), (20, 23));
        assert_eq!(range.slice(text), Some("day"));
    }

    #[test]
    fn test_combining_sequences_are_single_characters() {
        // "e" + combining acute accent, then a flag made of two regional indicators
        let text = "cafe\u{301} \u{1F1EB}\u{1F1F7} ok";
        assert_eq!(grapheme_count(text), 9);
        let ok = CharacterRange::of(text, "ok").unwrap();
        assert_eq!((ok.start(), ok.end()), (7, 9));
        let flag = CharacterRange::new(5, 6).unwrap();
        assert_eq!(flag.slice(text), Some("\u{1F1EB}\u{1F1F7}"));
    }

    #[test]
    fn test_of_skips_matches_inside_a_character() {
        // "e" followed by a combining accent is one character, so "cafe" is absent
        let text = "cafe\u{301} bar";
        assert!(CharacterRange::of(text, "cafe").is_none());
        let bar = CharacterRange::of(text, "bar").unwrap();
        assert_eq!((bar.start(), bar.end()), (5, 8));

        // A later whole-character occurrence is still found
        let text = "cafe\u{301} cafe";
        let cafe = CharacterRange::of(text, "cafe").unwrap();
        assert_eq!((cafe.start(), cafe.end()), (5, 9));
        assert_eq!(cafe.slice(text), Some("cafe"));
    }

    #[test]
    fn test_byte_range_out_of_bounds() {
        let range = CharacterRange::new(2, 10).unwrap();
        assert!(range.byte_range("short").is_none());
        let end = CharacterRange::new(5, 5).unwrap();
        assert_eq!(end.byte_range("short"), Some(5..5));
    }

    #[test]
    fn test_checked_within() {
        let range = CharacterRange::new(0, 5).unwrap();
        assert!(range.checked_within(5).is_ok());
        assert!(matches!(
            range.checked_within(4),
            Err(HyperspanError::RangeOutOfBounds { len: 4, .. })
        ));
    }
}
