//! Plain-text URL detection.
//!
//! Finds `http://` and `https://` URLs so hosts can turn them into links
//! without computing offsets by hand. Ranges are character (grapheme)
//! ranges, ready for [`HyperLabel::add_link`](crate::label::HyperLabel::add_link).

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::text::CharacterRange;

/// URLs run until whitespace, angle brackets, or square brackets.
static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>\[\]]+").expect("Invalid URL regex pattern"));

/// Sentence punctuation that ends a URL in running text.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '\'', '"'];

/// A URL found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLink {
    pub range: CharacterRange,
    pub url: String,
}

/// Detect plain URLs in `text`, in order of appearance.
pub fn detect_urls(text: &str) -> Vec<DetectedLink> {
    URL_REGEX
        .find_iter(text)
        .filter_map(|m| {
            let url = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
            // Scheme alone is not a link
            if url.ends_with("://") {
                return None;
            }
            let start = grapheme_offset(text, m.start());
            let end = start + url.graphemes(true).count();
            Some(DetectedLink {
                range: CharacterRange::new(start, end)?,
                url: url.to_string(),
            })
        })
        .collect()
}

fn grapheme_offset(text: &str, byte: usize) -> usize {
    text.get(..byte)
        .map(|prefix| prefix.graphemes(true).count())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_single_url() {
        let text = "see https://example.com for more";
        let links = detect_urls(text);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com");
        assert_eq!(links[0].range.slice(text), Some("https://example.com"));
        assert_eq!(links[0].range.start(), 4);
    }

    #[test]
    fn test_detect_multiple_urls_in_order() {
        let text = "http://a.io and https://b.io/path?q=1";
        let urls: Vec<String> = detect_urls(text).into_iter().map(|l| l.url).collect();
        assert_eq!(urls, vec!["http://a.io", "https://b.io/path?q=1"]);
    }

    #[test]
    fn test_trailing_punctuation_is_excluded() {
        let text = "Visit https://example.com/docs.";
        let links = detect_urls(text);
        assert_eq!(links[0].url, "https://example.com/docs");
        assert_eq!(links[0].range.slice(text), Some("https://example.com/docs"));
    }

    #[test]
    fn test_brackets_terminate_url() {
        let links = detect_urls("[https://example.com]");
        assert_eq!(links[0].url, "https://example.com");
        assert_eq!(links[0].range.start(), 1);
    }

    #[test]
    fn test_ranges_count_graphemes_not_bytes() {
        let text = "café → https://example.com";
        let links = detect_urls(text);
        assert_eq!(links[0].range.start(), 7);
        assert_eq!(links[0].range.slice(text), Some("https://example.com"));
    }

    #[test]
    fn test_no_urls() {
        assert!(detect_urls("no links here").is_empty());
        assert!(detect_urls("ftp://example.com").is_empty());
        assert!(detect_urls("").is_empty());
    }
}
