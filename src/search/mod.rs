//! Keyword search over content collections.
//!
//! A query is reduced to keywords (lower-cased, short tokens and stop words
//! dropped, duplicates removed) and a record matches when any keyword is a
//! literal substring of its searchable text. There is no scoring: results
//! keep the input order.
//!
//! # Example
//! ```
//! use scolaia_rs::search::extract_keywords;
//!
//! assert_eq!(
//!     extract_keywords("how can I improve fractions"),
//!     vec!["improve".to_string(), "fractions".to_string()],
//! );
//! ```

pub mod global;
mod records;

pub use global::{SearchResultGroup, SearchResultItem, build_global_search};

use std::collections::HashSet;

/// Tokens this short or shorter are never keywords.
const MIN_KEYWORD_CHARS: usize = 3;

/// English and German function words ignored when extracting keywords.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with", "can", "could", "should",
    "would", "how", "what", "when", "where", "who", "why", "i", "my", "me", "we", "our", "you",
    "your", "she", "her", "his", "they", "their", "this", "these", "those", "am", "do", "does",
    "did", "have", "been", "being",
    // German
    "der", "die", "das", "den", "dem", "des", "ein", "eine", "einer", "eines", "und", "oder",
    "aber", "ich", "du", "er", "sie", "es", "wir", "ihr", "ist", "sind", "war", "waren", "hat",
    "haben", "kann", "können", "wie", "was", "wo", "wenn", "dann", "auch", "noch", "nur",
    "schon", "so", "sehr", "mehr", "zu",
];

/// Text fields a record exposes to search.
///
/// Every field is optional; records override only what they carry.
pub trait Searchable {
    fn title(&self) -> Option<&str> {
        None
    }
    fn summary(&self) -> Option<&str> {
        None
    }
    fn description(&self) -> Option<&str> {
        None
    }
    fn name(&self) -> Option<&str> {
        None
    }
    fn role(&self) -> Option<&str> {
        None
    }
    fn focus(&self) -> Option<&str> {
        None
    }
    fn bio(&self) -> Option<&str> {
        None
    }
    fn tags(&self) -> Option<&[String]> {
        None
    }
}

fn normalize(value: &str) -> String {
    value.to_lowercase().trim().to_string()
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Extract the meaningful keywords of a natural-language query.
///
/// `"classroom management strategies"` yields all three words;
/// `"how can I teach fractions"` yields `["teach", "fractions"]`.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let normalized = normalize(query);
    let mut seen = HashSet::new();

    normalized
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS)
        .filter(|word| !is_stop_word(word))
        .filter(|word| seen.insert(*word))
        .map(str::to_string)
        .collect()
}

/// Terms a query is matched with: its keywords, or the whole normalized
/// query when no keyword survives extraction.
pub fn search_terms(query: &str) -> Vec<String> {
    let keywords = extract_keywords(query);
    if keywords.is_empty() {
        vec![normalize(query)]
    } else {
        keywords
    }
}

/// Lower-cased concatenation of a record's searchable fields.
///
/// Field order is fixed: title, summary, description, name, role, focus,
/// bio, then tags joined by single spaces. Absent or empty fields are
/// skipped.
pub fn haystack<T: Searchable + ?Sized>(item: &T) -> String {
    let tags = item.tags().map(|tags| tags.join(" "));
    let parts = [
        item.title(),
        item.summary(),
        item.description(),
        item.name(),
        item.role(),
        item.focus(),
        item.bio(),
        tags.as_deref(),
    ];

    let joined = parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    normalize(&joined)
}

/// Whether `item` contains any of `terms` in its searchable text.
pub fn matches_any<T: Searchable + ?Sized>(item: &T, terms: &[String]) -> bool {
    let haystack = haystack(item);
    terms.iter().any(|term| haystack.contains(term.as_str()))
}

/// Select the records of `items` that match `query`.
///
/// A blank query passes every record through. Order is preserved and the
/// returned references point at the original elements.
pub fn filter_collection<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.trim().is_empty() {
        return items.iter().collect();
    }

    let terms = search_terms(query);
    items
        .iter()
        .filter(|item| matches_any(*item, &terms))
        .collect()
}
