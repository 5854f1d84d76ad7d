use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

/// Tokens are runs of two or more word characters.
const TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Split a tag set into lowercase terms.
///
/// Single-character runs are dropped, so `Sci-Fi` gives `sci`, `fi` and
/// `Film-Noir` gives `film`, `noir`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// TermFrequency
/// Counts the occurrences of each term within one document.
/// Keeps terms in first-seen order.
///
/// # Examples
/// ```
/// use tag_recommender::vectorizer::token::TermFrequency;
/// let mut freq = TermFrequency::new();
/// freq.add_terms(&["drama", "war", "drama"]);
/// assert_eq!(freq.term_count("drama"), 2);
/// assert_eq!(freq.term_sum(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequency {
    term_count: IndexMap<String, u32>,
    total_term_count: u64,
}

impl TermFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the terms of a raw tag set.
    pub fn from_text(text: &str) -> Self {
        let mut freq = Self::new();
        freq.add_terms(&tokenize(text));
        freq
    }

    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        let count = self.term_count.entry(term.to_string()).or_insert(0);
        *count += 1;
        self.total_term_count += 1;
        self
    }

    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// occurrences of `term`, 0 if absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// total number of terms added, duplicates included
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// `(term, count)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// distinct terms in first-seen order
    pub fn term_set_ref_str(&self) -> Vec<&str> {
        self.term_count.keys().map(|t| t.as_str()).collect()
    }
}
