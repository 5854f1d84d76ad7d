use indexmap::IndexMap;

use crate::vectorizer::token::TermFrequency;

/// Document count and per-term document frequency over a catalog.
/// Base data for IDF.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    doc_num: u64,
    /// documents containing each term, in first-seen order
    term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document. Each distinct term counts once.
    pub fn add_doc(&mut self, freq: &TermFrequency) {
        self.doc_num += 1;
        for term in freq.term_set_ref_str() {
            *self.term_counts.entry(term.into()).or_insert(0) += 1;
        }
    }

    /// number of documents added, empty ones included
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// document frequency of `term`
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// number of distinct terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Up to `max_features` terms with the highest document frequency.
    /// Ties go to the lexicographically smaller term; the result is
    /// returned in lexicographic order.
    pub fn top_terms(&self, max_features: usize) -> Vec<&str> {
        let mut terms: Vec<(&str, u64)> = self
            .term_counts
            .iter()
            .map(|(t, c)| (&**t, *c))
            .collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(max_features);
        let mut kept: Vec<&str> = terms.into_iter().map(|(t, _)| t).collect();
        kept.sort_unstable();
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&str]) -> Corpus {
        let mut corpus = Corpus::new();
        for doc in docs {
            corpus.add_doc(&TermFrequency::from_text(doc));
        }
        corpus
    }

    #[test]
    fn document_frequency_counts_each_doc_once() {
        let corpus = corpus(&["drama drama war", "drama", ""]);
        assert_eq!(corpus.doc_num(), 3);
        assert_eq!(corpus.term_count("drama"), 2);
        assert_eq!(corpus.term_count("war"), 1);
        assert_eq!(corpus.term_count("comedy"), 0);
        assert_eq!(corpus.vocab_size(), 2);
    }

    #[test]
    fn top_terms_by_frequency_then_name() {
        let corpus = corpus(&["zeta beta", "zeta alpha", "zeta gamma beta"]);
        // zeta:3, beta:2, alpha:1, gamma:1
        assert_eq!(corpus.top_terms(2), ["beta", "zeta"]);
        assert_eq!(corpus.top_terms(3), ["alpha", "beta", "zeta"]);
        assert_eq!(corpus.top_terms(10), ["alpha", "beta", "gamma", "zeta"]);
    }
}
