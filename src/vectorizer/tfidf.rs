/// TF-IDF weighting strategy.
///
/// Plugged into `TfIdfVectorizer<N, E>` as a type parameter. Both methods
/// must return non-negative, finite weights.
pub trait TfIdfEngine {
    /// Inverse document frequency of a term
    /// # Arguments
    /// * `doc_num` - documents in the catalog
    /// * `doc_freq` - documents containing the term
    fn idf(doc_num: u64, doc_freq: u64) -> f64;

    /// Term frequency of a term within one document
    /// # Arguments
    /// * `count` - occurrences of the term in the document
    /// * `term_sum` - total terms in the document
    fn tf(count: u32, term_sum: u64) -> f64 {
        if term_sum == 0 {
            0.0
        } else {
            count as f64 / term_sum as f64
        }
    }
}

/// Smoothed weighting.
/// idf = ln((1 + N) / (1 + df)) + 1
///
/// Differs from the textbook `ln(N / (1 + df))` (see [`ClassicTfIdfEngine`])
/// to keep every weight positive: the textbook form is zero or negative for
/// any term found in `N - 1` or more documents, which would leave such items
/// with zero vectors and push cosine scores outside [0, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTfIdfEngine;

impl TfIdfEngine for DefaultTfIdfEngine {
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

/// Textbook weighting.
/// idf = ln(N / (1 + df)), floored at 0
///
/// Terms present in almost every document carry no weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicTfIdfEngine;

impl TfIdfEngine for ClassicTfIdfEngine {
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        if doc_num == 0 {
            return 0.0;
        }
        (doc_num as f64 / (1.0 + doc_freq as f64)).ln().max(0.0)
    }
}
