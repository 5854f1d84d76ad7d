pub mod corpus;
pub mod tfidf;
pub mod token;

use indexmap::IndexMap;
use num::Float;

use crate::{
    error::ConfigError,
    utils::math::vector::SparseVec,
    vectorizer::{
        corpus::Corpus,
        tfidf::{DefaultTfIdfEngine, TfIdfEngine},
        token::TermFrequency,
    },
};

/// TF-IDF vector space fitted over a fixed set of tag sets.
///
/// `TfIdfVectorizer<N, E>`:
/// - `N`: vector element type (f32 or f64)
/// - `E`: weighting engine, `DefaultTfIdfEngine` unless stated
///
/// Holds the vocabulary, its IDF weights and one L2-normalized vector per
/// fitted document. Nothing changes after `fit`.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer<N = f64, E = DefaultTfIdfEngine>
where
    N: Float,
    E: TfIdfEngine,
{
    /// term -> column
    vocabulary: IndexMap<Box<str>, usize>,
    /// IDF per column
    idf: Vec<f64>,
    /// one vector per fitted document, in input order
    vectors: Vec<SparseVec<N>>,
    corpus: Corpus,
    _marker: std::marker::PhantomData<E>,
}

impl<N, E> TfIdfVectorizer<N, E>
where
    N: Float,
    E: TfIdfEngine,
{
    /// Fit the vocabulary (at most `max_features` terms, most frequent by
    /// document frequency) and vectorize every tag set.
    pub fn fit<I, S>(tag_sets: I, max_features: usize) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if max_features == 0 {
            return Err(ConfigError::InvalidMaxFeatures);
        }

        let freqs: Vec<TermFrequency> = tag_sets
            .into_iter()
            .map(|tags| TermFrequency::from_text(tags.as_ref()))
            .collect();

        let mut corpus = Corpus::new();
        for freq in &freqs {
            corpus.add_doc(freq);
        }

        let vocabulary: IndexMap<Box<str>, usize> = corpus
            .top_terms(max_features)
            .into_iter()
            .enumerate()
            .map(|(col, term)| (Box::<str>::from(term), col))
            .collect();
        let idf: Vec<f64> = vocabulary
            .keys()
            .map(|term| E::idf(corpus.doc_num(), corpus.term_count(term)))
            .collect();

        let mut instance = Self {
            vocabulary,
            idf,
            vectors: Vec::with_capacity(freqs.len()),
            corpus,
            _marker: std::marker::PhantomData,
        };
        instance.vectors = freqs.iter().map(|freq| instance.weigh(freq)).collect();

        tracing::debug!(
            docs = instance.vectors.len(),
            distinct_terms = instance.corpus.vocab_size(),
            vocabulary = instance.vocabulary.len(),
            "fitted tf-idf vocabulary"
        );
        Ok(instance)
    }

    /// Vectorize `text` against the fitted vocabulary.
    /// Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVec<N> {
        self.weigh(&TermFrequency::from_text(text))
    }

    fn weigh(&self, freq: &TermFrequency) -> SparseVec<N> {
        let term_sum = freq.term_sum();
        let pairs = freq.iter().filter_map(|(term, count)| {
            let col = *self.vocabulary.get(term)?;
            let weight = E::tf(count, term_sum) * self.idf[col];
            Some((col, N::from(weight)?))
        });
        let mut vec = SparseVec::from_pairs(self.vocabulary.len(), pairs);
        vec.l2_normalize();
        vec.shrink_to_fit();
        vec
    }

    /// term -> column
    pub fn vocabulary(&self) -> &IndexMap<Box<str>, usize> {
        &self.vocabulary
    }

    /// IDF weight per column
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn vectors(&self) -> &[SparseVec<N>] {
        &self.vectors
    }

    pub fn vector(&self, index: usize) -> Option<&SparseVec<N>> {
        self.vectors.get(index)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn doc_num(&self) -> usize {
        self.vectors.len()
    }
}
