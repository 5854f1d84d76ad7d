/// This crate is a content-based recommender over TF-IDF tag vectors.
pub mod catalog;
pub mod config;
pub mod error;
pub mod recommend;
pub mod similarity;
pub mod utils;
pub mod vectorizer;

/// Recommender
/// The top-level struct of this crate.
/// It loads a catalog once, vectorizes every item's tags, computes all-pairs
/// cosine similarity and then answers title queries against that fixed model.
///
/// Internally, it holds:
/// - The catalog (titles and normalized tags)
/// - The dense similarity matrix
///
/// A query is resolved to the first item, in catalog order, whose title
/// contains the query ignoring case. Its neighbors are ranked by descending
/// similarity, ties by ascending catalog index, and the item itself is never
/// returned. A query matching no title gives an empty list.
///
/// # Thread Safety
/// Read-only after build; share it behind `Arc` without locking.
pub use recommend::Recommender;

/// Catalog and Item
/// The loaded, fixed collection of recommendable items.
/// Each item keeps its position in the source file as a stable index, its
/// title, and its tag field with the delimiter replaced by spaces.
pub use catalog::{Catalog, Item};

/// Build settings: column names, tag delimiter, record limit, vocabulary cap,
/// default neighbor count and parallelism. Loadable from TOML.
pub use config::RecommenderConfig;

/// Error types
/// - `LoadError`: catalog missing, unreadable or lacking a required column
/// - `ConfigError`: invalid vocabulary cap, record limit or neighbor count
/// - `Error`: either of the above, or a cancelled build
pub use error::{ConfigError, Error, LoadError};

/// TF-IDF Vectorizer
/// Fits a capped vocabulary over the catalog's tag sets and produces one
/// L2-normalized sparse vector per item.
pub use vectorizer::TfIdfVectorizer;

/// TF IDF Calculation Engine Trait
/// Plug a weighting strategy into `TfIdfVectorizer<N, E>`.
/// - `DefaultTfIdfEngine`: smoothed idf, ln((1 + N) / (1 + df)) + 1
/// - `ClassicTfIdfEngine`: textbook idf, ln(N / (1 + df)) floored at 0
pub use vectorizer::tfidf::{ClassicTfIdfEngine, DefaultTfIdfEngine, TfIdfEngine};

/// Term Frequency structure
/// Counts the terms of one tag set.
pub use vectorizer::token::TermFrequency;

/// Similarity Matrix
/// Symmetric all-pairs cosine similarity in [0, 1], computed once.
pub use similarity::SimilarityMatrix;

/// Sparse vector with sorted indices, used for item features.
pub use utils::math::vector::SparseVec;

/// Search Hits and Hit Entry structures
/// - `Hits`: ranked neighbors, sortable by score
/// - `HitEntry`: one neighbor, its key and score
pub use recommend::hits::{HitEntry, Hits};
