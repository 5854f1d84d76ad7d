pub mod hits;

use std::{path::Path, sync::atomic::AtomicBool, time::Instant};

use crate::{
    catalog::{Catalog, Item},
    config::RecommenderConfig,
    error::{ConfigError, Result},
    recommend::hits::{HitEntry, Hits},
    similarity::SimilarityMatrix,
    vectorizer::{
        tfidf::{DefaultTfIdfEngine, TfIdfEngine},
        TfIdfVectorizer,
    },
};

/// Immutable recommendation model: the catalog plus its similarity matrix.
///
/// Built once, then only read. It is `Send + Sync`, so it can be shared
/// behind an `Arc`; reloading means building a new one and swapping the
/// `Arc`.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    matrix: SimilarityMatrix,
    vocabulary_size: usize,
    default_top_n: usize,
}

impl Recommender {
    /// Load the catalog at `path` and build the model.
    pub fn from_path(path: impl AsRef<Path>, config: &RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::load(path, config)?;
        Self::build(catalog, config)
    }

    /// Build with the default (smoothed) weighting.
    pub fn build(catalog: Catalog, config: &RecommenderConfig) -> Result<Self> {
        Self::build_with::<DefaultTfIdfEngine>(catalog, config)
    }

    pub fn build_with<E>(catalog: Catalog, config: &RecommenderConfig) -> Result<Self>
    where
        E: TfIdfEngine,
    {
        Self::build_cancellable::<E>(catalog, config, &AtomicBool::new(false))
    }

    /// Build, giving up with `Error::Cancelled` once `cancel` is raised.
    pub fn build_cancellable<E>(
        catalog: Catalog,
        config: &RecommenderConfig,
        cancel: &AtomicBool,
    ) -> Result<Self>
    where
        E: TfIdfEngine,
    {
        config.validate()?;
        let now = Instant::now();

        let vectorizer: TfIdfVectorizer<f64, E> =
            TfIdfVectorizer::fit(catalog.tag_sets(), config.max_features)?;
        let matrix =
            SimilarityMatrix::compute_cancellable(vectorizer.vectors(), config.parallel, cancel)?;

        tracing::info!(
            items = catalog.len(),
            vocabulary = vectorizer.vocabulary().len(),
            "recommender built in {}ms",
            now.elapsed().as_micros() as f64 / 1000.0
        );
        Ok(Self {
            vocabulary_size: vectorizer.vocabulary().len(),
            catalog,
            matrix,
            default_top_n: config.default_top_n,
        })
    }

    /// First item whose title contains `query`, ignoring case.
    pub fn resolve(&self, query: &str) -> Option<&Item> {
        self.catalog.find_first(query)
    }

    /// Neighbors of the resolved item by catalog index, best first.
    /// Empty when nothing matches.
    pub fn recommend_hits(&self, query: &str, top_n: usize) -> Result<Hits<usize>> {
        if top_n == 0 {
            return Err(ConfigError::InvalidTopN.into());
        }
        let Some(item) = self.resolve(query) else {
            tracing::debug!(query, "no title matches");
            return Ok(Hits::new(Vec::new()));
        };

        let row = self.matrix.row(item.index).unwrap_or_default();
        let mut hits = Hits::new(
            row.iter()
                .enumerate()
                .map(|(key, &score)| HitEntry { key, score })
                .collect(),
        );
        hits.sort_by_score()
            .retain(|e| e.key != item.index)
            .truncate(top_n);
        Ok(hits)
    }

    /// Like `recommend_hits`, keyed by title.
    pub fn recommend_scored(&self, query: &str, top_n: usize) -> Result<Hits<String>> {
        let hits = self.recommend_hits(query, top_n)?;
        Ok(hits.map_keys(|index| {
            self.catalog
                .get(index)
                .map(|item| item.title.clone())
                .unwrap_or_default()
        }))
    }

    /// Titles of the `top_n` items most similar to the first title matching
    /// `query`, best first. No match gives an empty list.
    pub fn recommend(&self, query: &str, top_n: usize) -> Result<Vec<String>> {
        Ok(self.recommend_scored(query, top_n)?.into_keys())
    }

    /// `recommend` with the configured default count.
    pub fn recommend_default(&self, query: &str) -> Result<Vec<String>> {
        self.recommend(query, self.default_top_n)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, vectorizer::tfidf::ClassicTfIdfEngine};

    fn toy() -> Recommender {
        let catalog = Catalog::from_records(
            [
                ("Toy Story", Some("Animation|Comedy")),
                ("Toy Story 2", Some("Animation|Comedy")),
                ("Heat", Some("Action|Crime")),
            ],
            '|',
        );
        Recommender::build(catalog, &RecommenderConfig::default()).unwrap()
    }

    fn movies() -> Recommender {
        let catalog = Catalog::from_records(
            [
                ("Toy Story (1995)", Some("Adventure|Animation|Children|Comedy|Fantasy")),
                ("Jumanji (1995)", Some("Adventure|Children|Fantasy")),
                ("Grumpier Old Men (1995)", Some("Comedy|Romance")),
                ("Waiting to Exhale (1995)", Some("Comedy|Drama|Romance")),
                ("Father of the Bride Part II (1995)", Some("Comedy")),
                ("Heat (1995)", Some("Action|Crime|Thriller")),
                ("Sabrina (1995)", Some("Comedy|Romance")),
                ("Tom and Huck (1995)", Some("Adventure|Children")),
                ("Sudden Death (1995)", Some("Action")),
                ("GoldenEye (1995)", Some("Action|Adventure|Thriller")),
                ("Unknown Pleasures (2002)", None),
            ],
            '|',
        );
        Recommender::build(catalog, &RecommenderConfig::default()).unwrap()
    }

    #[test]
    fn toy_story_recommends_its_sequel() {
        let r = toy();
        assert_eq!(r.resolve("Toy Story").unwrap().index, 0);
        assert_eq!(r.recommend("Toy Story", 1).unwrap(), ["Toy Story 2"]);
        assert_eq!(r.recommend("toy story", 5).unwrap(), ["Toy Story 2", "Heat"]);
    }

    #[test]
    fn self_is_excluded_even_when_tied() {
        let r = toy();
        // identical vectors: both score 1.0 against each other
        assert_eq!(r.recommend("Toy Story 2", 1).unwrap(), ["Toy Story"]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let r = movies();
        assert!(r.recommend("Nonexistent Film", 5).unwrap().is_empty());
        assert!(r.recommend_hits("Nonexistent Film", 5).unwrap().is_empty());
    }

    #[test]
    fn scored_titles_match_recommend() {
        let r = movies();
        let scored = r.recommend_scored("Jumanji", 4).unwrap();
        let scores: Vec<f64> = scored.iter().map(|e| e.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(scored.clone().into_keys(), r.recommend("Jumanji", 4).unwrap());

        let listing = scored.to_string();
        assert!(listing.starts_with("  1. Tom and Huck (1995) ("));
        assert_eq!(listing.lines().count(), 4);
        assert!(r.recommend_scored("Nonexistent Film", 4).unwrap().to_string().is_empty());
    }

    #[test]
    fn zero_top_n_is_rejected() {
        let r = movies();
        assert!(matches!(
            r.recommend("Heat", 0),
            Err(Error::Config(ConfigError::InvalidTopN))
        ));
    }

    #[test]
    fn result_length_is_min_of_top_n_and_rest() {
        let r = movies();
        let n = r.catalog().len();
        for item in r.catalog() {
            let title = item.title.clone();
            assert_eq!(r.recommend(&title, 3).unwrap().len(), 3);
            let all = r.recommend(&title, 100).unwrap();
            assert_eq!(all.len(), n - 1);
            assert!(!all.contains(&title));
        }
    }

    #[test]
    fn ranks_by_shared_tags() {
        let r = movies();
        let recs = r.recommend("jumanji", 2).unwrap();
        assert_eq!(recs, ["Tom and Huck (1995)", "Toy Story (1995)"]);

        let hits = r.recommend_hits("heat", 3).unwrap();
        let keys: Vec<usize> = hits.iter().map(|e| e.key).collect();
        assert_eq!(keys[0], 9);
        assert!(hits.list.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn untagged_item_gets_catalog_order() {
        let r = movies();
        // all scores are 0, so ties fall back to ascending index
        assert_eq!(
            r.recommend("Unknown Pleasures", 3).unwrap(),
            ["Toy Story (1995)", "Jumanji (1995)", "Grumpier Old Men (1995)"]
        );
    }

    #[test]
    fn repeated_queries_are_identical() {
        let r = movies();
        let first = r.recommend("(1995)", 5).unwrap();
        for _ in 0..10 {
            assert_eq!(r.recommend("(1995)", 5).unwrap(), first);
        }
    }

    #[test]
    fn default_top_n_is_five() {
        let r = movies();
        assert_eq!(r.default_top_n(), 5);
        assert_eq!(r.recommend_default("sabrina").unwrap().len(), 5);
    }

    #[test]
    fn duplicate_titles_resolve_to_first() {
        let catalog = Catalog::from_records(
            [
                ("Hamlet", Some("Drama")),
                ("Hamlet", Some("Crime|Thriller")),
                ("Othello", Some("Drama")),
                ("Se7en", Some("Crime|Thriller")),
            ],
            '|',
        );
        let r = Recommender::build(catalog, &RecommenderConfig::default()).unwrap();
        assert_eq!(r.recommend("hamlet", 1).unwrap(), ["Othello"]);
    }

    #[test]
    fn classic_engine_builds() {
        let catalog = Catalog::from_records(
            [
                ("Toy Story", Some("Animation|Comedy")),
                ("Toy Story 2", Some("Animation|Comedy")),
                ("Heat", Some("Action|Crime")),
            ],
            '|',
        );
        let r = Recommender::build_with::<ClassicTfIdfEngine>(catalog, &RecommenderConfig::default())
            .unwrap();
        // animation and comedy carry no weight here; ties fall to catalog order
        assert_eq!(r.recommend("Toy Story", 1).unwrap(), ["Toy Story 2"]);
        assert_eq!(r.matrix().get(0, 0), Some(0.0));
    }

    #[test]
    fn cancelled_build_returns_error() {
        let cancel = AtomicBool::new(true);
        let res = Recommender::build_cancellable::<DefaultTfIdfEngine>(
            toy().catalog().clone(),
            &RecommenderConfig::default(),
            &cancel,
        );
        assert!(matches!(res, Err(Error::Cancelled)));
    }

    #[test]
    fn invalid_config_is_rejected_before_build() {
        let config = RecommenderConfig { max_features: 0, ..RecommenderConfig::default() };
        let res = Recommender::build(toy().catalog().clone(), &config);
        assert!(matches!(res, Err(Error::Config(ConfigError::InvalidMaxFeatures))));
    }

    #[test]
    fn model_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recommender>();

        let r = std::sync::Arc::new(movies());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let r = std::sync::Arc::clone(&r);
                std::thread::spawn(move || r.recommend("heat", 3).unwrap())
            })
            .collect();
        let expected = r.recommend("heat", 3).unwrap();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }
}
