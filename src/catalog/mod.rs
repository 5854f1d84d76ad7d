use std::{fs::File, io::Read, path::Path, time::Instant};

use crate::{config::RecommenderConfig, error::LoadError};

/// One recommendable record.
/// `index` is its position in the catalog and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub index: usize,
    pub title: String,
    /// normalized tag set: delimiter replaced by spaces, missing as ""
    pub tags: String,
}

/// Fixed, ordered collection of items.
/// Owns its items and the lowercased titles the resolver scans.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    folded_titles: Vec<String>,
}

/// Replace every delimiter with a single space; missing becomes empty.
pub fn normalize_tags(raw: Option<&str>, delimiter: char) -> String {
    match raw {
        Some(raw) => raw.replace(delimiter, " "),
        None => String::new(),
    }
}

impl Catalog {
    /// Build from in-memory `(title, tags)` pairs.
    pub fn from_records<I, T, G>(records: I, delimiter: char) -> Self
    where
        I: IntoIterator<Item = (T, Option<G>)>,
        T: Into<String>,
        G: AsRef<str>,
    {
        let items = records
            .into_iter()
            .enumerate()
            .map(|(index, (title, tags))| Item {
                index,
                title: title.into(),
                tags: normalize_tags(tags.as_ref().map(|t| t.as_ref()), delimiter),
            })
            .collect();
        Self::from_items(items)
    }

    fn from_items(items: Vec<Item>) -> Self {
        let folded_titles = items.iter().map(|item| item.title.to_lowercase()).collect();
        Self { items, folded_titles }
    }

    /// Read a CSV catalog with a header row.
    /// Only the first `config.max_items` records are kept.
    pub fn load(path: impl AsRef<Path>, config: &RecommenderConfig) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let now = Instant::now();
        let catalog = Self::from_reader(file, config)?;
        tracing::debug!(
            path = %path.display(),
            items = catalog.len(),
            "took {}ms to read catalog",
            now.elapsed().as_micros() as f64 / 1000.0
        );
        Ok(catalog)
    }

    /// Same as `load`, over any reader.
    pub fn from_reader<R: Read>(reader: R, config: &RecommenderConfig) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn { column: name.to_string() })
        };
        let title_col = column(&config.title_column)?;
        let tags_col = column(&config.tags_column)?;

        let mut items = Vec::new();
        for (index, record) in csv_reader.records().take(config.max_items).enumerate() {
            let record = record?;
            let title = record.get(title_col).unwrap_or_default().to_string();
            let raw_tags = record.get(tags_col).filter(|t| !t.is_empty());
            items.push(Item {
                index,
                title,
                tags: normalize_tags(raw_tags, config.tag_delimiter),
            });
        }
        Ok(Self::from_items(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }

    /// Tag sets in catalog order, as fed to the vectorizer.
    pub fn tag_sets(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.tags.as_str())
    }

    /// First item, in catalog order, whose title contains `query`
    /// ignoring case. The query is a literal, not a pattern.
    pub fn find_first(&self, query: &str) -> Option<&Item> {
        let needle = query.to_lowercase();
        self.folded_titles
            .iter()
            .position(|title| title.contains(&needle))
            .map(|idx| &self.items[idx])
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
