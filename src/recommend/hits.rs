use std::fmt::{self, Debug, Display};

/// One ranked neighbor.
#[derive(Debug, Clone, PartialEq)]
pub struct HitEntry<K> {
    pub key: K,
    pub score: f64,
}

/// Ranked neighbors of a resolved item.
#[derive(Clone, PartialEq)]
pub struct Hits<K> {
    pub list: Vec<HitEntry<K>>,
}

impl<K> Hits<K> {
    pub fn new(list: Vec<HitEntry<K>>) -> Self {
        Hits { list }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry<K>> {
        self.list.iter()
    }

    /// Keep at most `n` entries.
    pub fn truncate(&mut self, n: usize) -> &mut Self {
        self.list.truncate(n);
        self
    }

    pub fn retain(&mut self, f: impl FnMut(&HitEntry<K>) -> bool) -> &mut Self {
        self.list.retain(f);
        self
    }

    pub fn map_keys<T>(self, mut f: impl FnMut(K) -> T) -> Hits<T> {
        Hits {
            list: self
                .list
                .into_iter()
                .map(|e| HitEntry { key: f(e.key), score: e.score })
                .collect(),
        }
    }

    pub fn into_keys(self) -> Vec<K> {
        self.list.into_iter().map(|e| e.key).collect()
    }
}

impl<K: Ord> Hits<K> {
    /// Sort by descending score; equal scores by ascending key.
    pub fn sort_by_score(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|e| !e.score.is_nan());
        self.list
            .sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.key.cmp(&b.key)));
        self
    }
}

impl<K> Debug for Hits<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for e in &self.list {
                writeln!(f, "    {:?}: {:.6}", e.key, e.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl<K> Display for Hits<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, e) in self.list.iter().enumerate() {
            writeln!(f, "{:>3}. {} ({:.4})", rank + 1, e.key, e.score)?;
        }
        Ok(())
    }
}
