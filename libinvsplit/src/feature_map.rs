use std::collections::HashMap;

/// Feature name to score, iterated in first-insertion order.
///
/// Scores are kept as the raw text found in the inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureMap {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.positions
            .get(name)
            .map(|&index| self.entries[index].1.as_str())
    }

    /// Inserts or updates an entry. An existing key keeps its position and
    /// takes the new score; the previous score is returned.
    pub fn insert(&mut self, name: impl Into<String>, score: impl Into<String>) -> Option<String> {
        let name = name.into();
        let score = score.into();
        match self.positions.get(&name) {
            Some(&index) => Some(std::mem::replace(&mut self.entries[index].1, score)),
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push((name, score));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, score)| (name.as_str(), score.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FeatureMap::new();
        for (name, score) in iter {
            map.insert(name, score);
        }
        map
    }
}
