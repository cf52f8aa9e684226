use std::collections::HashMap;
use std::hash::Hash;

use actorx_world::OverrideMaterials;

/// Mesh identity: same asset with the same set of material overrides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshKey {
    pub asset_path: String,
    /// Sorted and deduplicated, so equality is set equality.
    pub overrides: Vec<(String, String)>,
}

impl MeshKey {
    pub fn new(asset_path: &str, overrides: &OverrideMaterials) -> Self {
        // BTreeMap iterates in key order already.
        Self {
            asset_path: asset_path.to_string(),
            overrides: overrides
                .iter()
                .map(|(slot, path)| (slot.clone(), path.clone()))
                .collect(),
        }
    }

    pub fn from_pairs<I, S>(asset_path: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut overrides: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(slot, path)| (slot.into(), path.into()))
            .collect();
        overrides.sort();
        overrides.dedup();
        Self {
            asset_path: asset_path.to_string(),
            overrides,
        }
    }
}

/// Memoizes imports for the lifetime of one import session.
///
/// The first lookup of a key runs the import; every later lookup returns the
/// stored value. Failures are stored too when `V` can express them (`Option`).
#[derive(Debug)]
pub struct AssetCache<K, V> {
    entries: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> Default for AssetCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: Eq + Hash, V: Clone> AssetCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_import(&mut self, key: K, import: impl FnOnce() -> V) -> V {
        if let Some(value) = self.entries.get(&key) {
            self.hits += 1;
            return value.clone();
        }
        self.misses += 1;
        let value = import();
        self.entries.insert(key, value.clone());
        value
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
