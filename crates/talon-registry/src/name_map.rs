//! Case-insensitive, insertion-ordered name tables.

use rustc_hash::FxHashMap;

/// A map from names to values where lookups ignore ASCII case.
///
/// Entries keep the spelling they were inserted with and iterate in
/// insertion order. Replacing an entry keeps its original position.
#[derive(Debug, Clone)]
pub struct NameMap<T> {
    index: FxHashMap<String, usize>,
    entries: Vec<(String, T)>,
}

impl<T> Default for NameMap<T> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            entries: Vec::new(),
        }
    }
}

impl<T> NameMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn key(name: &str) -> String {
        name.to_ascii_lowercase()
    }

    /// Insert or replace. Returns the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> Option<T> {
        let name = name.into();
        let key = Self::key(&name);
        if let Some(&slot) = self.index.get(&key) {
            let old = std::mem::replace(&mut self.entries[slot].1, value);
            return Some(old);
        }
        self.index.insert(key, self.entries.len());
        self.entries.push((name, value));
        None
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index
            .get(&Self::key(name))
            .map(|&slot| &self.entries[slot].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        match self.index.get(&Self::key(name)) {
            Some(&slot) => Some(&mut self.entries[slot].1),
            None => None,
        }
    }

    /// The spelling the entry was first inserted with.
    pub fn original_name(&self, name: &str) -> Option<&str> {
        self.index
            .get(&Self::key(name))
            .map(|&slot| self.entries[slot].0.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&Self::key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
