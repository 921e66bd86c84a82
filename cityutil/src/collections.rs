use std::collections::{BTreeMap, BTreeSet};

/// Counts occurrences of keys. Iteration order is deterministic.
#[derive(Clone, Debug)]
pub struct Counter<T: Ord> {
    map: BTreeMap<T, usize>,
    sum: usize,
}

impl<T: Ord> Default for Counter<T> {
    fn default() -> Counter<T> {
        Counter::new()
    }
}

impl<T: Ord> Counter<T> {
    pub fn new() -> Counter<T> {
        Counter {
            map: BTreeMap::new(),
            sum: 0,
        }
    }

    /// Returns the new count
    pub fn inc(&mut self, val: T) -> usize {
        self.add(val, 1)
    }

    /// Returns the new count
    pub fn add(&mut self, val: T, amount: usize) -> usize {
        let entry = self.map.entry(val).or_insert(0);
        *entry += amount;
        self.sum += amount;
        *entry
    }

    pub fn get(&self, val: &T) -> usize {
        self.map.get(val).cloned().unwrap_or(0)
    }

    pub fn sum(&self) -> usize {
        self.sum
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn consume(self) -> BTreeMap<T, usize> {
        self.map
    }
}

/// A key mapping to a set of values, both ordered.
#[derive(Clone, Debug)]
pub struct MultiMap<K: Ord, V: Ord> {
    map: BTreeMap<K, BTreeSet<V>>,
}

impl<K: Ord, V: Ord> Default for MultiMap<K, V> {
    fn default() -> MultiMap<K, V> {
        MultiMap::new()
    }
}

impl<K: Ord, V: Ord> MultiMap<K, V> {
    pub fn new() -> MultiMap<K, V> {
        MultiMap {
            map: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.map.entry(key).or_insert_with(BTreeSet::new).insert(value);
    }

    pub fn get(&self, key: &K) -> Option<&BTreeSet<V>> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &BTreeSet<V>)> {
        self.map.iter()
    }

    pub fn consume(self) -> BTreeMap<K, BTreeSet<V>> {
        self.map
    }
}
