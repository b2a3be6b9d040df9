//! Separate-chaining hash table backing JSON objects.
//!
//! Keys hash into a fixed vector of buckets; each occupied bucket holds a
//! chain of entries in insertion order. Once the table holds more than
//! `capacity * LOAD_FACTOR` entries it doubles its bucket count before the next
//! insertion and rehashes every entry. Capacity never shrinks.

mod iter;

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::iter::repeat_with;

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::constants::{GROWTH_FACTOR, INITIAL_CAPACITY, LOAD_FACTOR};
use crate::{Error, Result};

pub use iter::{IntoIter, Iter, Keys, Values};

pub(crate) type Chain<V> = SmallVec<[Entry<V>; 2]>;

#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    pub(crate) key: SmolStr,
    pub(crate) value: V,
}

#[derive(Clone)]
pub struct ChainedMap<V> {
    buckets: Vec<Option<Chain<V>>>,
    len: usize,
}

fn empty_buckets<V>(capacity: usize) -> Vec<Option<Chain<V>>> {
    repeat_with(|| None).take(capacity).collect()
}

fn hash_key(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

fn bucket_for(key: &str, capacity: usize) -> usize {
    (hash_key(key) % capacity as u64) as usize
}

impl<V> ChainedMap<V> {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates a table with `capacity` buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket index `key` hashes to under the current capacity.
    pub fn find(&self, key: &str) -> usize {
        bucket_for(key, self.buckets.len())
    }

    fn entry(&self, key: &str) -> Option<&Entry<V>> {
        self.buckets[self.find(key)]
            .as_ref()?
            .iter()
            .find(|entry| entry.key.as_str() == key)
    }

    /// Returns the value stored under `key`, or a `KeyNotFound` error.
    pub fn get(&self, key: &str) -> Result<&V> {
        self.lookup(key).ok_or_else(|| Error::key_not_found(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        let index = self.find(key);
        self.buckets[index]
            .as_mut()
            .and_then(|chain| chain.iter_mut().find(|entry| entry.key.as_str() == key))
            .map(|entry| &mut entry.value)
            .ok_or_else(|| Error::key_not_found(key))
    }

    /// Like [`get`](Self::get) but without building an error on a miss.
    pub fn lookup(&self, key: &str) -> Option<&V> {
        self.entry(key).map(|entry| &entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    /// Stores `value` under `key`.
    ///
    /// An existing entry is updated in place and its previous value returned;
    /// the entry count only grows when the key is new.
    pub fn set(&mut self, key: impl Into<SmolStr>, value: V) -> Option<V> {
        let key = key.into();
        let index = self.find(&key);
        if let Some(chain) = self.buckets[index].as_mut() {
            if let Some(entry) = chain.iter_mut().find(|entry| entry.key == key) {
                return Some(std::mem::replace(&mut entry.value, value));
            }
        }

        if self.len as f64 > self.buckets.len() as f64 * LOAD_FACTOR {
            self.expand();
        }
        let index = self.find(&key);
        self.buckets[index]
            .get_or_insert_with(SmallVec::new)
            .push(Entry { key, value });
        self.len += 1;
        None
    }

    /// Multiplies the bucket count by the growth factor and rehashes every
    /// entry into the new buckets.
    pub fn expand(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * GROWTH_FACTOR;
        log::debug!(
            "expanding object table from {old_capacity} to {new_capacity} buckets ({} entries)",
            self.len
        );

        let old_buckets = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old_buckets.into_iter().flatten().flatten() {
            let index = bucket_for(&entry.key, new_capacity);
            self.buckets[index]
                .get_or_insert_with(SmallVec::new)
                .push(entry);
        }
    }

    /// Visits every entry exactly once, bucket by bucket.
    ///
    /// The order depends on the bucket layout, not on insertion order, and is
    /// stable for as long as the table is not modified.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.buckets, self.len)
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    #[cfg(test)]
    pub(crate) fn chain_len(&self, index: usize) -> usize {
        self.buckets[index].as_ref().map_or(0, |chain| chain.len())
    }
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainedMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for ChainedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .all(|(key, value)| other.lookup(key) == Some(value))
    }
}

impl<V: Eq> Eq for ChainedMap<V> {}

impl<K: Into<SmolStr>, V> FromIterator<(K, V)> for ChainedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<SmolStr>, V> Extend<(K, V)> for ChainedMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, V> IntoIterator for &'a ChainedMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for ChainedMap<V> {
    type Item = (SmolStr, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.buckets, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rstest::rstest;

    fn keys_in_same_bucket(capacity: usize, count: usize) -> Vec<String> {
        let target = bucket_for("seed", capacity);
        (0..)
            .map(|n| format!("k{n}"))
            .filter(|key| bucket_for(key, capacity) == target)
            .take(count)
            .collect()
    }

    #[rstest]
    fn starts_empty_with_initial_capacity() {
        let map: ChainedMap<i32> = ChainedMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), INITIAL_CAPACITY);
        assert_eq!(map.iter().count(), 0);
    }

    #[rstest]
    fn zero_capacity_is_clamped() {
        let mut map = ChainedMap::with_capacity(0);
        assert_eq!(map.capacity(), 1);
        map.set("a", 1);
        assert_eq!(map.get("a"), Ok(&1));
    }

    #[rstest]
    fn find_is_content_based_and_in_range() {
        let map: ChainedMap<()> = ChainedMap::with_capacity(7);
        let owned = String::from("alpha");
        assert_eq!(map.find("alpha"), map.find(&owned));
        for n in 0..100 {
            assert!(map.find(&n.to_string()) < 7);
        }
    }

    #[rstest]
    fn colliding_keys_share_a_chain() {
        let keys = keys_in_same_bucket(INITIAL_CAPACITY, 3);
        let mut map = ChainedMap::new();
        for (n, key) in keys.iter().enumerate() {
            map.set(key.as_str(), n);
        }
        let bucket = map.find(&keys[0]);
        assert_eq!(map.chain_len(bucket), 3);
        for (n, key) in keys.iter().enumerate() {
            assert_eq!(map.get(key), Ok(&n));
        }
    }

    #[rstest]
    fn update_replaces_in_place() {
        let keys = keys_in_same_bucket(INITIAL_CAPACITY, 2);
        let mut map = ChainedMap::new();
        map.set(keys[0].as_str(), "first");
        map.set(keys[1].as_str(), "second");
        assert_eq!(map.set(keys[0].as_str(), "third"), Some("first"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.chain_len(map.find(&keys[0])), 2);
        assert_eq!(map.get(&keys[0]), Ok(&"third"));
        assert_eq!(map.get(&keys[1]), Ok(&"second"));
    }

    #[rstest]
    fn missing_key_reports_key_not_found() {
        let keys = keys_in_same_bucket(INITIAL_CAPACITY, 2);
        let mut map = ChainedMap::new();
        map.set(keys[0].as_str(), 1);

        let in_occupied_bucket = map.get(&keys[1]).unwrap_err();
        assert_eq!(in_occupied_bucket.kind, ErrorKind::KeyNotFound);
        assert_eq!(in_occupied_bucket.offset, None);

        let err = map.get("absent").unwrap_err();
        assert_eq!(err.kind, ErrorKind::KeyNotFound);
        assert!(map.get_mut("absent").is_err());
        assert!(map.lookup("absent").is_none());
    }

    #[rstest]
    fn expands_once_load_factor_is_exceeded() {
        let mut map = ChainedMap::new();
        let threshold = (INITIAL_CAPACITY as f64 * LOAD_FACTOR) as usize + 1;
        for n in 0..threshold {
            map.set(format!("key{n}"), n);
        }
        assert_eq!(map.capacity(), INITIAL_CAPACITY);

        map.set("one more", threshold);
        assert_eq!(map.capacity(), INITIAL_CAPACITY * GROWTH_FACTOR);
        assert_eq!(map.len(), threshold + 1);
        for n in 0..threshold {
            assert_eq!(map.get(&format!("key{n}")), Ok(&n));
        }
        assert_eq!(map.get("one more"), Ok(&threshold));
    }

    #[rstest]
    fn updates_never_expand() {
        let mut map = ChainedMap::with_capacity(4);
        for n in 0..3 {
            map.set(format!("key{n}"), n);
        }
        let capacity = map.capacity();
        for _ in 0..10 {
            map.set("key0", 99);
        }
        assert_eq!(map.capacity(), capacity);
        assert_eq!(map.len(), 3);
    }

    #[rstest]
    fn explicit_expand_rehashes_everything() {
        let mut map: ChainedMap<usize> = (0..10).map(|n| (format!("k{n}"), n)).collect();
        let before = map.capacity();
        map.expand();
        assert_eq!(map.capacity(), before * GROWTH_FACTOR);
        assert_eq!(map.len(), 10);
        for n in 0..10 {
            let key = format!("k{n}");
            assert_eq!(map.get(&key), Ok(&n));
            let bucket = map.find(&key);
            assert!(map.chain_len(bucket) >= 1);
        }
    }

    #[rstest]
    fn get_mut_writes_through() {
        let mut map = ChainedMap::new();
        map.set("count", 1);
        *map.get_mut("count").unwrap() += 41;
        assert_eq!(map.get("count"), Ok(&42));
    }

    #[rstest]
    fn equality_ignores_layout() {
        let mut small = ChainedMap::with_capacity(1);
        let mut large = ChainedMap::with_capacity(97);
        for n in 0..20 {
            small.set(format!("k{n}"), n);
        }
        for n in (0..20).rev() {
            large.set(format!("k{n}"), n);
        }
        assert_eq!(small, large);

        large.set("k0", -1);
        assert_ne!(small, large);
    }

    #[rstest]
    fn debug_renders_as_map() {
        let mut map = ChainedMap::new();
        map.set("a", 1);
        assert_eq!(format!("{map:?}"), "{\"a\": 1}");
    }
}
