use std::iter::FusedIterator;

use smol_str::SmolStr;

use super::{Chain, Entry};

/// Borrowing cursor over a [`ChainedMap`](super::ChainedMap).
///
/// The cursor is a pair of positions: the current bucket and the slot within
/// that bucket's chain. Empty buckets are skipped. Calling `iter()` again
/// starts a fresh walk from bucket zero.
pub struct Iter<'a, V> {
    buckets: &'a [Option<Chain<V>>],
    bucket: usize,
    slot: usize,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(buckets: &'a [Option<Chain<V>>], len: usize) -> Self {
        Self {
            buckets,
            bucket: 0,
            slot: 0,
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let buckets = self.buckets;
        loop {
            let chain = buckets.get(self.bucket)?;
            if let Some(entry) = chain.as_ref().and_then(|chain| chain.get(self.slot)) {
                self.slot += 1;
                self.remaining -= 1;
                return Some((entry.key.as_str(), &entry.value));
            }
            self.bucket += 1;
            self.slot = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets,
            bucket: self.bucket,
            slot: self.slot,
            remaining: self.remaining,
        }
    }
}

pub struct Keys<'a, V> {
    pub(super) inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

pub struct Values<'a, V> {
    pub(super) inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

/// Owning iterator; yields entries in the same order as [`Iter`].
pub struct IntoIter<V> {
    buckets: std::vec::IntoIter<Option<Chain<V>>>,
    chain: Option<smallvec::IntoIter<[Entry<V>; 2]>>,
    remaining: usize,
}

impl<V> IntoIter<V> {
    pub(super) fn new(buckets: Vec<Option<Chain<V>>>, len: usize) -> Self {
        Self {
            buckets: buckets.into_iter(),
            chain: None,
            remaining: len,
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (SmolStr, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some((entry.key, entry.value));
            }
            self.chain = Some(self.buckets.next()?.unwrap_or_default().into_iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
