//! Sharded concurrent accumulator, used by the parallel scorer to let many
//! threads add relevance contributions for many documents without a single
//! global lock. Each shard is an independent `parking_lot::Mutex`-guarded
//! `HashMap`; a key always maps to the same shard, so callers touching keys
//! in different shards never contend.

use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::core::types::DocumentId;

pub struct ShardedAccumulator {
    shards: Vec<Mutex<HashMap<DocumentId, f64>>>,
}

/// Scoped mutable reference into one accumulator slot. Holds the shard's
/// lock for its entire lifetime and releases it on drop, including on
/// unwind from a panicking caller.
pub struct AccumulatorEntry<'a> {
    guard: MutexGuard<'a, HashMap<DocumentId, f64>>,
    key: DocumentId,
}

impl Deref for AccumulatorEntry<'_> {
    type Target = f64;
    fn deref(&self) -> &f64 {
        self.guard.get(&self.key).expect("entry inserted on creation")
    }
}

impl DerefMut for AccumulatorEntry<'_> {
    fn deref_mut(&mut self) -> &mut f64 {
        self.guard.get_mut(&self.key).expect("entry inserted on creation")
    }
}

impl ShardedAccumulator {
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        let mut shards = Vec::with_capacity(shard_count);
        shards.resize_with(shard_count, || Mutex::new(HashMap::new()));
        ShardedAccumulator { shards }
    }

    fn shard_index(&self, key: DocumentId) -> usize {
        (key.rem_euclid(self.shards.len() as i64)) as usize
    }

    /// Returns a scoped mutable reference to the slot for `key`, creating a
    /// default (`0.0`) entry if absent. Holds only that key's shard lock.
    pub fn at(&self, key: DocumentId) -> AccumulatorEntry<'_> {
        let idx = self.shard_index(key);
        let mut guard = self.shards[idx].lock();
        guard.entry(key).or_insert(0.0);
        AccumulatorEntry { guard, key }
    }

    /// Adds `delta` to the slot for `key`, creating it if absent.
    pub fn accumulate(&self, key: DocumentId, delta: f64) {
        *self.at(key) += delta;
    }

    /// Removes the entry for `key`, if present. Acquires only that shard's lock.
    pub fn erase(&self, key: DocumentId) {
        let idx = self.shard_index(key);
        self.shards[idx].lock().remove(&key);
    }

    /// Materialises a single consolidated mapping by acquiring each shard's
    /// lock in turn. Not atomic across shards as a whole, but each shard is
    /// self-consistent at the moment it is read.
    pub fn build_ordinary_map(&self) -> HashMap<DocumentId, f64> {
        let mut result = HashMap::new();
        for shard in &self.shards {
            result.extend(shard.lock().iter().map(|(&k, &v)| (k, v)));
        }
        result
    }
}
