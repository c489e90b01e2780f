use dashmap::DashMap;
use rayon::prelude::*;

use crate::entry::NodeEntry;
use crate::key::Key;
use crate::value::NodeValue;

///
/// A concurrent handle onto the evaluation graph's nodes, keyed by `Key`.
/// Backed by a sharded `DashMap`, so that the mark and sweep phases can read
/// and remove entries from many threads at once without a single global
/// lock. Graph construction is out of scope for this crate: production use
/// assumes the graph is populated by the evaluation engine before `focus`
/// runs; `insert` exists for building fixtures.
///
pub struct GraphHandle<K: Key, V: NodeValue> {
    nodes: DashMap<K, NodeEntry<K, V>>,
}

impl<K: Key, V: NodeValue> Default for GraphHandle<K, V> {
    fn default() -> Self {
        GraphHandle {
            nodes: DashMap::new(),
        }
    }
}

impl<K: Key, V: NodeValue> GraphHandle<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<NodeEntry<K, V>> {
        self.nodes.get(key).map(|r| r.value().clone())
    }

    pub fn insert(&self, key: K, entry: NodeEntry<K, V>) {
        self.nodes.insert(key, entry);
    }

    pub fn remove(&self, key: &K) -> Option<NodeEntry<K, V>> {
        self.nodes.remove(key).map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    ///
    /// Visits every node currently in the graph exactly once, in parallel.
    /// Takes a consistent snapshot of the live key set up front (concurrent
    /// `insert` never happens during a focus call; only `remove`, which the
    /// visitor itself is responsible for issuing via `graph.remove`), then
    /// drives a `rayon` `par_iter()` over it. The visitor is handed the
    /// entry by value (an `Arc` clone) rather than a `DashMap` reference, so
    /// it is free to call back into `graph.remove` without deadlocking on
    /// its own shard lock.
    ///
    pub fn parallel_for_each<F>(&self, visitor: F)
    where
        F: Fn(&GraphHandle<K, V>, &K, &NodeEntry<K, V>) + Sync,
    {
        let keys: Vec<K> = self.nodes.iter().map(|r| r.key().clone()).collect();
        keys.par_iter().for_each(|key| {
            let Some(entry) = self.get(key) else {
                return;
            };
            visitor(self, key, &entry);
        });
    }

    ///
    /// Releases any spare capacity the shard maps are holding after a sweep
    /// has removed a large fraction of the graph.
    ///
    pub fn shrink(&self) {
        self.nodes.shrink_to_fit();
    }
}
