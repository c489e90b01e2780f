use std::sync::Arc;

use fnv::FnvHashSet;
use parking_lot::Mutex;

use crate::key::Key;
use crate::value::NodeValue;

///
/// The lifecycle state of a node entry, matching the three-way split the
/// evaluation engine tracks: a node is either fully `Done` (has a value and
/// a stable dep set), is mid-recomputation but provisionally `Done` the last
/// time around (`CheckDependencies`), or is some other not-yet-done state
/// (`Other`, covering "running" and "dirty-and-not-yet-restarted").
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lifecycle {
    Done,
    CheckDependencies,
    Other,
}

struct InnerEntry<K, V> {
    lifecycle: Lifecycle,
    value: Option<Arc<V>>,
    direct_deps: Vec<K>,
    reverse_deps: FnvHashSet<K>,
}

///
/// A single node's state in the graph, addressed by `Key`. Mirrors the
/// evaluation engine's `Entry<N>`: a cheaply-cloneable handle around a
/// mutex-guarded inner state, so that many concurrent mark/sweep tasks can
/// hold a reference to the same entry without contending on the graph's own
/// map.
///
#[derive(Clone)]
pub struct NodeEntry<K: Key, V: NodeValue> {
    inner: Arc<Mutex<InnerEntry<K, V>>>,
}

impl<K: Key, V: NodeValue> NodeEntry<K, V> {
    pub fn new(
        lifecycle: Lifecycle,
        value: Option<Arc<V>>,
        direct_deps: Vec<K>,
        reverse_deps: FnvHashSet<K>,
    ) -> Self {
        NodeEntry {
            inner: Arc::new(Mutex::new(InnerEntry {
                lifecycle,
                value,
                direct_deps,
                reverse_deps,
            })),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.lock().lifecycle
    }

    pub fn is_done(&self) -> bool {
        self.lifecycle() == Lifecycle::Done
    }

    pub fn value(&self) -> Option<Arc<V>> {
        self.inner.lock().value.clone()
    }

    ///
    /// A snapshot of this node's direct (forward) deps.
    ///
    pub fn direct_deps(&self) -> Vec<K> {
        self.inner.lock().direct_deps.clone()
    }

    ///
    /// A snapshot of this node's reverse deps. Only meaningful once the node
    /// is `Done`: a node that is still being computed may gain further
    /// reverse deps after this snapshot is taken, so callers (the mark and
    /// sweep phases) only ever call this on nodes they have already
    /// confirmed are `Done`.
    ///
    pub fn reverse_deps_done(&self) -> Vec<K> {
        self.inner.lock().reverse_deps.iter().cloned().collect()
    }

    ///
    /// Drops this node's outgoing dep edges. Called by the sweep phase on
    /// frontier nodes (kept via `kept_deps`): a frontier node will never be
    /// dirtied by this focus, so the edges describing what it would need to
    /// recompute are dead weight.
    ///
    pub fn clear_direct_deps_for_focus(&self) {
        self.inner.lock().direct_deps.clear();
    }

    ///
    /// Removes a single reverse dep edge, e.g. because the far end is being
    /// deleted from the graph.
    ///
    pub fn remove_reverse_dep(&self, k: &K) {
        self.inner.lock().reverse_deps.remove(k);
    }

    ///
    /// Shrinks the reverse-dep set's backing storage after a batch of
    /// removals. A no-op correctness-wise; present so the sweep phase can
    /// reclaim memory from a set that may have shed most of its entries.
    ///
    pub fn consolidate_reverse_deps(&self) {
        self.inner.lock().reverse_deps.shrink_to_fit();
    }
}
