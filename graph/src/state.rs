use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashSet;
use parking_lot::Mutex;

use crate::config::FocusConfig;
use crate::error::FocusError;
use crate::handle::GraphHandle;
use crate::key::Key;
use crate::value::NodeValue;

///
/// The mutable state shared by every task spawned during the mark phase and
/// the verification collector. Held behind an `Arc` so that `rayon::Scope`
/// closures can cheaply clone a reference into themselves instead of fighting
/// the scope's lifetime.
///
pub(crate) struct FocusState<'g, K: Key, V: NodeValue> {
    pub(crate) graph: &'g GraphHandle<K, V>,
    pub(crate) config: &'g FocusConfig,

    pub(crate) kept_rdeps: DashSet<K>,
    pub(crate) kept_deps: DashSet<K>,
    pub(crate) verification_set: DashSet<K>,
    pub(crate) verification_set_seen: DashSet<K>,

    pub(crate) rdep_edges_before: AtomicU64,
    pub(crate) rdep_edges_after: AtomicU64,

    error: Mutex<Option<FocusError<K>>>,
}

impl<'g, K: Key, V: NodeValue> FocusState<'g, K, V> {
    pub(crate) fn new(graph: &'g GraphHandle<K, V>, config: &'g FocusConfig) -> Self {
        FocusState {
            graph,
            config,
            kept_rdeps: DashSet::new(),
            kept_deps: DashSet::new(),
            verification_set: DashSet::new(),
            verification_set_seen: DashSet::new(),
            rdep_edges_before: AtomicU64::new(0),
            rdep_edges_after: AtomicU64::new(0),
            error: Mutex::new(None),
        }
    }

    ///
    /// Records the first failure seen by any task. Later failures are
    /// dropped: we only ever surface one error to the caller, and the first
    /// one is as good a diagnostic as any.
    ///
    pub(crate) fn fail(&self, e: FocusError<K>) {
        let mut slot = self.error.lock();
        if slot.is_none() {
            *slot = Some(e);
        }
    }

    pub(crate) fn has_failed(&self) -> bool {
        self.error.lock().is_some()
    }

    pub(crate) fn take_error(&self) -> Option<FocusError<K>> {
        self.error.lock().take()
    }

    pub(crate) fn warn_if_over_threshold(&self, key: &K, fanout: usize, kind: &str) {
        if fanout as u64 > self.config.fanout_warn_threshold {
            log::warn!(
                "node {key} has {fanout} {kind} (over the {} warning threshold)",
                self.config.fanout_warn_threshold
            );
        }
    }
}
