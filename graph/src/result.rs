use std::collections::HashSet;
use std::sync::atomic::Ordering;

use crate::key::Key;
use crate::state::FocusState;

///
/// An immutable snapshot of what a `focus` call decided, handed back to the
/// caller once the mark and sweep phases have both completed. None of its
/// fields are live views onto the graph: the graph may continue to change
/// after `focus` returns.
///
#[derive(Debug)]
pub struct FocusResult<K: Key> {
    pub roots: HashSet<K>,
    pub leaves: HashSet<K>,
    pub rdeps: HashSet<K>,
    pub deps: HashSet<K>,
    pub verification_set: HashSet<K>,
    pub rdep_edges_before: u64,
    pub rdep_edges_after: u64,
}

pub(crate) fn snapshot<K: Key, V: crate::value::NodeValue>(
    roots: HashSet<K>,
    leaves: HashSet<K>,
    state: FocusState<'_, K, V>,
) -> FocusResult<K> {
    FocusResult {
        roots,
        leaves,
        rdeps: state.kept_rdeps.into_iter().collect(),
        deps: state.kept_deps.into_iter().collect(),
        verification_set: state.verification_set.into_iter().collect(),
        rdep_edges_before: state.rdep_edges_before.load(Ordering::Relaxed),
        rdep_edges_after: state.rdep_edges_after.load(Ordering::Relaxed),
    }
}
