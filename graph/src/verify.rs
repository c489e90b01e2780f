use crate::error::FocusError;
use crate::key::Key;
use crate::state::FocusState;
use crate::value::NodeValue;

///
/// The downward half of the mark phase: given a dep that was just newly
/// added to `kept_deps`, decides whether it anchors the verification set
/// directly (a filesystem witness) or needs to be walked further.
///
/// Recursion happens by enqueueing another task on the *same* `rayon::Scope`
/// the mark phase is using, never by recursing on the Rust call stack — an
/// evaluation graph's forward-dep chains can be far deeper than a thread's
/// stack can comfortably hold.
///
pub(crate) fn maybe_collect_verification<'g, 's, K: Key, V: NodeValue>(
    scope: &rayon::Scope<'s>,
    state: &'s FocusState<'g, K, V>,
    key: K,
) where
    'g: 's,
{
    if state.has_failed() {
        return;
    }

    // A dep that is itself being retained as a frontier or an rdep needs no
    // verification witness of its own: it is already fully protected.
    if state.kept_rdeps.contains(&key) {
        return;
    }

    if key.is_filesystem_witness() {
        state.verification_set.insert(key);
        return;
    }

    if !state.verification_set_seen.insert(key.clone()) {
        // Already walked (or queued to be walked) by another branch.
        return;
    }

    scope.spawn(move |s| {
        if state.has_failed() {
            return;
        }
        let Some(entry) = state.graph.get(&key) else {
            state.fail(FocusError::InvariantViolation(format!(
                "verification collector reached {key}, which has no node entry"
            )));
            return;
        };

        for dep in entry.direct_deps() {
            maybe_collect_verification(s, state, dep);
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::FocusConfig;
    use crate::entry::{Lifecycle, NodeEntry};
    use crate::handle::GraphHandle;
    use crate::test_support::{witness, UnitValue};

    use super::*;

    fn done(graph: &GraphHandle<u32, UnitValue>, key: u32, deps: Vec<u32>) {
        graph.insert(
            key,
            NodeEntry::new(
                Lifecycle::Done,
                Some(Arc::new(UnitValue)),
                deps,
                Default::default(),
            ),
        );
    }

    #[test]
    fn witness_is_collected_without_walking_further() {
        let graph: GraphHandle<u32, UnitValue> = GraphHandle::new();
        let w = witness(1);
        done(&graph, w, vec![999]); // deps on a witness are never consulted.

        let config = FocusConfig::default();
        let state = FocusState::new(&graph, &config);
        rayon::scope(|s| {
            maybe_collect_verification(s, &state, w);
        });

        assert!(state.verification_set.contains(&w));
        assert!(state.take_error().is_none());
    }

    #[test]
    fn non_witness_dep_is_walked_to_its_own_witness_deps() {
        let graph: GraphHandle<u32, UnitValue> = GraphHandle::new();
        let w = witness(1);
        done(&graph, 10, vec![w]);
        done(&graph, w, vec![]);

        let config = FocusConfig::default();
        let state = FocusState::new(&graph, &config);
        rayon::scope(|s| {
            maybe_collect_verification(s, &state, 10);
        });

        assert!(state.verification_set.contains(&w));
        assert!(!state.verification_set.contains(&10));
    }

    #[test]
    fn missing_entry_is_an_invariant_violation() {
        let graph: GraphHandle<u32, UnitValue> = GraphHandle::new();
        let config = FocusConfig::default();
        let state = FocusState::new(&graph, &config);
        rayon::scope(|s| {
            maybe_collect_verification(s, &state, 42);
        });

        assert!(matches!(
            state.take_error(),
            Some(FocusError::InvariantViolation(_))
        ));
    }
}
