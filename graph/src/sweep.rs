use std::sync::atomic::Ordering;

use cache::ActionCache;

use crate::handle::GraphHandle;
use crate::key::Key;
use crate::state::FocusState;
use crate::value::NodeValue;

///
/// Rewrites every node in the graph in a single independent parallel pass,
/// per the four-way classification: retained-as-rdep, retained-as-dep
/// (frontier), retained-as-verification-witness, or deleted.
///
pub(crate) fn run<K: Key, V: NodeValue>(
    graph: &GraphHandle<K, V>,
    action_cache: Option<&dyn ActionCache>,
    state: &FocusState<'_, K, V>,
) {
    let _region = crate::profile::Region::start("focus.sweep");

    graph.parallel_for_each(|graph, key, entry| {
        if state.kept_rdeps.contains(key) {
            // Untouched: this node keeps its full dep/rdep edge set.
            return;
        }

        if state.kept_deps.contains(key) {
            // A frontier node: it will never be dirtied by this focus, so
            // its outgoing dep edges (which exist only to know what to
            // recompute) are no longer needed. Its reverse deps are pruned
            // down to the ones that are themselves being kept as rdeps.
            entry.clear_direct_deps_for_focus();
            prune_reverse_deps(state, entry);
            return;
        }

        if state.verification_set.contains(key) {
            // A verification witness: keeps its value (it may still be
            // consulted to detect filesystem changes) but loses every
            // reverse dep, since nothing retained depends on it directly.
            let before = entry.reverse_deps_done();
            state
                .rdep_edges_before
                .fetch_add(before.len() as u64, Ordering::Relaxed);
            for rdep in before {
                entry.remove_reverse_dep(&rdep);
            }
            entry.consolidate_reverse_deps();
            return;
        }

        if !entry.is_done() {
            // Not yet computed: retained untouched, there is nothing to
            // collapse or delete.
            return;
        }

        // Neither an rdep, a frontier dep, nor a verification witness, and
        // fully computed: this node is being dropped from the graph.
        if let Some(cache) = action_cache {
            if let Some(value) = entry.value() {
                if let Some(action_lookup) = value.as_action_lookup() {
                    for action in action_lookup.actions() {
                        for output in action.output_paths() {
                            cache.remove(output);
                        }
                    }
                }
            }
        }
        graph.remove(key);
    });

    graph.shrink();
}

fn prune_reverse_deps<K: Key, V: NodeValue>(state: &FocusState<'_, K, V>, entry: &crate::entry::NodeEntry<K, V>) {
    let rdeps = entry.reverse_deps_done();
    state
        .rdep_edges_before
        .fetch_add(rdeps.len() as u64, Ordering::Relaxed);
    for rdep in rdeps {
        if state.kept_rdeps.contains(&rdep) {
            state.rdep_edges_after.fetch_add(1, Ordering::Relaxed);
        } else {
            entry.remove_reverse_dep(&rdep);
        }
    }
    entry.consolidate_reverse_deps();
}
