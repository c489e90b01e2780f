use crate::entry::Lifecycle;
use crate::error::FocusError;
use crate::key::Key;
use crate::state::FocusState;
use crate::value::NodeValue;
use crate::verify;

///
/// Visits a single node reached via the upward (reverse-dep) walk. Looks up
/// its reverse deps to continue the walk further up, and its direct deps to
/// seed the verification collector with whatever this node needs as input.
///
/// Spawned onto the same `rayon::Scope` as every other mark/verify task, so
/// that the walk never recurses on the call stack.
///
pub(crate) fn visit_node<'g, 's, K: Key, V: NodeValue>(
    scope: &rayon::Scope<'s>,
    state: &'s FocusState<'g, K, V>,
    key: K,
) where
    'g: 's,
{
    if state.has_failed() {
        return;
    }

    let Some(entry) = state.graph.get(&key) else {
        if state.config.strict {
            state.fail(FocusError::MissingNode(key));
        } else {
            log::warn!("focus leaf {key} has no corresponding node entry; skipping");
        }
        return;
    };

    let lifecycle = entry.lifecycle();
    if lifecycle != Lifecycle::Done {
        match lifecycle {
            Lifecycle::CheckDependencies => {
                // This node was re-checked and found unchanged last run: its
                // identity as an rdep of whatever led us here is no longer
                // certain, so it is demoted rather than trusted.
                state.kept_rdeps.remove(&key);
                return;
            }
            Lifecycle::Other | Lifecycle::Done => {
                if state.config.strict {
                    state.fail(FocusError::NotDone(key));
                } else {
                    log::warn!("node {key} visited during mark is not Done; skipping");
                }
                return;
            }
        }
    }

    let rdeps = entry.reverse_deps_done();
    state.warn_if_over_threshold(&key, rdeps.len(), "reverse deps");
    for rdep in rdeps {
        if state.kept_rdeps.insert(rdep.clone()) {
            scope.spawn(move |s| visit_node(s, state, rdep));
        }
    }

    let deps = entry.direct_deps();
    state.warn_if_over_threshold(&key, deps.len(), "direct deps");
    for dep in deps {
        collect_dep(scope, state, dep);
    }
}

///
/// Protects a single direct dep of a visited node, and expands one level of
/// nested-artifact-set membership if the dep addresses one.
///
fn collect_dep<'g, 's, K: Key, V: NodeValue>(
    scope: &rayon::Scope<'s>,
    state: &'s FocusState<'g, K, V>,
    dep: K,
) where
    'g: 's,
{
    let nested: Vec<K> = dep.nested_artifacts().map(<[K]>::to_vec).unwrap_or_default();

    if state.kept_deps.insert(dep.clone()) {
        scope.spawn(move |s| verify::maybe_collect_verification(s, state, dep));
    }

    for artifact in nested {
        if state.kept_deps.insert(artifact.clone()) {
            scope.spawn(move |s| verify::maybe_collect_verification(s, state, artifact));
        }
    }
}

///
/// Runs the mark phase (and, within the same `rayon::Scope`, the
/// verification collector it feeds) to completion. Returns the populated
/// `FocusState` on success, after applying the post-mark set subtractions
/// described in the design notes:
///
/// * `kept_deps -= kept_rdeps` (a node that is both an rdep and a dep is
///   only ever treated as an rdep).
/// * `verification_set -= kept_deps` (a witness that is also a retained dep
///   needs no separate verification entry — it is already a frontier).
/// * `verification_set -= kept_rdeps` (a witness can also race into
///   `kept_rdeps` via a sibling branch of the same walk that reaches it
///   before the insert feeding the first subtraction above is visible; this
///   pass catches that race against the final `kept_rdeps`).
///
pub(crate) fn run<'g, K: Key, V: NodeValue>(
    graph: &'g crate::handle::GraphHandle<K, V>,
    config: &'g crate::config::FocusConfig,
    roots: &std::collections::HashSet<K>,
    leaves: &std::collections::HashSet<K>,
) -> Result<FocusState<'g, K, V>, FocusError<K>> {
    let state = FocusState::new(graph, config);

    for root in roots {
        state.kept_deps.insert(root.clone());
    }

    {
        let _region = crate::profile::Region::start("focus.mark");
        let state = &state;
        rayon::scope(|s| {
            for leaf in leaves {
                if state.kept_rdeps.insert(leaf.clone()) {
                    let leaf = leaf.clone();
                    s.spawn(move |s2| visit_node(s2, state, leaf));
                }
            }
        });
    }

    if let Some(err) = state.take_error() {
        return Err(err);
    }

    reconcile_post_mark_sets(&state);

    Ok(state)
}

///
/// Applies the post-mark set subtractions once the rdep walk and its
/// verification collector have reached full quiescence.
///
fn reconcile_post_mark_sets<K: Key, V: NodeValue>(state: &FocusState<'_, K, V>) {
    for k in state.kept_rdeps.iter() {
        state.kept_deps.remove(k.key());
    }
    for k in state.kept_deps.iter() {
        state.verification_set.remove(k.key());
    }
    // A key can race into both `kept_rdeps` and `verification_set`: the
    // rdep walk inserting it into `kept_rdeps` and a sibling task's
    // `maybe_collect_verification` reading `kept_rdeps` before that insert
    // is visible are not ordered by anything. The first subtraction above
    // only clears `verification_set` of what was *also* a surviving
    // kept-dep, so a racing witness needs its own pass against the final
    // `kept_rdeps` to uphold invariant 7 (and property 1's disjointness).
    for k in state.kept_rdeps.iter() {
        state.verification_set.remove(k.key());
    }
}
