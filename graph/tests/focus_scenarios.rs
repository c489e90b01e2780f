//! End-to-end scenarios run through the public `focus` entry point, rather
//! than the mark/verify/sweep internals exercised by each module's own unit
//! tests.

mod support;

use std::collections::HashSet;

use cache::{InMemoryActionCache, OutputPath};
use graph::{focus, FocusConfig, GraphHandle, Lifecycle};

use support::{insert_done, insert_not_done, TestKey, TestValue};

fn set(keys: &[TestKey]) -> HashSet<TestKey> {
    keys.iter().cloned().collect()
}

/// S1: `R -> M -> L`, all Done. Every node lands in `rdeps`, nothing is
/// left in `deps` or the verification set, and no edges are dropped.
#[test]
fn linear_chain_collapses_to_a_single_rdep_chain() {
    let graph: GraphHandle<TestKey, TestValue> = GraphHandle::new();
    let (r, m, l) = (TestKey::new(1), TestKey::new(2), TestKey::new(3));

    insert_done(&graph, r.clone(), TestValue::new(), vec![m.clone()], vec![]);
    insert_done(&graph, m.clone(), TestValue::new(), vec![l.clone()], vec![r.clone()]);
    insert_done(&graph, l.clone(), TestValue::new(), vec![], vec![m.clone()]);

    let config = FocusConfig::default();
    let result = focus(&graph, None, set(&[r.clone()]), set(&[l.clone()]), &config).unwrap();

    assert_eq!(result.rdeps, set(&[l.clone(), m.clone(), r.clone()]));
    assert!(result.deps.is_empty());
    assert!(result.verification_set.is_empty());

    let m_entry = graph.get(&m).unwrap();
    assert_eq!(m_entry.reverse_deps_done(), vec![r]);
}

/// S2: a diamond (`R -> {A, B}`, both `-> L` and `-> W`) where `W` is a
/// filesystem witness outside the leaves. `A` and `B` lose their edge onto
/// `W` since nothing retained depends on `W` directly.
#[test]
fn diamond_retains_external_witness_and_flattens_its_rdeps() {
    let graph: GraphHandle<TestKey, TestValue> = GraphHandle::new();
    let (r, a, b, l, w) = (
        TestKey::new(1),
        TestKey::new(2),
        TestKey::new(3),
        TestKey::new(4),
        TestKey::witness(5),
    );

    insert_done(&graph, r.clone(), TestValue::new(), vec![a.clone(), b.clone()], vec![]);
    insert_done(&graph, a.clone(), TestValue::new(), vec![l.clone(), w.clone()], vec![r.clone()]);
    insert_done(&graph, b.clone(), TestValue::new(), vec![l.clone(), w.clone()], vec![r.clone()]);
    insert_done(&graph, l.clone(), TestValue::new(), vec![], vec![a.clone(), b.clone()]);
    insert_done(&graph, w.clone(), TestValue::new(), vec![], vec![a.clone(), b.clone()]);

    let config = FocusConfig::default();
    let result = focus(&graph, None, set(&[r.clone()]), set(&[l.clone()]), &config).unwrap();

    assert_eq!(result.rdeps, set(&[l, a, b, r]));
    assert!(result.deps.is_empty());
    assert_eq!(result.verification_set, set(&[w.clone()]));

    let w_entry = graph.get(&w).unwrap();
    assert!(w_entry.reverse_deps_done().is_empty());
}

/// S3: the S1 chain plus an unrelated Done node reachable from no leaf.
/// It is deleted outright, and its action outputs are evicted.
#[test]
fn unrelated_subgraph_is_deleted_and_its_outputs_evicted() {
    let graph: GraphHandle<TestKey, TestValue> = GraphHandle::new();
    let (r, m, l, u) = (TestKey::new(1), TestKey::new(2), TestKey::new(3), TestKey::new(4));

    insert_done(&graph, r.clone(), TestValue::new(), vec![m.clone()], vec![]);
    insert_done(&graph, m.clone(), TestValue::new(), vec![l.clone()], vec![r.clone()]);
    insert_done(&graph, l.clone(), TestValue::new(), vec![], vec![m.clone()]);

    let output = OutputPath::new("out/u.o");
    let action_cache = InMemoryActionCache::new();
    action_cache.insert(output.clone());
    insert_done(
        &graph,
        u.clone(),
        TestValue::with_actions(vec![graph::Action::new(vec![output.clone()])]),
        vec![],
        vec![],
    );

    let config = FocusConfig::default();
    let result = focus(&graph, Some(&action_cache), set(&[r]), set(&[l]), &config).unwrap();

    assert!(graph.get(&u).is_none());
    assert!(!action_cache.contains(&output));
    assert!(!result.rdeps.contains(&u));
    assert!(!result.deps.contains(&u));
    assert!(!result.verification_set.contains(&u));
}

/// S4: same chain as S1, but `M` is stuck in `CheckDependencies`. Visiting
/// it demotes it out of `kept_rdeps` instead of propagating to `R`, and it
/// survives the sweep untouched because it is not Done.
#[test]
fn check_dependencies_node_is_demoted_and_retained_not_done() {
    let graph: GraphHandle<TestKey, TestValue> = GraphHandle::new();
    let (r, m, l) = (TestKey::new(1), TestKey::new(2), TestKey::new(3));

    insert_done(&graph, r.clone(), TestValue::new(), vec![m.clone()], vec![]);
    insert_not_done(&graph, m.clone(), Lifecycle::CheckDependencies, vec![r.clone()]);
    insert_done(&graph, l.clone(), TestValue::new(), vec![], vec![m.clone()]);

    let config = FocusConfig::default();
    let result = focus(&graph, None, set(&[r.clone()]), set(&[l.clone()]), &config).unwrap();

    assert_eq!(result.rdeps, set(&[l]));
    assert!(result.deps.contains(&r));

    let m_entry = graph.get(&m).expect("CheckDependencies node must survive sweep");
    assert!(!m_entry.is_done());
}

/// S5: `R -> N`, where `N` is a nested-set-of-artifacts key expanding to
/// `{a1, a2}`, and `a1` has a direct dep on the filesystem witness `W1`.
/// Degenerate case: the one leaf is also the one root.
#[test]
fn nested_artifact_set_expands_and_its_witness_is_collected() {
    let graph: GraphHandle<TestKey, TestValue> = GraphHandle::new();
    let w1 = TestKey::witness(10);
    let a1 = TestKey::new(2);
    let a2 = TestKey::new(3);
    let n = TestKey::nested_set(1, vec![a1.clone(), a2.clone()]);
    let r = TestKey::new(0);

    insert_done(&graph, r.clone(), TestValue::new(), vec![n.clone()], vec![]);
    insert_done(&graph, n.clone(), TestValue::new(), vec![], vec![r.clone()]);
    insert_done(&graph, a1.clone(), TestValue::new(), vec![w1.clone()], vec![]);
    insert_done(&graph, a2.clone(), TestValue::new(), vec![], vec![]);
    insert_done(&graph, w1.clone(), TestValue::new(), vec![], vec![a1.clone()]);

    let config = FocusConfig::default();
    let result = focus(&graph, None, set(&[r.clone()]), set(&[r.clone()]), &config).unwrap();

    assert!(result.deps.contains(&n));
    assert!(result.deps.contains(&a1));
    assert!(result.deps.contains(&a2));
    assert_eq!(result.verification_set, set(&[w1]));
    assert!(result.rdeps.contains(&r));
}

/// S6: running the diamond scenario twice in a row, with identical
/// `roots`/`leaves`, produces identical result sets and non-increasing edge
/// counts.
#[test]
fn focus_is_idempotent_on_an_already_focused_graph() {
    let graph: GraphHandle<TestKey, TestValue> = GraphHandle::new();
    let (r, a, b, l, w) = (
        TestKey::new(1),
        TestKey::new(2),
        TestKey::new(3),
        TestKey::new(4),
        TestKey::witness(5),
    );

    insert_done(&graph, r.clone(), TestValue::new(), vec![a.clone(), b.clone()], vec![]);
    insert_done(&graph, a.clone(), TestValue::new(), vec![l.clone(), w.clone()], vec![r.clone()]);
    insert_done(&graph, b.clone(), TestValue::new(), vec![l.clone(), w.clone()], vec![r.clone()]);
    insert_done(&graph, l.clone(), TestValue::new(), vec![], vec![a.clone(), b.clone()]);
    insert_done(&graph, w.clone(), TestValue::new(), vec![], vec![a.clone(), b.clone()]);

    let config = FocusConfig::default();
    let first = focus(&graph, None, set(&[r.clone()]), set(&[l.clone()]), &config).unwrap();
    let second = focus(&graph, None, set(&[r]), set(&[l]), &config).unwrap();

    assert_eq!(first.rdeps, second.rdeps);
    assert_eq!(first.deps, second.deps);
    assert_eq!(first.verification_set, second.verification_set);
    assert!(second.rdep_edges_after <= first.rdep_edges_after);
    assert_eq!(second.rdep_edges_after, second.rdep_edges_before);
}
