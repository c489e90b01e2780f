//! Shared fixtures for the integration tests in this crate: a `Key`
//! implementation rich enough to exercise filesystem witnesses and
//! nested-set-of-artifacts expansion, which `test_support::Key for u32`
//! (used by the crate's inline unit tests) deliberately leaves out.

use std::fmt;
use std::sync::Arc;

use graph::{Action, ActionLookupValue, GraphHandle, Key, Lifecycle, NodeEntry, NodeValue};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestKey {
    id: u32,
    witness: bool,
    nested: Arc<Vec<TestKey>>,
}

impl TestKey {
    pub fn new(id: u32) -> Self {
        TestKey {
            id,
            witness: false,
            nested: Arc::new(Vec::new()),
        }
    }

    pub fn witness(id: u32) -> Self {
        TestKey {
            id,
            witness: true,
            nested: Arc::new(Vec::new()),
        }
    }

    pub fn nested_set(id: u32, members: Vec<TestKey>) -> Self {
        TestKey {
            id,
            witness: false,
            nested: Arc::new(members),
        }
    }
}

impl fmt::Display for TestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k{}", self.id)
    }
}

impl Key for TestKey {
    fn is_filesystem_witness(&self) -> bool {
        self.witness
    }

    fn nested_artifacts(&self) -> Option<&[Self]> {
        if self.nested.is_empty() {
            None
        } else {
            Some(&self.nested)
        }
    }
}

#[derive(Default)]
pub struct TestValue {
    actions: Vec<Action>,
}

impl TestValue {
    pub fn new() -> Self {
        TestValue::default()
    }

    pub fn with_actions(actions: Vec<Action>) -> Self {
        TestValue { actions }
    }
}

impl NodeValue for TestValue {
    fn as_action_lookup(&self) -> Option<&dyn ActionLookupValue> {
        if self.actions.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl ActionLookupValue for TestValue {
    fn actions(&self) -> &[Action] {
        &self.actions
    }
}

pub fn insert_done(
    graph: &GraphHandle<TestKey, TestValue>,
    key: TestKey,
    value: TestValue,
    deps: Vec<TestKey>,
    rdeps: Vec<TestKey>,
) {
    graph.insert(
        key,
        NodeEntry::new(
            Lifecycle::Done,
            Some(Arc::new(value)),
            deps,
            rdeps.into_iter().collect(),
        ),
    );
}

pub fn insert_not_done(
    graph: &GraphHandle<TestKey, TestValue>,
    key: TestKey,
    lifecycle: Lifecycle,
    rdeps: Vec<TestKey>,
) {
    graph.insert(
        key,
        NodeEntry::new(lifecycle, None, Vec::new(), rdeps.into_iter().collect()),
    );
}
