use cache::OutputPath;

///
/// A single output artifact produced by running an `Action`.
///
#[derive(Clone, Debug)]
pub struct Action {
    output_paths: Vec<OutputPath>,
}

impl Action {
    pub fn new(output_paths: Vec<OutputPath>) -> Self {
        Action { output_paths }
    }

    pub fn output_paths(&self) -> &[OutputPath] {
        &self.output_paths
    }
}

///
/// A node value that was computed by looking up (and potentially running)
/// one or more cacheable `Action`s. The sweep phase uses this to find the
/// action-cache entries that should be evicted alongside a deleted node.
///
pub trait ActionLookupValue: Send + Sync {
    fn actions(&self) -> &[Action];
}

///
/// The computed value held by a `Done` node entry. Graph construction (i.e.
/// the evaluation engine that produces these values) is out of scope here:
/// `focus` only reads values that are already present.
///
pub trait NodeValue: Send + Sync + 'static {
    ///
    /// If this value is (or wraps) an `ActionLookupValue`, a reference to
    /// it. Most values are plain data and return `None`.
    ///
    fn as_action_lookup(&self) -> Option<&dyn ActionLookupValue> {
        None
    }
}
