use crate::key::Key;

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum FocusError<K: Key> {
    #[error("focus leaf {0} has no corresponding node entry in the graph")]
    MissingNode(K),

    #[error("node {0} was visited during the upward mark but is neither Done nor CheckDependencies")]
    NotDone(K),

    #[error("focus was interrupted before completing")]
    Interrupted,

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}
