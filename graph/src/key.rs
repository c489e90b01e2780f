use std::fmt::{Debug, Display};
use std::hash::Hash;

///
/// A canonical, totally-ordered name for a node in the evaluation graph that
/// `focus` operates over. `Key`s are cheap to clone: implementations are
/// expected to be small values (interned strings, content fingerprints) or
/// `Arc`-wrapped, never the node's own computed value.
///
pub trait Key: Clone + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
    ///
    /// True for keys that anchor the verification set directly, rather than
    /// being walked further: rooted filesystem paths and directory-listing
    /// states. A witness key's own dependencies (if any) are not examined by
    /// the verification collector.
    ///
    fn is_filesystem_witness(&self) -> bool;

    ///
    /// If this key addresses a compact transitive set of artifact
    /// references (a "nested set" in the evaluation engine's terms), the
    /// keys nested directly inside it. Ordinary keys return `None`.
    ///
    /// The mark phase expands one level of nesting per visit, so that a dep
    /// edge onto a nested set also protects (and verification-collects) the
    /// set's immediate members without requiring the engine to have
    /// materialized a direct edge onto each one.
    ///
    fn nested_artifacts(&self) -> Option<&[Self]> {
        None
    }
}
