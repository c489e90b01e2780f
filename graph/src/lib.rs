// Copyright 2017 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

#![deny(warnings)]
// Enable all clippy lints except for many of the pedantic ones. It's a shame this needs to be copied and pasted across crates, but there doesn't appear to be a way to include inner attributes from a common source.
#![deny(
    clippy::all,
    clippy::default_trait_access,
    clippy::expl_impl_clone_on_copy,
    clippy::if_not_else,
    clippy::needless_continue,
    clippy::unseparated_literal_suffix,
    clippy::used_underscore_binding
)]
// It is often more clear to show that nothing is being moved.
#![allow(clippy::match_ref_pats)]
// Subjective style.
#![allow(
    clippy::len_without_is_empty,
    clippy::redundant_field_names,
    clippy::too_many_arguments
)]
// Default isn't as big a deal as people seem to think it is.
#![allow(clippy::new_without_default, clippy::new_ret_no_self)]
// Arc<Mutex> can be more clear than needing to grok Orderings:
#![allow(clippy::mutex_atomic)]

//! A graph-focusing garbage collector for an incremental build engine's
//! in-memory dependency graph.
//!
//! Given a set of roots (still-wanted targets) and leaves (the filesystem
//! boundary below which dependency chains are collapsed), `focus` prunes a
//! populated evaluation graph down to exactly what is needed to detect
//! future invalidation of those roots, without retaining the full
//! transitive dependency history underneath them.

mod config;
mod entry;
mod error;
mod handle;
mod key;
mod mark;
mod profile;
mod result;
mod state;
mod sweep;
mod value;
mod verify;

#[cfg(test)]
mod test_support;

use std::collections::HashSet;

pub use cache::{ActionCache, OutputPath};
pub use config::FocusConfig;
pub use entry::{Lifecycle, NodeEntry};
pub use error::FocusError;
pub use handle::GraphHandle;
pub use key::Key;
pub use result::FocusResult;
pub use value::{Action, ActionLookupValue, NodeValue};

///
/// Prunes `graph` to exactly the nodes needed to keep `roots` buildable and
/// able to detect future invalidation below `leaves`, evicting any action
/// cache entries that belong solely to deleted nodes.
///
/// Every key in `leaves` must already have a corresponding node entry in
/// `graph`; with `config.strict` set (the default), a missing leaf or a node
/// visited during the upward mark that is neither `Done` nor
/// `CheckDependencies` aborts the whole call with an `Err` rather than
/// silently producing a partial result.
///
pub fn focus<K: Key, V: NodeValue>(
    graph: &GraphHandle<K, V>,
    action_cache: Option<&dyn ActionCache>,
    roots: HashSet<K>,
    leaves: HashSet<K>,
    config: &FocusConfig,
) -> Result<FocusResult<K>, FocusError<K>> {
    let state = mark::run(graph, config, &roots, &leaves)?;
    sweep::run(graph, action_cache, &state);
    Ok(result::snapshot(roots, leaves, state))
}
