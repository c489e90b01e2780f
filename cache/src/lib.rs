// Copyright 2021 Pants project contributors (see CONTRIBUTORS.md).
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

use std::fmt;

use dashmap::DashSet;

/// An exec-relative output path, as recorded on an `Action`'s result. This is
/// the granularity at which the sweep phase evicts entries from the action
/// cache: one artifact at a time, never a whole action's worth in one call.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct OutputPath(String);

impl OutputPath {
  pub fn new(path: impl Into<String>) -> Self {
    OutputPath(path.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for OutputPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// The action cache that the sweep phase evicts stale outputs from. Modeled
/// as an opaque collaborator external to the graph: this crate is concerned
/// only with the small local in-process store tests and demos need, not with
/// the remote cache service a production deployment would talk to.
pub trait ActionCache: Send + Sync {
  /// Evicts the cache entry keyed by this output path, if any. A no-op if
  /// the path was never cached, or was already evicted.
  fn remove(&self, output_path: &OutputPath);
}

/// An in-process `ActionCache` backed by a concurrent set of live output
/// paths. Useful for tests and for small local runs that have no remote
/// cache configured.
#[derive(Default)]
pub struct InMemoryActionCache {
  live: DashSet<OutputPath>,
}

impl InMemoryActionCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records an output path as currently cached.
  pub fn insert(&self, output_path: OutputPath) {
    self.live.insert(output_path);
  }

  pub fn contains(&self, output_path: &OutputPath) -> bool {
    self.live.contains(output_path)
  }

  pub fn len(&self) -> usize {
    self.live.len()
  }

  pub fn is_empty(&self) -> bool {
    self.live.is_empty()
  }
}

impl ActionCache for InMemoryActionCache {
  fn remove(&self, output_path: &OutputPath) {
    if self.live.remove(output_path).is_some() {
      log::debug!("evicted cache entry for {output_path}");
    }
  }
}
