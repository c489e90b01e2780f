///
/// Tunables for a single `focus` call. There is no CLI or options-parser
/// integration here: the command dispatcher that would construct one of
/// these from user input lives outside this crate.
///
#[derive(Clone, Debug)]
pub struct FocusConfig {
    ///
    /// Logs a warning when a single node's reverse-dep or direct-dep fan-out
    /// exceeds this count. Purely diagnostic: it never changes the result.
    ///
    pub fanout_warn_threshold: u64,

    ///
    /// When `true` (the default), a leaf with no corresponding node entry, or
    /// a node visited during the upward mark that is neither `Done` nor
    /// `CheckDependencies`, aborts the whole `focus` call with an `Err`.
    ///
    /// When `false`, both conditions are downgraded to a logged warning and
    /// the offending node is treated as if absent from its caller's fan-out
    /// (for a missing leaf, its upward walk is simply skipped; for a
    /// not-done rdep, it is dropped as though demoted), rather than failing
    /// the entire run.
    ///
    pub strict: bool,
}

impl Default for FocusConfig {
    fn default() -> Self {
        FocusConfig {
            fanout_warn_threshold: 10_000,
            strict: true,
        }
    }
}
