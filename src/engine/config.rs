//! Engine behaviour knobs. League numbers live in [`crate::config::CapConfig`].

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Events kept in memory; older ones are dropped first.
    pub max_events: usize,
    /// Log every event at info instead of debug.
    pub verbose: bool,
    /// Fail the trade when a named player is not on the claimed roster,
    /// instead of skipping that move.
    pub strict_rosters: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_events: 10_000,
            verbose: false,
            strict_rosters: false,
        }
    }
}

impl EngineConfig {
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn strict_rosters(mut self, strict: bool) -> Self {
        self.strict_rosters = strict;
        self
    }
}
