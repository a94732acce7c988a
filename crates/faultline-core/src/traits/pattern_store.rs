//! `PatternStore` trait: the caller-owned historical pattern store.
//!
//! Outcome feedback is a read-modify-write. The store guards it with an
//! optimistic version check so concurrent writers surface a retryable
//! `OutcomeUpdateConflict` instead of losing an update.

use crate::errors::FaultlineResult;
use crate::models::HistoricalPattern;

pub trait PatternStore: Send + Sync {
    /// Fetch a pattern by id.
    fn get(&self, pattern_id: &str) -> FaultlineResult<Option<HistoricalPattern>>;

    /// Insert a new pattern. Its version is stored as given.
    fn insert(&self, pattern: HistoricalPattern) -> FaultlineResult<()>;

    /// Replace the stored pattern if its version still equals `expected_version`.
    /// The stored copy gets version `expected_version + 1`, which is returned.
    ///
    /// Fails with `FaultlineError::OutcomeUpdateConflict` when the version moved.
    fn compare_and_swap(
        &self,
        pattern: &HistoricalPattern,
        expected_version: u64,
    ) -> FaultlineResult<HistoricalPattern>;

    /// Snapshot of every stored pattern, id-sorted.
    fn all(&self) -> FaultlineResult<Vec<HistoricalPattern>>;
}
