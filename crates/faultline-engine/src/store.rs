//! In-memory [`PatternStore`] with optimistic version checks.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use faultline_core::errors::{FaultlineError, FaultlineResult};
use faultline_core::models::HistoricalPattern;
use faultline_core::traits::PatternStore;

/// Mutex-protected map of patterns keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryPatternStore {
    patterns: Mutex<BTreeMap<String, HistoricalPattern>>,
}

impl InMemoryPatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `patterns`. Later duplicates replace earlier ones.
    pub fn with_patterns(patterns: impl IntoIterator<Item = HistoricalPattern>) -> Self {
        let map = patterns.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            patterns: Mutex::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> FaultlineResult<MutexGuard<'_, BTreeMap<String, HistoricalPattern>>> {
        self.patterns
            .lock()
            .map_err(|e| FaultlineError::Config(format!("pattern store lock poisoned: {e}")))
    }
}

impl PatternStore for InMemoryPatternStore {
    fn get(&self, pattern_id: &str) -> FaultlineResult<Option<HistoricalPattern>> {
        Ok(self.lock()?.get(pattern_id).cloned())
    }

    fn insert(&self, pattern: HistoricalPattern) -> FaultlineResult<()> {
        let mut map = self.lock()?;
        if map.contains_key(&pattern.id) {
            return Err(FaultlineError::InvalidInput(format!(
                "pattern {} already exists",
                pattern.id
            )));
        }
        map.insert(pattern.id.clone(), pattern);
        Ok(())
    }

    fn compare_and_swap(
        &self,
        pattern: &HistoricalPattern,
        expected_version: u64,
    ) -> FaultlineResult<HistoricalPattern> {
        let mut map = self.lock()?;
        let stored = map
            .get_mut(&pattern.id)
            .ok_or_else(|| FaultlineError::PatternNotFound {
                id: pattern.id.clone(),
            })?;
        if stored.version != expected_version {
            return Err(FaultlineError::OutcomeUpdateConflict {
                pattern_id: pattern.id.clone(),
                expected_version,
                actual_version: stored.version,
            });
        }
        let mut next = pattern.clone();
        next.version = expected_version.saturating_add(1);
        *stored = next.clone();
        Ok(next)
    }

    fn all(&self) -> FaultlineResult<Vec<HistoricalPattern>> {
        Ok(self.lock()?.values().cloned().collect())
    }
}
