//! Where the pipeline gets each principal's configured RPM/TPM/budget/
//! parallelism limits from. Grounded on spec.md §4.5's "independent
//! admission across six principal dimensions" — this crate owns no
//! multi-tenant config store, so limits are supplied by whoever embeds the
//! pipeline (tests, or a future admin-API layer) through this trait.

use crate::core::rate_limiter::{Dimension, DimensionLimits};
use dashmap::DashMap;

/// Resolves the configured limits for a given (dimension, id) pair. Callers
/// that never configure a dimension get `DimensionLimits::default()`
/// (unlimited), so admission is a no-op until limits are registered.
pub trait PrincipalLimitsProvider: Send + Sync {
    fn limits_for(&self, dimension: Dimension, id: &str) -> DimensionLimits;
}

/// An in-memory `PrincipalLimitsProvider` backed by a concurrent map.
/// Reasonable default for a single-process deployment; a Redis- or
/// database-backed provider can implement the same trait without touching
/// the pipeline.
#[derive(Default)]
pub struct StaticLimitsProvider {
    limits: DashMap<(Dimension, String), DimensionLimits>,
}

impl StaticLimitsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_limits(&self, dimension: Dimension, id: impl Into<String>, limits: DimensionLimits) {
        self.limits.insert((dimension, id.into()), limits);
    }
}

impl PrincipalLimitsProvider for StaticLimitsProvider {
    fn limits_for(&self, dimension: Dimension, id: &str) -> DimensionLimits {
        self.limits
            .get(&(dimension, id.to_string()))
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }
}
