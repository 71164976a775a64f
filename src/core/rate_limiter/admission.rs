//! Per-dimension pre-call admission and post-call accounting (spec.md §4.5).
//!
//! Every enabled dimension on a request — api-key, user, team, organization,
//! model, end-user — is checked independently; all must pass for the
//! request to be admitted (strictest dimension wins). Counters live behind
//! the [`Cache`] abstraction so they are visible to every replica sharing a
//! `RedisCache`, not just the process that happens to serve a given request.

use super::cache::Cache;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Rolling window spec.md §4.5 prescribes: "if `now - window_start >= 60s`
/// the window resets atomically", enforced lazily by `Cache::incr_ex`'s own
/// TTL rather than a background sweep.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Spend accumulates over the whole budget period rather than rolling over
/// every minute like RPM/TPM, so its key gets a much longer TTL. 30 days
/// matches the monthly budget period the original billing tests assume.
const SPEND_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

/// A principal dimension admission is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    ApiKey,
    User,
    Team,
    Organization,
    Model,
    EndUser,
}

impl Dimension {
    fn label(self) -> &'static str {
        match self {
            Dimension::ApiKey => "api-key",
            Dimension::User => "user",
            Dimension::Team => "team",
            Dimension::Organization => "organization",
            Dimension::Model => "model",
            Dimension::EndUser => "end-user",
        }
    }
}

/// Limits configured for one principal on one dimension. `None` on any
/// field means that axis is unlimited for this principal.
#[derive(Debug, Clone, Default)]
pub struct DimensionLimits {
    pub rpm_limit: Option<u32>,
    pub tpm_limit: Option<u32>,
    pub max_budget: Option<f64>,
    pub max_parallel_requests: Option<u32>,
}

/// One dimension instance admission is evaluated against: "api-key
/// sk-abc123, rpm_limit 500", etc. A request typically admits against
/// several of these at once (its api key, its user, its model, ...).
#[derive(Debug, Clone)]
pub struct PrincipalDimension {
    pub dimension: Dimension,
    pub id: String,
    pub limits: DimensionLimits,
}

impl PrincipalDimension {
    pub fn new(dimension: Dimension, id: impl Into<String>, limits: DimensionLimits) -> Self {
        Self { dimension, id: id.into(), limits }
    }

    fn rpm_key(&self) -> String {
        format!("ratelimit:{}:{}:rpm", self.dimension.label(), self.id)
    }

    fn tpm_key(&self) -> String {
        format!("ratelimit:{}:{}:tpm", self.dimension.label(), self.id)
    }

    fn parallel_key(&self) -> String {
        format!("ratelimit:{}:{}:parallel", self.dimension.label(), self.id)
    }

    fn spend_key(&self) -> String {
        format!("ratelimit:{}:{}:spend_cents", self.dimension.label(), self.id)
    }
}

/// An admitted request's reservation, handed back by [`RateLimitAdmitter::admit`].
/// Pass it to `record_success`/`record_failure` after the call completes so
/// the pre-incremented RPM counters (and, on success, TPM/spend) get
/// finalized.
pub struct Admission {
    dimensions: Vec<PrincipalDimension>,
    estimated_prompt_tokens: u32,
    parallel_reserved: bool,
}

/// Evaluates pre-call admission and post-call accounting across a request's
/// principal dimensions, backed by a shared [`Cache`].
pub struct RateLimitAdmitter {
    cache: Arc<dyn Cache>,
}

impl RateLimitAdmitter {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    /// Run pre-call admission (spec.md §4.5 steps 1-3) across every
    /// dimension. Fails fast on the first dimension that rejects, after
    /// rolling back the RPM reservations already made for dimensions
    /// checked earlier in the list (RPM is a best-effort reservation, not a
    /// hold that survives a later dimension's rejection).
    pub async fn admit(
        &self,
        dimensions: &[PrincipalDimension],
        estimated_prompt_tokens: u32,
    ) -> Result<Admission> {
        let mut admitted = Vec::with_capacity(dimensions.len());
        let mut parallel_reserved = false;

        for dim in dimensions {
            match self.admit_one(dim, estimated_prompt_tokens).await {
                Ok(reserved_parallel) => {
                    admitted.push(dim.clone());
                    parallel_reserved |= reserved_parallel;
                }
                Err(e) => {
                    self.rollback(&admitted, parallel_reserved).await;
                    return Err(e);
                }
            }
        }

        Ok(Admission {
            dimensions: admitted,
            estimated_prompt_tokens,
            parallel_reserved,
        })
    }

    /// Checks one dimension; returns whether it reserved a parallel-request
    /// slot (so `rollback`/`record_failure` know whether to release one).
    async fn admit_one(&self, dim: &PrincipalDimension, estimated_prompt_tokens: u32) -> Result<bool> {
        if let Some(limit) = dim.limits.rpm_limit {
            let used = self.cache.incr_ex(&dim.rpm_key(), 1, WINDOW).await;
            if used > limit as i64 {
                self.cache.incr_ex(&dim.rpm_key(), -1, WINDOW).await;
                return Err(GatewayError::rate_limit(format!(
                    "rate limit exceeded for {} {}: {}/{} requests per minute",
                    dim.dimension.label(),
                    dim.id,
                    used,
                    limit
                )));
            }
        }

        if let Some(limit) = dim.limits.tpm_limit {
            let tpm_used = self.cache.get(&dim.tpm_key()).await.unwrap_or(0);
            if tpm_used + estimated_prompt_tokens as i64 > limit as i64 {
                self.undo_rpm(dim).await;
                return Err(GatewayError::rate_limit(format!(
                    "token rate limit exceeded for {} {}: {} + {} estimated > {} tokens per minute",
                    dim.dimension.label(),
                    dim.id,
                    tpm_used,
                    estimated_prompt_tokens,
                    limit
                )));
            }
        }

        if let Some(max_budget) = dim.limits.max_budget {
            let spend_cents = self.cache.get(&dim.spend_key()).await.unwrap_or(0);
            let current_cost = spend_cents as f64 / 100.0;
            if current_cost >= max_budget {
                self.undo_rpm(dim).await;
                return Err(GatewayError::budget_exceeded(current_cost, max_budget));
            }
        }

        let mut reserved_parallel = false;
        if let Some(limit) = dim.limits.max_parallel_requests {
            let in_flight = self.cache.incr_ex(&dim.parallel_key(), 1, WINDOW).await;
            if in_flight > limit as i64 {
                self.cache.incr_ex(&dim.parallel_key(), -1, WINDOW).await;
                self.undo_rpm(dim).await;
                return Err(GatewayError::rate_limit(format!(
                    "max parallel requests exceeded for {} {}: {}/{}",
                    dim.dimension.label(),
                    dim.id,
                    in_flight,
                    limit
                )));
            }
            reserved_parallel = true;
        }

        Ok(reserved_parallel)
    }

    async fn undo_rpm(&self, dim: &PrincipalDimension) {
        if dim.limits.rpm_limit.is_some() {
            self.cache.incr_ex(&dim.rpm_key(), -1, WINDOW).await;
        }
    }

    async fn rollback(&self, admitted: &[PrincipalDimension], parallel_reserved: bool) {
        for dim in admitted {
            self.undo_rpm(dim).await;
            if parallel_reserved && dim.limits.max_parallel_requests.is_some() {
                self.cache.incr_ex(&dim.parallel_key(), -1, WINDOW).await;
            }
        }
    }

    /// Post-call accounting on a successful response (spec.md §4.5):
    /// increments `tpm_used` by the actual token count and adds
    /// `spend_delta` to each dimension's spend. Releases any parallel-
    /// request slot reserved at admission time.
    pub async fn record_success(&self, admission: &Admission, actual_total_tokens: u32, spend_delta: f64) {
        let spend_delta_cents = (spend_delta * 100.0).round() as i64;
        for dim in &admission.dimensions {
            if dim.limits.tpm_limit.is_some() {
                self.cache.incr_ex(&dim.tpm_key(), actual_total_tokens as i64, WINDOW).await;
            }
            if dim.limits.max_budget.is_some() && spend_delta_cents != 0 {
                self.cache.incr_ex(&dim.spend_key(), spend_delta_cents, SPEND_TTL).await;
            }
            if admission.parallel_reserved && dim.limits.max_parallel_requests.is_some() {
                self.cache.incr_ex(&dim.parallel_key(), -1, WINDOW).await;
            }
        }
    }

    /// Post-call accounting on a failed call: the RPM counter was a
    /// best-effort reservation, so it gets released. Spend is never
    /// charged for a call that never completed.
    pub async fn record_failure(&self, admission: &Admission) {
        self.rollback(&admission.dimensions, admission.parallel_reserved).await;
    }
}

impl Admission {
    pub fn estimated_prompt_tokens(&self) -> u32 {
        self.estimated_prompt_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rate_limiter::cache::InMemoryCache;

    fn limits(rpm: u32, tpm: u32, budget: f64) -> DimensionLimits {
        DimensionLimits {
            rpm_limit: Some(rpm),
            tpm_limit: Some(tpm),
            max_budget: Some(budget),
            max_parallel_requests: None,
        }
    }

    #[tokio::test]
    async fn admits_under_all_limits() {
        let admitter = RateLimitAdmitter::new(Arc::new(InMemoryCache::new()));
        let dims = vec![PrincipalDimension::new(Dimension::ApiKey, "key-1", limits(10, 10_000, 100.0))];
        let admission = admitter.admit(&dims, 50).await.unwrap();
        assert_eq!(admission.estimated_prompt_tokens(), 50);
    }

    #[tokio::test]
    async fn rejects_when_rpm_exceeded() {
        let admitter = RateLimitAdmitter::new(Arc::new(InMemoryCache::new()));
        let dims = vec![PrincipalDimension::new(Dimension::ApiKey, "key-1", limits(1, 10_000, 100.0))];
        admitter.admit(&dims, 10).await.unwrap();
        let err = admitter.admit(&dims, 10).await.unwrap_err();
        assert!(matches!(err, GatewayError::RateLimit { .. }));
    }

    #[tokio::test]
    async fn rpm_reservation_is_released_after_rejection() {
        let admitter = RateLimitAdmitter::new(Arc::new(InMemoryCache::new()));
        let dims = vec![PrincipalDimension::new(Dimension::ApiKey, "key-1", limits(1, 10_000, 100.0))];
        admitter.admit(&dims, 10).await.unwrap();
        assert!(admitter.admit(&dims, 10).await.is_err());
        // RPM counter should be back at 1 (the first admitted call), not 2,
        // because the second call's reservation was rolled back.
        let used = admitter.cache.get(&dims[0].rpm_key()).await.unwrap();
        assert_eq!(used, 1);
    }

    #[tokio::test]
    async fn rejects_when_budget_exceeded() {
        let admitter = RateLimitAdmitter::new(Arc::new(InMemoryCache::new()));
        let dims = vec![PrincipalDimension::new(Dimension::ApiKey, "key-1", limits(100, 10_000, 1.0))];
        let admission = admitter.admit(&dims, 10).await.unwrap();
        admitter.record_success(&admission, 10, 1.5).await;

        let err = admitter.admit(&dims, 10).await.unwrap_err();
        match err {
            GatewayError::BudgetExceeded(msg) => {
                assert!(msg.contains("Budget has been exceeded!"));
                assert!(msg.contains("Current cost:"));
                assert!(msg.contains("Max budget:"));
            }
            other => panic!("expected BudgetExceeded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn multiple_dimensions_all_must_pass() {
        let admitter = RateLimitAdmitter::new(Arc::new(InMemoryCache::new()));
        let strict = PrincipalDimension::new(Dimension::Model, "gpt-4", limits(1, 10_000, 100.0));
        let lenient = PrincipalDimension::new(Dimension::ApiKey, "key-1", limits(1000, 1_000_000, 1000.0));
        let dims = vec![strict.clone(), lenient.clone()];

        admitter.admit(&dims, 10).await.unwrap();
        let err = admitter.admit(&dims, 10).await.unwrap_err();
        assert!(matches!(err, GatewayError::RateLimit { .. }));

        // The lenient dimension's RPM reservation from the rejected second
        // call must be rolled back too, not left dangling.
        let lenient_used = admitter.cache.get(&lenient.rpm_key()).await.unwrap();
        assert_eq!(lenient_used, 1);
    }

    #[tokio::test]
    async fn max_parallel_requests_admits_and_releases_on_success() {
        let admitter = RateLimitAdmitter::new(Arc::new(InMemoryCache::new()));
        let dims = vec![PrincipalDimension::new(
            Dimension::User,
            "user-1",
            DimensionLimits {
                rpm_limit: None,
                tpm_limit: None,
                max_budget: None,
                max_parallel_requests: Some(1),
            },
        )];

        let admission = admitter.admit(&dims, 0).await.unwrap();
        assert!(admitter.admit(&dims, 0).await.is_err());
        admitter.record_success(&admission, 0, 0.0).await;
        assert!(admitter.admit(&dims, 0).await.is_ok());
    }
}
