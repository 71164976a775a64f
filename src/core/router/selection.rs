//! Deployment selection logic
//!
//! This module contains the core routing logic for selecting
//! the best deployment for a given model.

use super::config::RoutingStrategy;
use super::deployment::{Deployment, DeploymentId};
use super::error::RouterError;
use super::router::Router;
use super::strategy_impl;
use std::sync::atomic::Ordering::Relaxed;

/// Capability/tag requirements carried alongside a selection request.
///
/// Threaded through from `CanonicalRequest`/`Principal` by the pipeline (C8);
/// left at defaults, selection behaves exactly like the untagged, capability-
/// unaware case `select_deployment` exposes for backwards compatibility.
#[derive(Debug, Clone, Default)]
pub struct SelectionRequest {
    /// Tags carried on the incoming request (e.g. from `Principal.tags`)
    pub tags: Vec<String>,
    pub require_streaming: bool,
    pub require_tools: bool,
    pub require_vision: bool,
    pub require_audio: bool,
}

impl Router {
    /// Select the best deployment, applying tag and capability filters.
    ///
    /// Implements the full selection algorithm: id-pinning/group resolution,
    /// cooldown/health/rate-limit/budget filtering, tag filtering, capability
    /// filtering, then strategy-based choice among what remains.
    pub fn select_deployment_for(
        &self,
        model_name: &str,
        request: &SelectionRequest,
    ) -> Result<DeploymentId, RouterError> {
        let resolved_name = self.resolve_model_name(model_name);

        // 1. Resolve candidates: model_group match wins; fall back to a
        //    single pinned deployment id when no group matches.
        let deployment_ids = match self.model_index.get(&resolved_name) {
            Some(ids) if !ids.is_empty() => ids.clone(),
            _ => {
                if self.deployments.contains_key(&resolved_name) {
                    vec![resolved_name.clone()]
                } else {
                    return Err(RouterError::ModelNotFound(model_name.to_string()));
                }
            }
        };

        // 2-4-ish. Filter: healthy + not in cooldown + not rate/parallel/budget limited.
        let mut candidate_ids: Vec<DeploymentId> = deployment_ids
            .iter()
            .filter(|id| {
                if let Some(deployment) = self.deployments.get(id.as_str()) {
                    if !deployment.is_healthy() || deployment.is_in_cooldown() {
                        return false;
                    }
                    if deployment.exceeds_budget() {
                        return false;
                    }
                    if !self.check_parallel_limit(&deployment) {
                        return false;
                    }
                    if !self.check_rate_limit(&deployment) {
                        return false;
                    }
                    true
                } else {
                    false
                }
            })
            .cloned()
            .collect();

        if candidate_ids.is_empty() {
            return Err(RouterError::NoAvailableDeployment(model_name.to_string()));
        }

        // 3. Tag filtering: prefer candidates whose tags intersect request.tags;
        //    fall back to a "default"-tagged deployment; otherwise keep all.
        if !request.tags.is_empty() {
            let tagged: Vec<DeploymentId> = candidate_ids
                .iter()
                .filter(|id| {
                    self.deployments
                        .get(id.as_str())
                        .map(|d| d.tags.iter().any(|t| request.tags.contains(t)))
                        .unwrap_or(false)
                })
                .cloned()
                .collect();

            if !tagged.is_empty() {
                candidate_ids = tagged;
            } else {
                let default_tagged: Vec<DeploymentId> = candidate_ids
                    .iter()
                    .filter(|id| {
                        self.deployments
                            .get(id.as_str())
                            .map(|d| d.tags.iter().any(|t| t == "default"))
                            .unwrap_or(false)
                    })
                    .cloned()
                    .collect();

                if !default_tagged.is_empty() {
                    candidate_ids = default_tagged;
                }
                // else: fall through to all candidates, unchanged.
            }
        }

        // 4. Capability filtering.
        if request.require_streaming || request.require_tools || request.require_vision || request.require_audio {
            let capable: Vec<DeploymentId> = candidate_ids
                .iter()
                .filter(|id| {
                    self.deployments
                        .get(id.as_str())
                        .map(|d| {
                            let s = &d.config.supports;
                            (!request.require_streaming || s.streaming)
                                && (!request.require_tools || s.tools)
                                && (!request.require_vision || s.vision)
                                && (!request.require_audio || s.audio)
                        })
                        .unwrap_or(false)
                })
                .cloned()
                .collect();

            if capable.is_empty() {
                return Err(RouterError::NoAvailableDeployment(model_name.to_string()));
            }
            candidate_ids = capable;
        }

        // 5. Apply strategy to pick one.
        let selected_id = self.apply_strategy(&resolved_name, &candidate_ids);

        if let Some(deployment) = self.deployments.get(&selected_id) {
            deployment.state.active_requests.fetch_add(1, Relaxed);
        }

        Ok(selected_id)
    }

    fn apply_strategy(&self, resolved_name: &str, candidate_ids: &[DeploymentId]) -> DeploymentId {
        match self.config.routing_strategy {
            RoutingStrategy::SimpleShuffle => {
                strategy_impl::weighted_random(candidate_ids, &self.deployments)
            }
            RoutingStrategy::LeastBusy => {
                strategy_impl::least_busy(candidate_ids, &self.deployments)
            }
            RoutingStrategy::UsageBased => {
                strategy_impl::lowest_usage(candidate_ids, &self.deployments)
            }
            RoutingStrategy::LatencyBased => {
                strategy_impl::lowest_latency(candidate_ids, &self.deployments)
            }
            RoutingStrategy::CostBased => {
                strategy_impl::lowest_cost(candidate_ids, &self.deployments)
            }
            RoutingStrategy::RateLimitAware => {
                strategy_impl::rate_limit_aware(candidate_ids, &self.deployments)
            }
            RoutingStrategy::RoundRobin => strategy_impl::round_robin(
                resolved_name,
                candidate_ids,
                &self.round_robin_counters,
            ),
        }
    }
    /// Check if deployment is within parallel request limit
    pub(crate) fn check_parallel_limit(&self, deployment: &Deployment) -> bool {
        match deployment.config.max_parallel_requests {
            Some(limit) => deployment.state.active_requests.load(Relaxed) < limit,
            None => true,
        }
    }

    /// Check if deployment is within rate limits (TPM/RPM)
    pub(crate) fn check_rate_limit(&self, deployment: &Deployment) -> bool {
        let rpm_ok = match deployment.config.rpm_limit {
            Some(limit) => deployment.state.rpm_current.load(Relaxed) < limit,
            None => true,
        };

        let tpm_ok = match deployment.config.tpm_limit {
            Some(limit) => deployment.state.tpm_current.load(Relaxed) < limit,
            None => true,
        };

        rpm_ok && tpm_ok
    }

    /// Select the best deployment for a given model, with no tag or
    /// capability requirements. Thin wrapper around [`select_deployment_for`].
    pub fn select_deployment(&self, model_name: &str) -> Result<DeploymentId, RouterError> {
        self.select_deployment_for(model_name, &SelectionRequest::default())
    }

    /// Release a deployment after request completion
    ///
    /// Decrements the active_requests counter for the deployment.
    pub fn release_deployment(&self, deployment_id: &str) {
        if let Some(deployment) = self.deployments.get(deployment_id) {
            deployment.state.active_requests.fetch_sub(1, Relaxed);
        }
    }
}
