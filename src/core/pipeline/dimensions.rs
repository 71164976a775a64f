//! Builds the per-request `PrincipalDimension` list C5 admits against, one
//! entry per identifier actually present on the request (spec.md §4.5: "all
//! enabled dimensions must pass; strictest wins").

use super::limits::PrincipalLimitsProvider;
use crate::core::rate_limiter::{Dimension, PrincipalDimension};
use crate::core::types::context::RequestContext;

pub fn build_dimensions(
    context: &RequestContext,
    model_name: &str,
    limits: &dyn PrincipalLimitsProvider,
) -> Vec<PrincipalDimension> {
    let mut dimensions = Vec::new();

    if let Some(api_key) = &context.api_key {
        push(&mut dimensions, limits, Dimension::ApiKey, api_key);
    }
    if let Some(user_id) = &context.user_id {
        push(&mut dimensions, limits, Dimension::User, user_id);
    }
    if let Some(team_id) = &context.team_id {
        push(&mut dimensions, limits, Dimension::Team, team_id);
    }
    if let Some(org_id) = &context.organization_id {
        push(&mut dimensions, limits, Dimension::Organization, org_id);
    }
    if let Some(end_user_id) = &context.end_user_id {
        push(&mut dimensions, limits, Dimension::EndUser, end_user_id);
    }
    // Model dimension always applies: every request targets some model.
    push(&mut dimensions, limits, Dimension::Model, model_name);

    dimensions
}

fn push(
    dimensions: &mut Vec<PrincipalDimension>,
    limits: &dyn PrincipalLimitsProvider,
    dimension: Dimension,
    id: &str,
) {
    let dimension_limits = limits.limits_for(dimension, id);
    dimensions.push(PrincipalDimension::new(dimension, id, dimension_limits));
}
