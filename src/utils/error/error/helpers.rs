//! Helper functions for creating specific error types

use super::types::GatewayError;

/// Helper functions for creating specific errors
#[allow(dead_code)]
impl GatewayError {
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn authorization<S: Into<String>>(message: S) -> Self {
        Self::Authorization(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn rate_limit<S: Into<String>>(message: S) -> Self {
        Self::RateLimit {
            message: message.into(),
            response_headers: Vec::new(),
        }
    }

    /// Build a rate-limit error carrying the upstream `retry-after` (in
    /// seconds) as a response header, when the provider reported one.
    pub fn rate_limit_with_retry_after<S: Into<String>>(message: S, retry_after_secs: Option<u64>) -> Self {
        Self::RateLimit {
            message: message.into(),
            response_headers: retry_after_header(retry_after_secs),
        }
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Build the budget-exceeded error for a rate-limit dimension whose
    /// spend has reached its `max_budget`. The message always contains
    /// "Budget has been exceeded!", "Current cost:", and "Max budget:",
    /// matching the wording callers key tests off of.
    pub fn budget_exceeded(current_cost: f64, max_budget: f64) -> Self {
        Self::BudgetExceeded(format!(
            "Budget has been exceeded! Current cost: {current_cost}, Max budget: {max_budget}"
        ))
    }

    pub fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
            response_headers: Vec::new(),
        }
    }

    /// Build a service-unavailable error carrying the upstream `retry-after`
    /// (in seconds) as a response header, when the provider reported one.
    pub fn service_unavailable_with_retry_after<S: Into<String>>(
        message: S,
        retry_after_secs: Option<u64>,
    ) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
            response_headers: retry_after_header(retry_after_secs),
        }
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn external_service<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    pub fn alert<S: Into<String>>(message: S) -> Self {
        Self::Alert(message.into())
    }

    pub fn not_implemented<S: Into<String>>(message: S) -> Self {
        Self::NotImplemented(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn external<S: Into<String>>(message: S) -> Self {
        Self::External(message.into())
    }

    pub fn invalid_request_error<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn no_providers_available<S: Into<String>>(message: S) -> Self {
        Self::NoProvidersAvailable(message.into())
    }

    pub fn provider_not_found<S: Into<String>>(message: S) -> Self {
        Self::ProviderNotFound(message.into())
    }

    pub fn no_providers_for_model<S: Into<String>>(message: S) -> Self {
        Self::NoProvidersForModel(message.into())
    }

    pub fn no_healthy_providers<S: Into<String>>(message: S) -> Self {
        Self::NoHealthyProviders(message.into())
    }
}

#[allow(dead_code)]
impl GatewayError {
    pub fn api_error<S: Into<String>>(_status_code: u16, message: S, _provider: S) -> Self {
        // ApiError doesn't exist in unified ProviderError, map to Internal in GatewayError
        Self::Internal(message.into())
    }

    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
            response_headers: Vec::new(),
        }
    }
}

/// Build the `[("retry-after", secs)]` header pair the transport copies
/// from an upstream 429/5xx response, or an empty list when none was sent.
fn retry_after_header(retry_after_secs: Option<u64>) -> Vec<(String, String)> {
    retry_after_secs
        .map(|secs| vec![("retry-after".to_string(), secs.to_string())])
        .unwrap_or_default()
}
