//! Mapping from [`GatewayError`] to a wire-ready status code and error body.
//!
//! Framework-agnostic on purpose: the HTTP front end owns turning this into
//! an actual response (status line, headers), it just needs the pieces.

use super::types::GatewayError;
use crate::core::providers::unified_provider::ProviderError;

impl GatewayError {
    /// HTTP status code, stable error code, and user-facing message for this error.
    pub fn error_parts(&self) -> (u16, &'static str, String) {
        match self {
            GatewayError::Config(_) => (500, "CONFIG_ERROR", self.to_string()),
            GatewayError::Redis(_) => (500, "CACHE_ERROR", "Cache operation failed".to_string()),
            GatewayError::Auth(_) => (401, "AUTH_ERROR", self.to_string()),
            GatewayError::Authorization(_) => (403, "AUTHORIZATION_ERROR", self.to_string()),
            GatewayError::Provider(provider_error) => match provider_error {
                ProviderError::RateLimit { .. } => {
                    (429, "PROVIDER_RATE_LIMIT", provider_error.to_string())
                }
                ProviderError::QuotaExceeded { .. } => {
                    (402, "PROVIDER_QUOTA_EXCEEDED", provider_error.to_string())
                }
                ProviderError::ModelNotFound { .. } => {
                    (404, "MODEL_NOT_FOUND", provider_error.to_string())
                }
                ProviderError::InvalidRequest { .. } => {
                    (400, "INVALID_REQUEST", provider_error.to_string())
                }
                ProviderError::Timeout { .. } => {
                    (504, "PROVIDER_TIMEOUT", provider_error.to_string())
                }
                ProviderError::ProviderUnavailable { .. } => {
                    (503, "PROVIDER_UNAVAILABLE", provider_error.to_string())
                }
                ProviderError::Authentication { .. } => {
                    (401, "PROVIDER_AUTH_ERROR", provider_error.to_string())
                }
                _ => (502, "PROVIDER_ERROR", provider_error.to_string()),
            },
            GatewayError::RateLimit { .. } => (429, "RATE_LIMIT_EXCEEDED", self.to_string()),
            GatewayError::BudgetExceeded(_) => (400, "BUDGET_EXCEEDED", self.to_string()),
            GatewayError::Validation(_) => (400, "VALIDATION_ERROR", self.to_string()),
            GatewayError::NotFound(_) => (404, "NOT_FOUND", self.to_string()),
            GatewayError::Conflict(_) => (409, "CONFLICT", self.to_string()),
            GatewayError::BadRequest(_) => (400, "BAD_REQUEST", self.to_string()),
            GatewayError::Timeout(_) => (408, "TIMEOUT", self.to_string()),
            GatewayError::ProviderUnavailable { .. } => {
                (503, "SERVICE_UNAVAILABLE", self.to_string())
            }
            GatewayError::CircuitBreaker(_) => (503, "CIRCUIT_BREAKER_OPEN", self.to_string()),
            GatewayError::Network(_) => (502, "NETWORK_ERROR", self.to_string()),
            GatewayError::Parsing(_) => (400, "PARSING_ERROR", self.to_string()),
            GatewayError::Alert(_) => (500, "ALERT_ERROR", self.to_string()),
            GatewayError::NotImplemented(_) => (501, "NOT_IMPLEMENTED", self.to_string()),
            GatewayError::Unauthorized(_) => (401, "UNAUTHORIZED", self.to_string()),
            GatewayError::Forbidden(_) => (403, "FORBIDDEN", self.to_string()),
            GatewayError::External(_) => (502, "EXTERNAL_ERROR", self.to_string()),
            GatewayError::InvalidRequest(_) => (400, "INVALID_REQUEST", self.to_string()),
            GatewayError::NoProvidersAvailable(_) => {
                (503, "NO_PROVIDERS_AVAILABLE", self.to_string())
            }
            GatewayError::ProviderNotFound(_) => (404, "PROVIDER_NOT_FOUND", self.to_string()),
            GatewayError::NoProvidersForModel(_) => {
                (400, "NO_PROVIDERS_FOR_MODEL", self.to_string())
            }
            GatewayError::NoHealthyProviders(_) => {
                (503, "NO_HEALTHY_PROVIDERS", self.to_string())
            }
            _ => (500, "INTERNAL_ERROR", "An internal error occurred".to_string()),
        }
    }

    /// Response headers the HTTP front end should forward verbatim, e.g.
    /// `retry-after` copied from the upstream 429/5xx that caused this
    /// error. Empty for every other error kind.
    pub fn response_headers(&self) -> &[(String, String)] {
        match self {
            GatewayError::RateLimit { response_headers, .. } => response_headers,
            GatewayError::ProviderUnavailable { response_headers, .. } => response_headers,
            _ => &[],
        }
    }

    /// Build the standard error response body for this error.
    pub fn to_error_response(&self) -> ErrorResponse {
        let (_, code, message) = self.error_parts();
        ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None,
            },
        }
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_rate_limit_to_429() {
        let err = GatewayError::rate_limit("too many requests");
        let (status, code, _) = err.error_parts();
        assert_eq!(status, 429);
        assert_eq!(code, "RATE_LIMIT_EXCEEDED");
    }

    #[test]
    fn preserves_retry_after_on_rate_limit() {
        let err = GatewayError::rate_limit_with_retry_after("too many requests", Some(30));
        assert_eq!(
            err.response_headers(),
            &[("retry-after".to_string(), "30".to_string())]
        );
    }

    #[test]
    fn no_retry_after_means_no_headers() {
        let err = GatewayError::rate_limit("too many requests");
        assert!(err.response_headers().is_empty());
    }

    #[test]
    fn maps_not_found_to_404() {
        let err = GatewayError::NotFound("deployment".to_string());
        let (status, code, _) = err.error_parts();
        assert_eq!(status, 404);
        assert_eq!(code, "NOT_FOUND");
    }
}
