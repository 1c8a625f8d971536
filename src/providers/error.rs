// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Errors from network-backed embedding and rerank providers

use thiserror::Error;

/// Errors that can occur during provider calls
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Rate limited by the provider
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// API error from the provider
    #[error("Provider API error: {status} - {message}")]
    ApiError {
        /// HTTP status code (0 if the request never completed)
        status: u16,
        /// Error message
        message: String,
    },

    /// Request timed out
    #[error("Provider timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// No API key configured for the provider
    #[error("No API key configured for {provider}")]
    NoApiKey {
        /// Name of the provider missing an API key
        provider: String,
    },

    /// Response did not match the expected shape
    #[error("Malformed provider response: {message}")]
    MalformedResponse {
        /// What was wrong with the response
        message: String,
    },

    /// Retries exhausted on a transient failure
    #[error("Provider {provider} unavailable after {attempts} attempts")]
    Unavailable {
        /// Name of the provider
        provider: String,
        /// Attempts made before giving up
        attempts: u32,
    },
}

impl ProviderError {
    /// Check if this error is transient and worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::RateLimited { .. } | ProviderError::Timeout { .. } => true,
            ProviderError::ApiError { status, .. } => *status == 0 || (500..=599).contains(status),
            _ => false,
        }
    }

    /// Get error code for logging and metrics
    pub fn error_code(&self) -> &'static str {
        match self {
            ProviderError::RateLimited { .. } => "RATE_LIMITED",
            ProviderError::ApiError { .. } => "API_ERROR",
            ProviderError::Timeout { .. } => "TIMEOUT",
            ProviderError::NoApiKey { .. } => "NO_API_KEY",
            ProviderError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            ProviderError::Unavailable { .. } => "PROVIDER_UNAVAILABLE",
        }
    }
}
