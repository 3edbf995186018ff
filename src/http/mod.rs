//! HTTP client module
//!
//! Provides the outbound HTTP client used to reach the upstream catalog.
//!
//! # Features
//!
//! - **Bounded Timeouts**: Every request carries a timeout; no retries
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error Classification**: Transport, status and decode failures map to
//!   distinct error variants

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
