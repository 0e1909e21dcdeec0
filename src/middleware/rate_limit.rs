use std::sync::Arc;

use axum::body::Body;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Per-peer-IP limiter applied in front of every page.
pub type PeerGovernorLayer = GovernorLayer<
    tower_governor::key_extractor::PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// One token is replenished every `rate_limit_period_ms`, up to
/// `rate_limit_burst` tokens per client IP.
///
/// Keys on the peer address, so the router must be served with connect info.
pub fn create_governor(config: &Config) -> AppResult<PeerGovernorLayer> {
    let governor_config = GovernorConfigBuilder::default()
        .per_millisecond(config.rate_limit_period_ms)
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or_else(|| {
            AppError::Internal(format!(
                "Invalid rate limit: period {}ms, burst {}",
                config.rate_limit_period_ms, config.rate_limit_burst
            ))
        })?;

    tracing::debug!(
        period_ms = config.rate_limit_period_ms,
        burst = config.rate_limit_burst,
        "Rate limiter configured"
    );

    Ok(GovernorLayer::new(Arc::new(governor_config)))
}
