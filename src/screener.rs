//! Screening orchestrator
//!
//! One public operation: validate the token identifier, consult the result
//! cache, on a miss fetch the two factor bundles concurrently, score, cache,
//! return. Provider calls carry their own timeout (strictly shorter than the
//! overall deadline) so one slow upstream cannot consume the whole budget,
//! and nothing is written to the cache on any error path.

use crate::cache::ResultCache;
use crate::config::AppConfig;
use crate::error::{ProviderError, ScreenerError, ScreenerResult};
use crate::models::{RiskFactors, ScreeningResult, TokenId};
use crate::providers::{
    MarketOverview, OverviewProvider, ScreeningLevel, SecurityInfo, SecurityProvider,
};
use crate::scoring;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

/// Token screening orchestrator
///
/// Holds no mutable state of its own; the cache is the only shared mutable
/// resource, so any number of `screen` calls may run concurrently.
pub struct Screener {
    security: Arc<dyn SecurityProvider>,
    overview: Arc<dyn OverviewProvider>,
    cache: Arc<ResultCache>,
    /// Per-provider-call timeout
    provider_timeout: Duration,
    /// Overall budget for one screening pass
    deadline: Duration,
}

impl Screener {
    /// Create a new screener over the given providers and cache
    pub fn new(
        config: &AppConfig,
        security: Arc<dyn SecurityProvider>,
        overview: Arc<dyn OverviewProvider>,
        cache: Arc<ResultCache>,
    ) -> Self {
        Self {
            security,
            overview,
            cache,
            provider_timeout: Duration::from_millis(config.provider.timeout_ms),
            deadline: Duration::from_millis(config.screener.deadline_ms),
        }
    }

    /// Screen a token, serving from cache when fresh.
    ///
    /// Repeated calls for the same token within the cache TTL return the
    /// identical cached result. Runs under the configured overall deadline;
    /// exceeding it yields `ScreenerError::Canceled`.
    pub async fn screen(
        &self,
        raw_token: &str,
        level: ScreeningLevel,
    ) -> ScreenerResult<ScreeningResult> {
        let token = TokenId::parse(raw_token)?;

        timeout(self.deadline, self.screen_token(token, level))
            .await
            .unwrap_or(Err(ScreenerError::Canceled))
    }

    /// Like [`screen`](Self::screen), additionally racing a caller-supplied
    /// cancellation token. Cancellation abandons in-flight provider calls
    /// and leaves the cache untouched.
    pub async fn screen_cancellable(
        &self,
        raw_token: &str,
        level: ScreeningLevel,
        cancel: &CancellationToken,
    ) -> ScreenerResult<ScreeningResult> {
        let token = TokenId::parse(raw_token)?;

        tokio::select! {
            _ = cancel.cancelled() => Err(ScreenerError::Canceled),
            result = timeout(self.deadline, self.screen_token(token, level)) => {
                result.unwrap_or(Err(ScreenerError::Canceled))
            }
        }
    }

    /// Cache-first screening of a validated token
    async fn screen_token(
        &self,
        token: TokenId,
        level: ScreeningLevel,
    ) -> ScreenerResult<ScreeningResult> {
        if let Some(cached) = self.cache.get(&token) {
            tracing::debug!(token = %token, "Screening served from cache");
            return Ok(cached);
        }

        // Both providers are independent network calls; fetch concurrently.
        // A timeout on one does not abort the other, it surfaces as a typed
        // error once both have resolved.
        let (security_result, overview_result) = tokio::join!(
            timeout(
                self.provider_timeout,
                self.security.fetch_security_info(&token, level)
            ),
            timeout(self.provider_timeout, self.overview.fetch_overview(&token)),
        );

        let security = flatten_timeout(security_result).map_err(|e| {
            tracing::warn!(token = %token, error = %e, "Security provider failed");
            e
        })?;
        let overview = flatten_timeout(overview_result).map_err(|e| {
            tracing::warn!(token = %token, error = %e, "Overview provider failed");
            e
        })?;

        let factors = assemble_factors(security, overview);
        let outcome = scoring::score(&factors);

        let result = ScreeningResult {
            token_id: token.clone(),
            score: outcome.score,
            category: outcome.category,
            breakdown: outcome.breakdown,
            flags: outcome.flags,
            computed_at: Utc::now(),
        };

        self.cache.put_default(token.clone(), result.clone());

        tracing::info!(
            token = %token,
            level = %level,
            score = result.score,
            category = %result.category,
            "Screening complete"
        );

        Ok(result)
    }
}

/// Collapse a timed provider result, mapping deadline expiry to the
/// provider timeout error
fn flatten_timeout<T>(
    result: Result<Result<T, ProviderError>, tokio::time::error::Elapsed>,
) -> Result<T, ProviderError> {
    result.unwrap_or(Err(ProviderError::Timeout))
}

/// Merge the two provider responses into one factor bundle
fn assemble_factors(security: SecurityInfo, overview: MarketOverview) -> RiskFactors {
    RiskFactors {
        liquidity_usd: overview.liquidity_usd,
        lp_locked: overview.lp_locked,
        lp_locked_percentage: overview.lp_locked_percentage,
        holder_concentration_top10_pct: security.holder_concentration_top10_pct,
        mint_authority_revoked: security.mint_authority_revoked,
        freeze_authority_revoked: security.freeze_authority_revoked,
        is_honeypot: security.is_honeypot,
        ownership_renounced: security.ownership_renounced,
        token_age_days: overview.token_age_days,
        has_audit: security.has_audit,
        has_social_media: security.has_social_media,
    }
    .clamped()
}
