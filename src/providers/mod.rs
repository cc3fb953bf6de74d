//! Upstream provider abstractions
//!
//! Two capability contracts — security metadata and market overview — that
//! the screener depends on. Concrete integrations (REST, RPC, on-chain)
//! live behind these traits; one implementation may satisfy both, as the
//! bundled `HttpProvider` does. Tests swap in in-memory fakes.

mod http;

pub use http::HttpProvider;

use crate::error::ProviderError;
use crate::models::TokenId;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much factor data a screening pass requests.
///
/// `Quick` skips the audit/social-media lookups (the slowest upstream
/// calls); `Normal` fetches everything. The scoring formula is identical
/// for both — skipped signals simply score as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreeningLevel {
    /// Skip audit/social lookups
    Quick,
    /// Fetch all factor data
    Normal,
}

impl fmt::Display for ScreeningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreeningLevel::Quick => write!(f, "quick"),
            ScreeningLevel::Normal => write!(f, "normal"),
        }
    }
}

/// Security metadata for one token
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityInfo {
    /// Whether the mint authority has been permanently disabled
    pub mint_authority_revoked: Option<bool>,
    /// Whether the freeze authority has been permanently disabled
    pub freeze_authority_revoked: Option<bool>,
    /// Whether the token is a proven honeypot
    pub is_honeypot: Option<bool>,
    /// Whether contract ownership has been renounced
    pub ownership_renounced: Option<bool>,
    /// Share of supply held by the top 10 holders, [0, 100]
    pub holder_concentration_top10_pct: Option<Decimal>,
    /// Whether a third-party audit exists (None under `Quick`)
    pub has_audit: Option<bool>,
    /// Whether the project has social media presence (None under `Quick`)
    pub has_social_media: Option<bool>,
}

/// Market/liquidity overview for one token
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketOverview {
    /// Total DEX liquidity in USD
    pub liquidity_usd: Option<Decimal>,
    /// Whether LP tokens are locked
    pub lp_locked: Option<bool>,
    /// Percentage of LP tokens locked, [0, 100]
    pub lp_locked_percentage: Option<Decimal>,
    /// Days since token creation
    pub token_age_days: Option<u32>,
}

/// Source of authority, honeypot, holder and credibility signals
#[async_trait]
pub trait SecurityProvider: Send + Sync {
    /// Fetch security metadata for a token. Under `ScreeningLevel::Quick`
    /// implementations skip audit/social lookups and leave those fields
    /// `None`.
    async fn fetch_security_info(
        &self,
        token: &TokenId,
        level: ScreeningLevel,
    ) -> Result<SecurityInfo, ProviderError>;
}

/// Source of liquidity and LP lock data
#[async_trait]
pub trait OverviewProvider: Send + Sync {
    /// Fetch the market overview for a token
    async fn fetch_overview(&self, token: &TokenId) -> Result<MarketOverview, ProviderError>;
}
