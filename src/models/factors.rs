//! Risk factor bundle
//!
//! One `RiskFactors` value is assembled per screening pass from the two
//! provider responses. Every field that an upstream source may not know is
//! an `Option`: "unknown" must stay distinguishable from "known bad", the
//! scoring engine decides how each is treated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable bundle of risk signals for one token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    /// Total DEX liquidity in USD
    pub liquidity_usd: Option<Decimal>,
    /// Whether LP tokens are held in a time-locked contract
    pub lp_locked: Option<bool>,
    /// Percentage of LP tokens locked, [0, 100]
    pub lp_locked_percentage: Option<Decimal>,
    /// Share of supply held by the top 10 holders, [0, 100]
    pub holder_concentration_top10_pct: Option<Decimal>,
    /// Whether the mint authority has been permanently disabled
    pub mint_authority_revoked: Option<bool>,
    /// Whether the freeze authority has been permanently disabled
    pub freeze_authority_revoked: Option<bool>,
    /// Whether the token is a proven honeypot (holders cannot sell)
    pub is_honeypot: Option<bool>,
    /// Whether contract ownership has been renounced
    pub ownership_renounced: Option<bool>,
    /// Days since the token was created
    pub token_age_days: Option<u32>,
    /// Whether a third-party audit exists
    pub has_audit: Option<bool>,
    /// Whether the project has any social media presence
    pub has_social_media: Option<bool>,
}

impl RiskFactors {
    /// Clamp all percentage fields into [0, 100] and negative liquidity to zero.
    ///
    /// Providers occasionally report out-of-range values; scoring assumes
    /// clamped input, so the orchestrator calls this before scoring.
    pub fn clamped(mut self) -> Self {
        let hundred = Decimal::from(100);
        if let Some(liq) = self.liquidity_usd {
            self.liquidity_usd = Some(liq.max(Decimal::ZERO));
        }
        if let Some(pct) = self.lp_locked_percentage {
            self.lp_locked_percentage = Some(pct.clamp(Decimal::ZERO, hundred));
        }
        if let Some(pct) = self.holder_concentration_top10_pct {
            self.holder_concentration_top10_pct = Some(pct.clamp(Decimal::ZERO, hundred));
        }
        self
    }
}
