//! Screening result types

use super::TokenId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete risk category derived from the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Score >= 80
    #[serde(rename = "SAFE")]
    Safe,
    /// Score 60-79
    #[serde(rename = "CAUTION")]
    Caution,
    /// Score 30-59
    #[serde(rename = "MEDIUM_RISK")]
    MediumRisk,
    /// Score < 30, or a proven honeypot regardless of score
    #[serde(rename = "LIKELY_SCAM")]
    LikelyScam,
}

impl RiskCategory {
    /// Map a total score to its band
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            RiskCategory::Safe
        } else if score >= 60 {
            RiskCategory::Caution
        } else if score >= 30 {
            RiskCategory::MediumRisk
        } else {
            RiskCategory::LikelyScam
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskCategory::Safe => write!(f, "SAFE"),
            RiskCategory::Caution => write!(f, "CAUTION"),
            RiskCategory::MediumRisk => write!(f, "MEDIUM_RISK"),
            RiskCategory::LikelyScam => write!(f, "LIKELY_SCAM"),
        }
    }
}

/// Points awarded per scoring dimension, each bounded by that dimension's
/// maximum weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Liquidity depth (max 15)
    pub liquidity: u8,
    /// LP lock status (max 20)
    pub lp_lock: u8,
    /// Holder concentration (max 10)
    pub holder_concentration: u8,
    /// Mint/freeze authority state (max 15)
    pub authority: u8,
    /// Honeypot check (max 20)
    pub honeypot: u8,
    /// Ownership/audit/age/social signals (max 20)
    pub credibility: u8,
}

impl ScoreBreakdown {
    /// Sum of all dimension points
    pub fn total(&self) -> u32 {
        self.liquidity as u32
            + self.lp_lock as u32
            + self.holder_concentration as u32
            + self.authority as u32
            + self.honeypot as u32
            + self.credibility as u32
    }
}

/// Result of one screening pass, immutable once constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    /// The screened token
    pub token_id: TokenId,
    /// Total score in [0, 100]; equals `breakdown.total()` clamped
    pub score: u8,
    /// Risk band (pure function of score, except the honeypot override)
    pub category: RiskCategory,
    /// Per-factor points
    pub breakdown: ScoreBreakdown,
    /// Ordered human-readable warnings
    pub flags: Vec<String>,
    /// When the result was computed (RFC 3339 in JSON)
    pub computed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_band_edges() {
        assert_eq!(RiskCategory::from_score(100), RiskCategory::Safe);
        assert_eq!(RiskCategory::from_score(80), RiskCategory::Safe);
        assert_eq!(RiskCategory::from_score(79), RiskCategory::Caution);
        assert_eq!(RiskCategory::from_score(60), RiskCategory::Caution);
        assert_eq!(RiskCategory::from_score(59), RiskCategory::MediumRisk);
        assert_eq!(RiskCategory::from_score(30), RiskCategory::MediumRisk);
        assert_eq!(RiskCategory::from_score(29), RiskCategory::LikelyScam);
        assert_eq!(RiskCategory::from_score(0), RiskCategory::LikelyScam);
    }

    #[test]
    fn test_breakdown_total() {
        let breakdown = ScoreBreakdown {
            liquidity: 15,
            lp_lock: 18,
            holder_concentration: 9,
            authority: 15,
            honeypot: 20,
            credibility: 14,
        };
        assert_eq!(breakdown.total(), 91);
    }

    #[test]
    fn test_category_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&RiskCategory::LikelyScam).unwrap(),
            "\"LIKELY_SCAM\""
        );
        assert_eq!(
            serde_json::to_string(&RiskCategory::MediumRisk).unwrap(),
            "\"MEDIUM_RISK\""
        );
    }
}
