//! Weighted risk scoring
//!
//! Maps a `RiskFactors` bundle to a 0-100 score, a risk category, a
//! per-dimension breakdown, and human-readable flags. Six capped
//! dimensions sum to 100 points at maximum:
//! - Liquidity (15): piecewise-linear between USD breakpoints
//! - LP lock (20): scaled by the locked percentage
//! - Holder concentration (10): inverse scale, lower is better
//! - Mint/freeze authority (15): full credit only when both revoked
//! - Honeypot (20): all-or-nothing, with a hard category override
//! - Credibility (20): ownership/audit/age/social signals
//!
//! Total function: never fails on any input. All arithmetic is `Decimal`;
//! each dimension's points are floored to an integer before summing, so
//! `score == breakdown.total()` holds exactly.

use crate::models::{RiskCategory, RiskFactors, ScoreBreakdown};
use once_cell::sync::Lazy;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Maximum points per dimension
pub mod weights {
    /// Liquidity depth
    pub const LIQUIDITY: u8 = 15;
    /// LP lock status
    pub const LP_LOCK: u8 = 20;
    /// Holder concentration
    pub const HOLDER_CONCENTRATION: u8 = 10;
    /// Mint/freeze authority state
    pub const AUTHORITY: u8 = 15;
    /// Honeypot check
    pub const HONEYPOT: u8 = 20;
    /// Ownership renounced (part of credibility)
    pub const OWNERSHIP: u8 = 6;
    /// Third-party audit (part of credibility)
    pub const AUDIT: u8 = 6;
    /// Token age (part of credibility)
    pub const AGE: u8 = 4;
    /// Social media presence (part of credibility)
    pub const SOCIAL: u8 = 4;
}

/// Partial credit when exactly one of the two authorities is revoked
const AUTHORITY_PARTIAL: u8 = 7;

/// Top-10 concentration at or below which full points are awarded (%)
const CONCENTRATION_FLOOR: u32 = 20;
/// Top-10 concentration at or above which zero points are awarded and the
/// high-concentration flag is raised (%)
const CONCENTRATION_CEILING: u32 = 70;

/// Full age credit at or beyond this many days
const AGE_FULL_DAYS: u32 = 30;
/// Partial age credit at or beyond this many days
const AGE_PARTIAL_DAYS: u32 = 7;

/// (liquidity USD, points) anchors for piecewise-linear interpolation,
/// ascending. Below the first anchor the dimension scores zero.
static LIQUIDITY_BREAKPOINTS: Lazy<[(Decimal, Decimal); 4]> = Lazy::new(|| {
    [
        (Decimal::from(5_000), Decimal::from(5)),
        (Decimal::from(25_000), Decimal::from(8)),
        (Decimal::from(75_000), Decimal::from(12)),
        (Decimal::from(100_000), Decimal::from(weights::LIQUIDITY)),
    ]
});

/// Output of one scoring pass; the orchestrator adds the token id and
/// timestamp to form a `ScreeningResult`
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    /// Total score in [0, 100]
    pub score: u8,
    /// Risk band, honeypot override applied
    pub category: RiskCategory,
    /// Per-dimension points
    pub breakdown: ScoreBreakdown,
    /// Ordered warnings
    pub flags: Vec<String>,
}

/// Score a factor bundle. Pure and deterministic; identical input yields
/// identical output.
///
/// Missing-data policy: unknown booleans score as the unfavorable case;
/// unknown numerics score zero for their dimension and add an explicit
/// insufficient-data flag. An unknown honeypot verdict scores zero but
/// only a *proven* honeypot forces the `LIKELY_SCAM` override.
pub fn score(factors: &RiskFactors) -> ScoringOutcome {
    let factors = factors.clone().clamped();

    let mut flags = Vec::new();
    let mut data_flags = Vec::new();

    // Honeypot (hard override, flagged first)
    let is_honeypot = factors.is_honeypot == Some(true);
    let honeypot_points = match factors.is_honeypot {
        Some(false) => weights::HONEYPOT,
        Some(true) => {
            flags.push("HONEYPOT DETECTED".to_string());
            0
        }
        None => 0,
    };

    // Liquidity
    let liquidity_points = match factors.liquidity_usd {
        Some(liq) => {
            let points = liquidity_points(liq);
            if points == 0 {
                flags.push("Low liquidity".to_string());
            }
            points
        }
        None => {
            data_flags.push("Insufficient data: liquidity unknown".to_string());
            0
        }
    };

    // LP lock
    let lp_points = match (factors.lp_locked, factors.lp_locked_percentage) {
        (Some(true), Some(pct)) => {
            floor_points(Decimal::from(weights::LP_LOCK) * pct / Decimal::from(100))
        }
        (Some(true), None) => {
            data_flags.push("Insufficient data: LP lock percentage unknown".to_string());
            0
        }
        _ => {
            flags.push("LP tokens not locked".to_string());
            0
        }
    };

    // Holder concentration (inverse scale)
    let concentration_points = match factors.holder_concentration_top10_pct {
        Some(pct) => {
            let floor = Decimal::from(CONCENTRATION_FLOOR);
            let ceiling = Decimal::from(CONCENTRATION_CEILING);
            if pct >= ceiling {
                flags.push("High holder concentration".to_string());
                0
            } else if pct <= floor {
                weights::HOLDER_CONCENTRATION
            } else {
                let span = ceiling - floor;
                floor_points(
                    Decimal::from(weights::HOLDER_CONCENTRATION) * (ceiling - pct) / span,
                )
            }
        }
        None => {
            data_flags.push("Insufficient data: holder concentration unknown".to_string());
            0
        }
    };

    // Mint/freeze authority; unknown counts as not revoked
    let mint_revoked = factors.mint_authority_revoked == Some(true);
    let freeze_revoked = factors.freeze_authority_revoked == Some(true);
    let authority_points = match (mint_revoked, freeze_revoked) {
        (true, true) => weights::AUTHORITY,
        (true, false) | (false, true) => AUTHORITY_PARTIAL,
        (false, false) => {
            flags.push("Mint and freeze authority active".to_string());
            0
        }
    };

    // Credibility signals
    let mut credibility_points = 0u8;
    if factors.ownership_renounced == Some(true) {
        credibility_points += weights::OWNERSHIP;
    }
    if factors.has_audit == Some(true) {
        credibility_points += weights::AUDIT;
    }
    credibility_points += match factors.token_age_days {
        Some(days) if days >= AGE_FULL_DAYS => weights::AGE,
        Some(days) if days >= AGE_PARTIAL_DAYS => weights::AGE / 2,
        _ => 0,
    };
    if factors.has_social_media == Some(true) {
        credibility_points += weights::SOCIAL;
    }

    flags.extend(data_flags);

    let breakdown = ScoreBreakdown {
        liquidity: liquidity_points,
        lp_lock: lp_points,
        holder_concentration: concentration_points,
        authority: authority_points,
        honeypot: honeypot_points,
        credibility: credibility_points,
    };

    let score = breakdown.total().min(100) as u8;
    let category = if is_honeypot {
        RiskCategory::LikelyScam
    } else {
        RiskCategory::from_score(score)
    };

    ScoringOutcome {
        score,
        category,
        breakdown,
        flags,
    }
}

/// Piecewise-linear liquidity points, floored to an integer
fn liquidity_points(liquidity_usd: Decimal) -> u8 {
    let anchors = &*LIQUIDITY_BREAKPOINTS;

    let (first_usd, _) = anchors[0];
    if liquidity_usd < first_usd {
        return 0;
    }
    let (last_usd, last_points) = anchors[anchors.len() - 1];
    if liquidity_usd >= last_usd {
        return floor_points(last_points);
    }

    for window in anchors.windows(2) {
        let (lo_usd, lo_points) = window[0];
        let (hi_usd, hi_points) = window[1];
        if liquidity_usd >= lo_usd && liquidity_usd < hi_usd {
            let fraction = (liquidity_usd - lo_usd) / (hi_usd - lo_usd);
            return floor_points(lo_points + (hi_points - lo_points) * fraction);
        }
    }

    // Unreachable: the anchors cover [first, last)
    0
}

/// Floor a Decimal point value to u8; inputs are bounded by the weight table
fn floor_points(points: Decimal) -> u8 {
    points.floor().to_u8().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn favorable_factors() -> RiskFactors {
        RiskFactors {
            liquidity_usd: Some(Decimal::from(150_000)),
            lp_locked: Some(true),
            lp_locked_percentage: Some(Decimal::from(90)),
            holder_concentration_top10_pct: Some(Decimal::from(25)),
            mint_authority_revoked: Some(true),
            freeze_authority_revoked: Some(true),
            is_honeypot: Some(false),
            ownership_renounced: Some(true),
            token_age_days: Some(30),
            has_audit: Some(false),
            has_social_media: Some(true),
        }
    }

    #[test]
    fn test_favorable_factors_score_safe() {
        let outcome = score(&favorable_factors());
        assert_eq!(outcome.breakdown.liquidity, 15);
        assert!(outcome.score >= 80, "expected SAFE score, got {}", outcome.score);
        assert_eq!(outcome.category, RiskCategory::Safe);
        assert!(outcome.flags.is_empty());
    }

    #[test]
    fn test_honeypot_overrides_category() {
        let factors = RiskFactors {
            is_honeypot: Some(true),
            ..favorable_factors()
        };
        let outcome = score(&factors);
        assert_eq!(outcome.category, RiskCategory::LikelyScam);
        assert_eq!(outcome.breakdown.honeypot, 0);
        assert_eq!(outcome.flags[0], "HONEYPOT DETECTED");
        // The arithmetic score alone would not be LIKELY_SCAM
        assert!(outcome.score >= 30);
    }

    #[test]
    fn test_low_liquidity_scores_zero_and_flags() {
        let factors = RiskFactors {
            liquidity_usd: Some(Decimal::from(3_000)),
            ..favorable_factors()
        };
        let outcome = score(&factors);
        assert_eq!(outcome.breakdown.liquidity, 0);
        assert!(outcome.flags.iter().any(|f| f == "Low liquidity"));
    }

    #[test]
    fn test_score_bounds() {
        let best = score(&RiskFactors {
            liquidity_usd: Some(Decimal::from(1_000_000)),
            lp_locked_percentage: Some(Decimal::from(100)),
            holder_concentration_top10_pct: Some(Decimal::from(5)),
            has_audit: Some(true),
            ..favorable_factors()
        });
        assert_eq!(best.score, 100);

        let worst = score(&RiskFactors {
            liquidity_usd: Some(Decimal::ZERO),
            lp_locked: Some(false),
            lp_locked_percentage: None,
            holder_concentration_top10_pct: Some(Decimal::from(95)),
            mint_authority_revoked: Some(false),
            freeze_authority_revoked: Some(false),
            is_honeypot: Some(true),
            ownership_renounced: Some(false),
            token_age_days: Some(0),
            has_audit: Some(false),
            has_social_media: Some(false),
        });
        assert_eq!(worst.score, 0);
        assert_eq!(worst.category, RiskCategory::LikelyScam);
    }

    #[test]
    fn test_idempotent() {
        let factors = favorable_factors();
        assert_eq!(score(&factors), score(&factors));
    }

    #[test]
    fn test_liquidity_interpolation_anchors() {
        assert_eq!(liquidity_points(Decimal::from(100_000)), 15);
        assert_eq!(liquidity_points(Decimal::from(75_000)), 12);
        assert_eq!(liquidity_points(Decimal::from(25_000)), 8);
        assert_eq!(liquidity_points(Decimal::from(5_000)), 5);
        assert_eq!(liquidity_points(Decimal::from(4_999)), 0);
    }

    #[test]
    fn test_liquidity_interpolates_between_anchors() {
        // Midpoint of 25k->8 and 75k->12 is 50k->10
        assert_eq!(liquidity_points(Decimal::from(50_000)), 10);
        // Midpoint of 5k->5 and 25k->8 is 15k->6.5, floored to 6
        assert_eq!(liquidity_points(Decimal::from(15_000)), 6);
    }

    #[test]
    fn test_liquidity_monotonic() {
        let mut previous = 0u8;
        for usd in (0..200_000).step_by(500) {
            let points = liquidity_points(Decimal::from(usd));
            assert!(
                points >= previous,
                "liquidity points dropped from {} to {} at ${}",
                previous,
                points,
                usd
            );
            previous = points;
        }
    }

    #[test]
    fn test_lp_lock_scaled_by_percentage() {
        let half = score(&RiskFactors {
            lp_locked_percentage: Some(Decimal::from(50)),
            ..favorable_factors()
        });
        assert_eq!(half.breakdown.lp_lock, 10);

        let unlocked = score(&RiskFactors {
            lp_locked: Some(false),
            ..favorable_factors()
        });
        assert_eq!(unlocked.breakdown.lp_lock, 0);
        assert!(unlocked.flags.iter().any(|f| f == "LP tokens not locked"));
    }

    #[test]
    fn test_concentration_inverse_scale() {
        let low = score(&RiskFactors {
            holder_concentration_top10_pct: Some(Decimal::from(10)),
            ..favorable_factors()
        });
        assert_eq!(low.breakdown.holder_concentration, 10);

        let high = score(&RiskFactors {
            holder_concentration_top10_pct: Some(Decimal::from(85)),
            ..favorable_factors()
        });
        assert_eq!(high.breakdown.holder_concentration, 0);
        assert!(high
            .flags
            .iter()
            .any(|f| f == "High holder concentration"));
    }

    #[test]
    fn test_authority_partial_credit() {
        let both = score(&favorable_factors());
        assert_eq!(both.breakdown.authority, 15);

        let one = score(&RiskFactors {
            freeze_authority_revoked: Some(false),
            ..favorable_factors()
        });
        assert_eq!(one.breakdown.authority, 7);

        let neither = score(&RiskFactors {
            mint_authority_revoked: Some(false),
            freeze_authority_revoked: Some(false),
            ..favorable_factors()
        });
        assert_eq!(neither.breakdown.authority, 0);
        assert!(neither
            .flags
            .iter()
            .any(|f| f == "Mint and freeze authority active"));
    }

    #[test]
    fn test_unknown_numeric_flags_insufficient_data() {
        let outcome = score(&RiskFactors {
            liquidity_usd: None,
            ..favorable_factors()
        });
        assert_eq!(outcome.breakdown.liquidity, 0);
        assert!(outcome
            .flags
            .iter()
            .any(|f| f == "Insufficient data: liquidity unknown"));
        // No low-liquidity flag: unknown is not the same as known-low
        assert!(!outcome.flags.iter().any(|f| f == "Low liquidity"));
    }

    #[test]
    fn test_unknown_booleans_score_unfavorably() {
        let outcome = score(&RiskFactors {
            mint_authority_revoked: None,
            freeze_authority_revoked: None,
            ownership_renounced: None,
            has_audit: None,
            has_social_media: None,
            token_age_days: None,
            ..favorable_factors()
        });
        assert_eq!(outcome.breakdown.authority, 0);
        assert_eq!(outcome.breakdown.credibility, 0);
    }

    #[test]
    fn test_unknown_honeypot_scores_zero_without_override() {
        let outcome = score(&RiskFactors {
            is_honeypot: None,
            ..favorable_factors()
        });
        assert_eq!(outcome.breakdown.honeypot, 0);
        assert_ne!(outcome.category, RiskCategory::LikelyScam);
        assert!(!outcome.flags.iter().any(|f| f == "HONEYPOT DETECTED"));
    }

    #[test]
    fn test_score_equals_breakdown_total() {
        for factors in [
            favorable_factors(),
            RiskFactors::default(),
            RiskFactors {
                is_honeypot: Some(true),
                ..favorable_factors()
            },
        ] {
            let outcome = score(&factors);
            assert_eq!(outcome.score as u32, outcome.breakdown.total().min(100));
        }
    }

    #[test]
    fn test_out_of_range_percentages_clamped() {
        let outcome = score(&RiskFactors {
            lp_locked_percentage: Some(Decimal::from(150)),
            holder_concentration_top10_pct: Some(Decimal::from(-10)),
            ..favorable_factors()
        });
        assert_eq!(outcome.breakdown.lp_lock, 20);
        assert_eq!(outcome.breakdown.holder_concentration, 10);
    }

    #[test]
    fn test_age_tiers() {
        let young = score(&RiskFactors {
            token_age_days: Some(3),
            has_audit: Some(false),
            has_social_media: Some(false),
            ownership_renounced: Some(false),
            ..favorable_factors()
        });
        assert_eq!(young.breakdown.credibility, 0);

        let week_old = score(&RiskFactors {
            token_age_days: Some(10),
            has_audit: Some(false),
            has_social_media: Some(false),
            ownership_renounced: Some(false),
            ..favorable_factors()
        });
        assert_eq!(week_old.breakdown.credibility, 2);

        let mature = score(&RiskFactors {
            token_age_days: Some(365),
            has_audit: Some(false),
            has_social_media: Some(false),
            ownership_renounced: Some(false),
            ..favorable_factors()
        });
        assert_eq!(mature.breakdown.credibility, 4);
    }
}
