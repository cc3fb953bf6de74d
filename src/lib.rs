//! Vigil — token risk-screening engine
//!
//! Given a token identifier, Vigil gathers independent risk signals
//! (liquidity, LP lock, holder concentration, authority state, honeypot
//! behavior, credibility) through provider abstractions, combines them with
//! a deterministic weighted-scoring model into a 0-100 score and a risk
//! category, and caches results to avoid redundant upstream lookups.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod scoring;
pub mod screener;

// Re-export commonly used types
pub use cache::{CacheStats, CleanupHandle, ResultCache};
pub use config::{AppConfig, CacheConfig, ProviderConfig, ScreenerConfig};
pub use error::{ProviderError, ScreenerError, ScreenerResult};
pub use models::{RiskCategory, RiskFactors, ScoreBreakdown, ScreeningResult, TokenId};
pub use providers::{
    HttpProvider, MarketOverview, OverviewProvider, ScreeningLevel, SecurityInfo, SecurityProvider,
};
pub use screener::Screener;
