//! Core data model for Vigil
//!
//! Value types shared across the scoring engine, cache, and orchestrator:
//! - `TokenId`: validated token identifier
//! - `RiskFactors`: the immutable factor bundle collected for one pass
//! - `ScreeningResult` and friends: the scored output

mod factors;
mod result;
mod token;

pub use factors::*;
pub use result::*;
pub use token::*;
