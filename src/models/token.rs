//! Token identifier value type
//!
//! A `TokenId` is an opaque string naming a token mint, optionally prefixed
//! with the chain it lives on (`solana:So111...`). Without a prefix the
//! identifier is assumed to be a Solana mint. Equality is exact string
//! match, so the same mint on two chains is two distinct identifiers.

use crate::error::ScreenerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte length of a decoded mint address
const MINT_BYTE_LEN: usize = 32;

/// Validated token identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Parse and validate a raw token identifier
    ///
    /// Accepts `address` or `chain:address`, where `chain` is lowercase
    /// alphanumeric and `address` is base58 decoding to exactly 32 bytes.
    pub fn parse(raw: &str) -> Result<Self, ScreenerError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ScreenerError::InvalidInput("empty identifier".to_string()));
        }

        let address = match raw.split_once(':') {
            Some((chain, address)) => {
                if chain.is_empty()
                    || !chain
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                {
                    return Err(ScreenerError::InvalidInput(format!(
                        "bad chain prefix in '{}'",
                        raw
                    )));
                }
                address
            }
            None => raw,
        };

        let decoded = bs58::decode(address).into_vec().map_err(|_| {
            ScreenerError::InvalidInput(format!("'{}' is not valid base58", raw))
        })?;

        if decoded.len() != MINT_BYTE_LEN {
            return Err(ScreenerError::InvalidInput(format!(
                "'{}' decodes to {} bytes, expected {}",
                raw,
                decoded.len(),
                MINT_BYTE_LEN
            )));
        }

        Ok(Self(raw.to_string()))
    }

    /// The full identifier string, including any chain prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The address part, with any chain prefix stripped
    pub fn address(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, address)) => address,
            None => &self.0,
        }
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
