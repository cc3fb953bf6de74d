//! REST provider adapter
//!
//! A single HTTP client satisfying both provider contracts against two
//! configured base URLs: a security metadata service and a market overview
//! service. Response shapes are this adapter's own DTOs; swapping in a
//! different upstream means writing a different adapter, not touching the
//! screener.

use super::{MarketOverview, OverviewProvider, ScreeningLevel, SecurityInfo, SecurityProvider};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::models::TokenId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Security metadata response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecurityReportDto {
    #[serde(default)]
    mint_authority_revoked: Option<bool>,
    #[serde(default)]
    freeze_authority_revoked: Option<bool>,
    #[serde(default)]
    is_honeypot: Option<bool>,
    #[serde(default)]
    ownership_renounced: Option<bool>,
    #[serde(default)]
    top10_holder_pct: Option<Decimal>,
}

/// Audit/social response (the expensive lookups, skipped under `Quick`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredibilityDto {
    #[serde(default)]
    has_audit: Option<bool>,
    #[serde(default)]
    has_social_media: Option<bool>,
}

/// Market overview response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverviewDto {
    #[serde(default)]
    liquidity_usd: Option<Decimal>,
    #[serde(default)]
    lp_locked: Option<bool>,
    #[serde(default)]
    lp_locked_pct: Option<Decimal>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// HTTP implementation of both provider contracts
pub struct HttpProvider {
    client: reqwest::Client,
    security_base_url: String,
    overview_base_url: String,
}

impl HttpProvider {
    /// Build the adapter from provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ProviderError::Upstream(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            security_base_url: config.security_base_url.trim_end_matches('/').to_string(),
            overview_base_url: config.overview_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue a GET and deserialize the JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_request_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(ProviderError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
            status if !status.is_success() => {
                return Err(ProviderError::Upstream(format!(
                    "unexpected status {} from {}",
                    status, url
                )));
            }
            _ => {}
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Upstream(format!("malformed response body: {}", e)))
    }
}

/// Map a transport-level reqwest error to the provider taxonomy
fn map_request_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Upstream(err.to_string())
    }
}

#[async_trait]
impl SecurityProvider for HttpProvider {
    async fn fetch_security_info(
        &self,
        token: &TokenId,
        level: ScreeningLevel,
    ) -> Result<SecurityInfo, ProviderError> {
        let url = format!("{}/tokens/{}/report", self.security_base_url, token.address());
        let report: SecurityReportDto = self.get_json(&url).await?;

        let mut info = SecurityInfo {
            mint_authority_revoked: report.mint_authority_revoked,
            freeze_authority_revoked: report.freeze_authority_revoked,
            is_honeypot: report.is_honeypot,
            ownership_renounced: report.ownership_renounced,
            holder_concentration_top10_pct: report.top10_holder_pct,
            has_audit: None,
            has_social_media: None,
        };

        if level == ScreeningLevel::Normal {
            let url = format!(
                "{}/tokens/{}/credibility",
                self.security_base_url,
                token.address()
            );
            match self.get_json::<CredibilityDto>(&url).await {
                Ok(credibility) => {
                    info.has_audit = credibility.has_audit;
                    info.has_social_media = credibility.has_social_media;
                }
                // Credibility signals are secondary; a missing record is not
                // a reason to fail the whole screening
                Err(ProviderError::NotFound) => {
                    tracing::debug!(token = %token, "No credibility record upstream");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(info)
    }
}

#[async_trait]
impl OverviewProvider for HttpProvider {
    async fn fetch_overview(&self, token: &TokenId) -> Result<MarketOverview, ProviderError> {
        let url = format!("{}/tokens/{}", self.overview_base_url, token.address());
        let dto: OverviewDto = self.get_json(&url).await?;

        let token_age_days = dto.created_at.and_then(|created| {
            let age = Utc::now().signed_duration_since(created);
            u32::try_from(age.num_days().max(0)).ok()
        });

        Ok(MarketOverview {
            liquidity_usd: dto.liquidity_usd,
            lp_locked: dto.lp_locked,
            lp_locked_percentage: dto.lp_locked_pct,
            token_age_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_dto_tolerates_missing_fields() {
        let dto: SecurityReportDto = serde_json::from_str("{}").unwrap();
        assert!(dto.mint_authority_revoked.is_none());
        assert!(dto.is_honeypot.is_none());
        assert!(dto.top10_holder_pct.is_none());
    }

    #[test]
    fn test_security_dto_parses_camel_case() {
        let dto: SecurityReportDto = serde_json::from_str(
            r#"{"mintAuthorityRevoked": true, "isHoneypot": false, "top10HolderPct": "41.5"}"#,
        )
        .unwrap();
        assert_eq!(dto.mint_authority_revoked, Some(true));
        assert_eq!(dto.is_honeypot, Some(false));
        assert_eq!(dto.top10_holder_pct, Some(Decimal::new(415, 1)));
    }

    #[test]
    fn test_overview_dto_parses() {
        let dto: OverviewDto = serde_json::from_str(
            r#"{"liquidityUsd": "150000", "lpLocked": true, "lpLockedPct": "90"}"#,
        )
        .unwrap();
        assert_eq!(dto.liquidity_usd, Some(Decimal::from(150_000)));
        assert_eq!(dto.lp_locked, Some(true));
        assert!(dto.created_at.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = HttpProvider::new(&ProviderConfig {
            security_base_url: "https://security.example/v1/".to_string(),
            overview_base_url: "https://overview.example/v2/".to_string(),
            timeout_ms: 1000,
        })
        .unwrap();
        assert_eq!(provider.security_base_url, "https://security.example/v1");
        assert_eq!(provider.overview_base_url, "https://overview.example/v2");
    }
}
