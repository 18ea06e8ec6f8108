use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::games::converter::{flags, ConvertError};

pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest";

/// Body of `GET {rates_url}/{BASE}`. Error bodies decode with empty rates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestRates {
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
}

impl LatestRates {
    pub fn rate(&self, target: &str) -> Result<f64, ConvertError> {
        self.rates
            .get(target)
            .copied()
            .ok_or_else(|| ConvertError::UnknownCurrency {
                base: self.base.clone(),
                target: target.to_string(),
            })
    }

    /// Currency codes in sorted order.
    pub fn codes(&self) -> Vec<String> {
        self.rates.keys().cloned().collect()
    }
}

#[derive(Clone)]
pub struct RateClient {
    http: reqwest::Client,
    base_url: String,
}

impl RateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn latest(&self, base: &str) -> Result<LatestRates, ConvertError> {
        let url = format!("{}/{}", self.base_url, base);
        debug!(%url, "fetching rates");
        let mut latest: LatestRates = self.http.get(url).send().await?.json().await?;
        if latest.base.is_empty() {
            latest.base = base.to_string();
        }
        Ok(latest)
    }

    pub async fn rate(&self, base: &str, target: &str) -> Result<f64, ConvertError> {
        self.latest(base).await?.rate(target)
    }

    /// Codes quoted against USD, or the offline flag list if the lookup fails.
    pub async fn currency_codes(&self) -> Vec<String> {
        match self.latest("USD").await {
            Ok(latest) if !latest.rates.is_empty() => latest.codes(),
            Ok(_) => {
                warn!("rate table was empty, using offline currency list");
                flags::known_codes()
            }
            Err(err) => {
                warn!(%err, "currency list unavailable, using offline list");
                flags::known_codes()
            }
        }
    }
}
