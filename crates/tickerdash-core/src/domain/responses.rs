use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::StockRecord;

/// `GET /stocks` page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StocksPage {
    pub data: Vec<StockRecord>,
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

/// `GET /stocks/search` result. Search results are not paginated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub query: String,
    pub data: Vec<StockRecord>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFilters {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub rating: String,
}

/// `GET /stocks/filter` page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPage {
    #[serde(default)]
    pub filters: AppliedFilters,
    pub data: Vec<StockRecord>,
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

/// `GET /stocks/latest` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestPage {
    pub data: Vec<StockRecord>,
    pub total: u64,
}

/// Every rating change recorded for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerHistory {
    pub ticker: String,
    #[serde(default)]
    pub company: String,
    pub history: Vec<StockRecord>,
    pub total: u64,
}

/// Distinct filter values known to the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub ratings: Vec<String>,
}

/// Confidence attached to a recommendation. Unknown values decode as `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub stock: StockRecord,
    pub score: f64,
    #[serde(default)]
    pub reason: String,
    pub confidence: Confidence,
}

/// `GET /recommendations` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub criteria: BTreeMap<String, f64>,
}

/// Outcome of `POST /stocks/fetch`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub total_new: u64,
    #[serde(default)]
    pub total_updated: u64,
    #[serde(default)]
    pub total_fetched: u64,
    #[serde(default)]
    pub duration_ms: u64,
}
