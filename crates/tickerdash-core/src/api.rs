//! Resource access functions, one per remote operation.
//!
//! | Operation | Method | Path | Parameters |
//! |-----------|--------|------|------------|
//! | [`StocksApi::list`] | GET | `/stocks` | limit, offset, sort, order |
//! | [`StocksApi::search`] | GET | `/stocks/search` | q, limit |
//! | [`StocksApi::filter`] | GET | `/stocks/filter` | action, rating, limit, offset |
//! | [`StocksApi::latest`] | GET | `/stocks/latest` | limit |
//! | [`StocksApi::stock_by_id`] | GET | `/stocks/{id}` | - |
//! | [`StocksApi::stocks_by_ticker`] | GET | `/stocks/ticker/{ticker}` | - |
//! | [`StocksApi::recommendations`] | GET | `/recommendations` | limit |
//! | [`StocksApi::metadata`] | GET | `/metadata` | - |
//! | [`StocksApi::sync`] | POST | `/stocks/fetch` | - |
//!
//! Numeric parameters are clamped, never rejected. Path identifiers are
//! percent-encoded.

use tracing::debug;

use crate::domain::{
    FilterPage, LatestPage, Metadata, RecommendationSet, SearchPage, SortField, SortOrder,
    StockRecord, StocksPage, SyncReport, TickerHistory,
};
use crate::error::{CoreError, ValidationError};
use crate::transport::Transport;

/// Closed numeric range used to clamp request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: u32,
    pub max: Option<u32>,
}

impl Bounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: u32) -> Self {
        Self { min, max: None }
    }

    pub fn clamp(self, value: i64) -> u32 {
        let lower = i64::from(self.min);
        let clamped = match self.max {
            Some(max) => value.clamp(lower, i64::from(max)),
            None => value.max(lower),
        };
        u32::try_from(clamped).unwrap_or(u32::MAX)
    }

    /// Clamps a float, truncating fractions. NaN maps to the lower bound.
    pub fn clamp_f64(self, value: f64) -> u32 {
        if value.is_nan() {
            return self.min;
        }
        // `as` saturates infinities at the i64 range.
        self.clamp(value.trunc() as i64)
    }

    /// Clamps user text. Anything that is not a number maps to the lower bound.
    pub fn parse(self, raw: &str) -> u32 {
        raw.trim()
            .parse::<f64>()
            .map_or(self.min, |value| self.clamp_f64(value))
    }
}

pub const PAGE_LIMIT: Bounds = Bounds::new(1, 200);
pub const OFFSET: Bounds = Bounds::at_least(0);
pub const LATEST_LIMIT: Bounds = Bounds::new(1, 100);
pub const RECOMMENDATION_LIMIT: Bounds = Bounds::new(1, 50);

pub const DEFAULT_PAGE_LIMIT: i64 = 20;
pub const DEFAULT_LATEST_LIMIT: i64 = 20;
pub const DEFAULT_RECOMMENDATION_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StocksQuery {
    pub limit: i64,
    pub offset: i64,
    pub sort: SortField,
    pub order: SortOrder,
}

impl Default for StocksQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            sort: SortField::default(),
            order: SortOrder::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub limit: i64,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>, limit: i64) -> Self {
        Self { q: q.into(), limit }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    pub action: Option<String>,
    pub rating: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for FilterQuery {
    fn default() -> Self {
        Self {
            action: None,
            rating: None,
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

/// Typed access to the ratings API on top of a [`Transport`].
#[derive(Clone)]
pub struct StocksApi {
    transport: Transport,
}

impl StocksApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub async fn list(&self, query: &StocksQuery) -> Result<StocksPage, CoreError> {
        let request = self
            .transport
            .get("/stocks")
            .with_query("limit", PAGE_LIMIT.clamp(query.limit))
            .with_query("offset", OFFSET.clamp(query.offset))
            .with_query("sort", query.sort)
            .with_query("order", query.order);

        Ok(self.transport.send_json(request).await?)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchPage, CoreError> {
        let q = query.q.trim();
        if q.is_empty() {
            return Err(ValidationError::EmptySearchQuery.into());
        }

        let request = self
            .transport
            .get("/stocks/search")
            .with_query("q", q)
            .with_query("limit", PAGE_LIMIT.clamp(query.limit));

        Ok(self.transport.send_json(request).await?)
    }

    /// Fails without a network call unless `action` or `rating` is non-blank.
    pub async fn filter(&self, query: &FilterQuery) -> Result<FilterPage, CoreError> {
        let action = trimmed(query.action.as_deref());
        let rating = trimmed(query.rating.as_deref());

        if action.is_none() && rating.is_none() {
            debug!("filter rejected: no action or rating supplied");
            return Err(ValidationError::MissingFilter.into());
        }

        let mut request = self.transport.get("/stocks/filter");
        if let Some(action) = action {
            request = request.with_query("action", action);
        }
        if let Some(rating) = rating {
            request = request.with_query("rating", rating);
        }
        let request = request
            .with_query("limit", PAGE_LIMIT.clamp(query.limit))
            .with_query("offset", OFFSET.clamp(query.offset));

        Ok(self.transport.send_json(request).await?)
    }

    /// Most recent records; `limit` defaults to 20.
    pub async fn latest(&self, limit: Option<i64>) -> Result<LatestPage, CoreError> {
        let limit = LATEST_LIMIT.clamp(limit.unwrap_or(DEFAULT_LATEST_LIMIT));
        let request = self
            .transport
            .get("/stocks/latest")
            .with_query("limit", limit);

        Ok(self.transport.send_json(request).await?)
    }

    pub async fn stock_by_id(&self, id: &str) -> Result<StockRecord, CoreError> {
        let path = format!("/stocks/{}", encode_segment(id)?);
        Ok(self.transport.send_json(self.transport.get(&path)).await?)
    }

    pub async fn stocks_by_ticker(&self, ticker: &str) -> Result<TickerHistory, CoreError> {
        let path = format!("/stocks/ticker/{}", encode_segment(ticker)?);
        Ok(self.transport.send_json(self.transport.get(&path)).await?)
    }

    /// Scored recommendations; `limit` defaults to 10.
    pub async fn recommendations(
        &self,
        limit: Option<i64>,
    ) -> Result<RecommendationSet, CoreError> {
        let limit = RECOMMENDATION_LIMIT.clamp(limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT));
        let request = self
            .transport
            .get("/recommendations")
            .with_query("limit", limit);

        Ok(self.transport.send_json(request).await?)
    }

    pub async fn metadata(&self) -> Result<Metadata, CoreError> {
        Ok(self
            .transport
            .send_json(self.transport.get("/metadata"))
            .await?)
    }

    /// Triggers an upstream sync. Runs without a timeout and is never retried.
    pub async fn sync(&self) -> Result<SyncReport, CoreError> {
        let request = self.transport.post("/stocks/fetch").without_timeout();
        Ok(self.transport.send_json(request).await?)
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn encode_segment(identifier: &str) -> Result<String, ValidationError> {
    if identifier.trim().is_empty() {
        return Err(ValidationError::EmptyIdentifier);
    }
    Ok(urlencoding::encode(identifier).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_limit_clamps_into_range() {
        assert_eq!(PAGE_LIMIT.clamp(999), 200);
        assert_eq!(PAGE_LIMIT.clamp(0), 1);
        assert_eq!(PAGE_LIMIT.clamp(-3), 1);
        assert_eq!(PAGE_LIMIT.clamp(50), 50);
    }

    #[test]
    fn non_numeric_input_maps_to_lower_bound() {
        assert_eq!(PAGE_LIMIT.clamp_f64(f64::NAN), 1);
        assert_eq!(PAGE_LIMIT.parse("abc"), 1);
        assert_eq!(OFFSET.parse(""), 0);
    }

    #[test]
    fn float_input_truncates_and_saturates() {
        assert_eq!(PAGE_LIMIT.clamp_f64(12.9), 12);
        assert_eq!(PAGE_LIMIT.clamp_f64(f64::INFINITY), 200);
        assert_eq!(OFFSET.clamp_f64(f64::NEG_INFINITY), 0);
        assert_eq!(PAGE_LIMIT.parse(" 999 "), 200);
    }

    #[test]
    fn offset_has_no_upper_bound() {
        assert_eq!(OFFSET.clamp(-5), 0);
        assert_eq!(OFFSET.clamp(4_000), 4_000);
        assert_eq!(OFFSET.clamp(i64::MAX), u32::MAX);
    }

    #[test]
    fn auxiliary_limits_use_their_own_ranges() {
        assert_eq!(LATEST_LIMIT.clamp(999), 100);
        assert_eq!(RECOMMENDATION_LIMIT.clamp(999), 50);
        assert_eq!(RECOMMENDATION_LIMIT.clamp(0), 1);
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(encode_segment("100/ABC").as_deref(), Ok("100%2FABC"));
        assert_eq!(encode_segment("BRK/B").as_deref(), Ok("BRK%2FB"));
        assert_eq!(encode_segment("  "), Err(ValidationError::EmptyIdentifier));
    }
}
