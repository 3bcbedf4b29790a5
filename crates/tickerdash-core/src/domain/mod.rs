//! # Domain Models
//!
//! Wire types for the ratings API.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StockRecord`] | One analyst rating change |
//! | [`SortField`] / [`SortOrder`] | List ordering |
//! | [`StocksPage`] / [`SearchPage`] / [`FilterPage`] | Paged record envelopes |
//! | [`TickerHistory`] | All records for one ticker |
//! | [`Metadata`] | Distinct action and rating values |
//! | [`RecommendationSet`] | Scored recommendations |
//! | [`SyncReport`] | Result of an upstream sync |
//!
//! Records are never edited client-side; a refetch replaces them wholesale.

mod models;
mod responses;

pub use models::{SortField, SortOrder, StockRecord};
pub use responses::{
    AppliedFilters, Confidence, FilterPage, LatestPage, Metadata, Recommendation,
    RecommendationSet, SearchPage, StocksPage, SyncReport, TickerHistory,
};
