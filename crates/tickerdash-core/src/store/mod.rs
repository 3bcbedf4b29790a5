//! # State stores
//!
//! Each store is an explicit state container behind a [`tokio::sync::watch`]
//! channel. Actions mutate state in place and every subscriber sees the new
//! value; [`snapshot`](StocksStore::snapshot) clones the current state.
//!
//! | Store | Action(s) | Fallback error |
//! |-------|-----------|----------------|
//! | [`StocksStore`] | setters, paging, `fetch` | `Failed to load stocks` |
//! | [`MetadataStore`] | `fetch_metadata` | `Failed to load metadata` |
//! | [`RecommendationsStore`] | `fetch_recommendations` | `Failed to load recommendations` |
//! | [`SyncStore`] | `run_sync` | `Failed to sync stocks` |
//!
//! Stores do not share state. Each holds its own handle to the API.

mod metadata;
mod recommendations;
mod stocks;
mod sync;

use std::sync::Arc;

use crate::api::StocksApi;

pub use metadata::{MetadataState, MetadataStore, METADATA_FALLBACK_ERROR};
pub use recommendations::{
    RecommendationsState, RecommendationsStore, RECOMMENDATIONS_FALLBACK_ERROR,
};
pub use stocks::{
    QueryState, StocksState, StocksStore, ViewMode, FETCH_FALLBACK_ERROR, SORT_FIELDS,
};
pub use sync::{SyncState, SyncStore, SYNC_FALLBACK_ERROR};

/// All stores of one application session, wired to a shared API handle.
pub struct Stores {
    pub stocks: StocksStore,
    pub metadata: MetadataStore,
    pub recommendations: RecommendationsStore,
    pub sync: SyncStore,
}

impl Stores {
    pub fn new(api: Arc<StocksApi>) -> Self {
        Self {
            stocks: StocksStore::new(api.clone()),
            metadata: MetadataStore::new(api.clone()),
            recommendations: RecommendationsStore::new(api.clone()),
            sync: SyncStore::new(api),
        }
    }
}
