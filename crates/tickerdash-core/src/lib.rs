//! # Tickerdash Core
//!
//! API client, domain types, and state stores for browsing analyst stock
//! rating records served by a remote REST API.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Resource access functions with parameter clamping |
//! | [`config`] | Base URL and timeout configuration |
//! | [`domain`] | Rating records and response envelopes |
//! | [`error`] | Validation and normalized API errors |
//! | [`http_client`] | HTTP transport trait and implementations |
//! | [`retry`] | Retry policy for idempotent reads |
//! | [`store`] | Observable state stores |
//! | [`transport`] | Dispatch, retry, and error normalization |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickerdash_core::{ClientConfig, StocksApi, StocksStore, Transport};
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = Arc::new(StocksApi::new(Transport::new(ClientConfig::from_env())));
//!     let store = StocksStore::new(api);
//!
//!     store.set_action_filter("upgraded by");
//!     store.fetch().await;
//!
//!     let state = store.snapshot();
//!     println!("page {} of {}", state.current_page(), state.total_pages());
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Views    │
//! └────────┬────────┘
//!          │ actions / subscribe
//!          ▼
//! ┌─────────────────┐
//! │  Stores         │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  StocksApi      │────▶│ Transport        │
//! │  (clamping)     │     │ (retry, errors)  │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │
//!                                  ▼
//!                         ┌──────────────────┐
//!                         │ HttpClient       │
//!                         │ (reqwest/script) │
//!                         └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Resource access calls return [`CoreError`]: either a local
//! [`ValidationError`] raised before any request, or a normalized [`ApiError`]
//! carrying a message and the HTTP status when one was received. Stores turn
//! both into a display string and never propagate them.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod retry;
pub mod store;
pub mod transport;

pub use api::{Bounds, FilterQuery, SearchQuery, StocksApi, StocksQuery};

pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};

pub use domain::{
    AppliedFilters, Confidence, FilterPage, LatestPage, Metadata, Recommendation,
    RecommendationSet, SearchPage, SortField, SortOrder, StockRecord, StocksPage, SyncReport,
    TickerHistory,
};

pub use error::{ApiError, CoreError, ValidationError};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient,
};

pub use retry::RetryConfig;

pub use store::{
    MetadataState, MetadataStore, QueryState, RecommendationsState, RecommendationsStore,
    StocksState, StocksStore, Stores, SyncState, SyncStore, ViewMode, SORT_FIELDS,
};

pub use transport::Transport;
