use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::api::{FilterQuery, SearchQuery, StocksApi, StocksQuery, DEFAULT_PAGE_LIMIT, PAGE_LIMIT};
use crate::domain::{SortField, SortOrder, StockRecord};
use crate::error::CoreError;

pub const FETCH_FALLBACK_ERROR: &str = "Failed to load stocks";

/// Sort fields in the order a picker should offer them.
pub const SORT_FIELDS: [SortField; 12] = [
    SortField::Time,
    SortField::Ticker,
    SortField::Company,
    SortField::Action,
    SortField::Brokerage,
    SortField::RatingTo,
    SortField::TargetTo,
    SortField::CreatedAt,
    SortField::UpdatedAt,
    SortField::Id,
    SortField::TargetFrom,
    SortField::RatingFrom,
];

/// Which query shape drives the displayed page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Search,
    Filter,
}

/// Working parameters of the list store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub limit: u32,
    pub offset: u32,
    pub sort: SortField,
    pub order: SortOrder,
    pub query: String,
    pub action_filter: String,
    pub rating_filter: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            limit: PAGE_LIMIT.clamp(DEFAULT_PAGE_LIMIT),
            offset: 0,
            sort: SortField::Time,
            order: SortOrder::Desc,
            query: String::new(),
            action_filter: String::new(),
            rating_filter: String::new(),
        }
    }
}

impl QueryState {
    pub fn has_search(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.action_filter.is_empty() || !self.rating_filter.is_empty()
    }

    /// Search beats filters, filters beat the plain list.
    pub fn view_mode(&self) -> ViewMode {
        if self.has_search() {
            ViewMode::Search
        } else if self.has_active_filters() {
            ViewMode::Filter
        } else {
            ViewMode::List
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StocksState {
    pub items: Vec<StockRecord>,
    pub total: u64,
    pub params: QueryState,
    pub loading: bool,
    pub error: Option<String>,
    pub mode: ViewMode,
}

impl StocksState {
    pub fn can_go_prev(&self) -> bool {
        self.params.offset > 0 && self.mode != ViewMode::Search
    }

    pub fn can_go_next(&self) -> bool {
        u64::from(self.params.offset) + u64::from(self.params.limit) < self.total
            && self.mode != ViewMode::Search
    }

    pub fn current_page(&self) -> u64 {
        u64::from(self.params.offset / self.params.limit.max(1)) + 1
    }

    pub fn total_pages(&self) -> u64 {
        self.total
            .div_ceil(u64::from(self.params.limit.max(1)))
            .max(1)
    }
}

/// Paged list of rating records with list/search/filter modes.
///
/// Setters only change parameters; callers invoke [`StocksStore::fetch`] to load
/// the page they describe. Overlapping fetches are not serialized: whichever
/// response resolves last wins.
pub struct StocksStore {
    api: Arc<StocksApi>,
    state: watch::Sender<StocksState>,
}

impl StocksStore {
    pub fn new(api: Arc<StocksApi>) -> Self {
        let (state, _) = watch::channel(StocksState::default());
        Self { api, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<StocksState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> StocksState {
        self.state.borrow().clone()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update_params(|params| params.query = query);
    }

    pub fn set_sort(&self, sort: SortField) {
        self.update_params(|params| params.sort = sort);
    }

    pub fn set_order(&self, order: SortOrder) {
        self.update_params(|params| params.order = order);
    }

    pub fn set_action_filter(&self, action: impl Into<String>) {
        let action = action.into();
        self.update_params(|params| params.action_filter = action);
    }

    pub fn set_rating_filter(&self, rating: impl Into<String>) {
        let rating = rating.into();
        self.update_params(|params| params.rating_filter = rating);
    }

    pub fn clear_filters(&self) {
        self.update_params(|params| {
            params.action_filter.clear();
            params.rating_filter.clear();
        });
    }

    /// Changes the page size, clamped to the list endpoint's range.
    pub fn set_limit(&self, limit: i64) {
        let limit = PAGE_LIMIT.clamp(limit);
        self.update_params(|params| params.limit = limit);
    }

    /// Advances one page when `can_go_next` holds. Does not fetch.
    pub fn next_page(&self) -> bool {
        self.state.send_if_modified(|state| {
            if !state.can_go_next() {
                return false;
            }
            state.params.offset = state.params.offset.saturating_add(state.params.limit);
            true
        })
    }

    /// Steps back one page when `can_go_prev` holds. Does not fetch.
    pub fn prev_page(&self) -> bool {
        self.state.send_if_modified(|state| {
            if !state.can_go_prev() {
                return false;
            }
            state.params.offset = state.params.offset.saturating_sub(state.params.limit);
            true
        })
    }

    /// Loads the page described by the current parameters.
    ///
    /// Failures are recorded in `error`; the previous `items` and `total` stay.
    pub async fn fetch(&self) {
        let mut params = QueryState::default();
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
            state.mode = state.params.view_mode();
            params = state.params.clone();
        });

        let mode = params.view_mode();
        debug!(mode = ?mode, offset = params.offset, limit = params.limit, "fetching stocks");

        let outcome = match mode {
            ViewMode::Search => self
                .api
                .search(&SearchQuery::new(params.query.trim(), i64::from(params.limit)))
                .await
                .map(|page| (page.data, page.total)),
            ViewMode::Filter => self
                .api
                .filter(&FilterQuery {
                    action: non_empty(&params.action_filter),
                    rating: non_empty(&params.rating_filter),
                    limit: i64::from(params.limit),
                    offset: i64::from(params.offset),
                })
                .await
                .map(|page| (page.data, page.total)),
            ViewMode::List => self
                .api
                .list(&StocksQuery {
                    limit: i64::from(params.limit),
                    offset: i64::from(params.offset),
                    sort: params.sort,
                    order: params.order,
                })
                .await
                .map(|page| (page.data, page.total)),
        };

        self.state
            .send_modify(|state| apply_outcome(state, mode, outcome));
    }

    fn update_params(&self, apply: impl FnOnce(&mut QueryState)) {
        self.state.send_modify(|state| {
            apply(&mut state.params);
            state.params.offset = 0;
        });
    }
}

/// Folds a finished load into `state`. A failure keeps the previous page.
fn apply_outcome(
    state: &mut StocksState,
    mode: ViewMode,
    outcome: Result<(Vec<StockRecord>, u64), CoreError>,
) {
    match outcome {
        Ok((items, total)) => {
            debug!(count = items.len(), total, "stocks loaded");
            state.items = items;
            state.total = total;
            if mode == ViewMode::Search {
                state.params.offset = 0;
            }
        }
        Err(error) => {
            debug!(%error, "stocks fetch failed");
            state.error = Some(error.display_message(FETCH_FALLBACK_ERROR));
        }
    }
    state.loading = false;
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}
