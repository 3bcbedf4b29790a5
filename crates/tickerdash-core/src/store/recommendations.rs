use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::api::StocksApi;
use crate::domain::Recommendation;

pub const RECOMMENDATIONS_FALLBACK_ERROR: &str = "Failed to load recommendations";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationsState {
    pub items: Vec<Recommendation>,
    pub generated_at: String,
    pub count: u32,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct RecommendationsStore {
    api: Arc<StocksApi>,
    state: watch::Sender<RecommendationsState>,
}

impl RecommendationsStore {
    pub fn new(api: Arc<StocksApi>) -> Self {
        let (state, _) = watch::channel(RecommendationsState::default());
        Self { api, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<RecommendationsState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> RecommendationsState {
        self.state.borrow().clone()
    }

    /// Loads the top recommendations; `limit` defaults to 10.
    pub async fn fetch_recommendations(&self, limit: Option<i64>) {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let outcome = self.api.recommendations(limit).await;

        self.state.send_modify(|state| {
            match outcome {
                Ok(set) => {
                    debug!(count = set.count, "recommendations loaded");
                    state.items = set.recommendations;
                    state.generated_at = set.generated_at;
                    state.count = set.count;
                }
                Err(error) => {
                    state.error = Some(error.display_message(RECOMMENDATIONS_FALLBACK_ERROR));
                }
            }
            state.loading = false;
        });
    }
}
