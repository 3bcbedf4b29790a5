use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::api::StocksApi;

pub const METADATA_FALLBACK_ERROR: &str = "Failed to load metadata";

/// Distinct action and rating values offered as filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataState {
    pub actions: Vec<String>,
    pub ratings: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct MetadataStore {
    api: Arc<StocksApi>,
    state: watch::Sender<MetadataState>,
}

impl MetadataStore {
    pub fn new(api: Arc<StocksApi>) -> Self {
        let (state, _) = watch::channel(MetadataState::default());
        Self { api, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<MetadataState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> MetadataState {
        self.state.borrow().clone()
    }

    pub async fn fetch_metadata(&self) {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let outcome = self.api.metadata().await;

        self.state.send_modify(|state| {
            match outcome {
                Ok(metadata) => {
                    debug!(
                        actions = metadata.actions.len(),
                        ratings = metadata.ratings.len(),
                        "metadata loaded"
                    );
                    state.actions = metadata.actions;
                    state.ratings = metadata.ratings;
                }
                Err(error) => state.error = Some(error.display_message(METADATA_FALLBACK_ERROR)),
            }
            state.loading = false;
        });
    }
}
