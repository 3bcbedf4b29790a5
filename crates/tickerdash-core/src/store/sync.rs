use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

use crate::api::StocksApi;
use crate::domain::SyncReport;

pub const SYNC_FALLBACK_ERROR: &str = "Failed to sync stocks";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncState {
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<SyncReport>,
}

/// Tracks the upstream sync action. A failed sync keeps the last report.
pub struct SyncStore {
    api: Arc<StocksApi>,
    state: watch::Sender<SyncState>,
}

impl SyncStore {
    pub fn new(api: Arc<StocksApi>) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        Self { api, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SyncState {
        self.state.borrow().clone()
    }

    pub async fn run_sync(&self) {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let outcome = self.api.sync().await;

        self.state.send_modify(|state| {
            match outcome {
                Ok(report) => {
                    info!(
                        total_new = report.total_new,
                        total_updated = report.total_updated,
                        duration_ms = report.duration_ms,
                        "sync finished"
                    );
                    state.result = Some(report);
                }
                Err(error) => state.error = Some(error.display_message(SYNC_FALLBACK_ERROR)),
            }
            state.loading = false;
        });
    }
}
