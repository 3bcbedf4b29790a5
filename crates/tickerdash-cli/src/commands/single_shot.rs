use tickerdash_core::{MetadataStore, RecommendationsStore, SyncStore};

use crate::cli::RecommendationsArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn metadata(store: &MetadataStore) -> Result<CommandResult, CliError> {
    store.fetch_metadata().await;
    let state = store.snapshot();
    Ok(CommandResult::ok(serde_json::to_value(&state)?).with_error(state.error))
}

pub async fn recommendations(
    args: &RecommendationsArgs,
    store: &RecommendationsStore,
) -> Result<CommandResult, CliError> {
    store
        .fetch_recommendations(args.limit.map(i64::from))
        .await;
    let state = store.snapshot();
    Ok(CommandResult::ok(serde_json::to_value(&state)?).with_error(state.error))
}

pub async fn sync(store: &SyncStore) -> Result<CommandResult, CliError> {
    store.run_sync().await;
    let state = store.snapshot();
    Ok(CommandResult::ok(serde_json::to_value(&state)?).with_error(state.error))
}
