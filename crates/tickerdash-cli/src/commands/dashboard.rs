use serde_json::json;
use tickerdash_core::Stores;

use crate::error::CliError;

use super::stocks::page_value;
use super::CommandResult;

/// Loads the three dashboard panels concurrently; each store fails on its own.
pub async fn run(stores: &Stores) -> Result<CommandResult, CliError> {
    tokio::join!(
        stores.metadata.fetch_metadata(),
        stores.recommendations.fetch_recommendations(None),
        stores.stocks.fetch(),
    );

    let metadata = stores.metadata.snapshot();
    let recommendations = stores.recommendations.snapshot();
    let stocks = stores.stocks.snapshot();

    let errors = [&metadata.error, &recommendations.error, &stocks.error]
        .into_iter()
        .flatten()
        .cloned()
        .collect::<Vec<_>>();
    let error = (!errors.is_empty()).then(|| errors.join("; "));

    let data = json!({
        "metadata": serde_json::to_value(&metadata)?,
        "recommendations": serde_json::to_value(&recommendations)?,
        "stocks": page_value(&stocks)?,
    });

    Ok(CommandResult::ok(data).with_error(error))
}
