use serde_json::json;
use tickerdash_core::StocksApi;

use crate::cli::{LatestArgs, ShowArgs, TickerArgs};
use crate::error::CliError;

use super::CommandResult;

/// Loads a record, then the rating history of its ticker.
///
/// A history failure lands in `history_error` and keeps the record.
pub async fn show(args: &ShowArgs, api: &StocksApi) -> Result<CommandResult, CliError> {
    let stock = match api.stock_by_id(&args.id).await {
        Ok(stock) => stock,
        Err(error) => return CommandResult::failed(error),
    };

    let (history, history_error) = match api.stocks_by_ticker(&stock.ticker).await {
        Ok(history) => (Some(history), None),
        Err(error) => (None, Some(error.to_string())),
    };

    Ok(CommandResult::ok(json!({
        "stock": serde_json::to_value(&stock)?,
        "history": serde_json::to_value(&history)?,
        "history_error": history_error,
    })))
}

pub async fn ticker(args: &TickerArgs, api: &StocksApi) -> Result<CommandResult, CliError> {
    CommandResult::from_outcome(api.stocks_by_ticker(&args.ticker).await, serde_json::to_value)
}

pub async fn latest(args: &LatestArgs, api: &StocksApi) -> Result<CommandResult, CliError> {
    let limit = args.limit.map(i64::from);
    CommandResult::from_outcome(api.latest(limit).await, serde_json::to_value)
}
