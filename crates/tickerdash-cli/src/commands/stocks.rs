use serde_json::{json, Value};
use tickerdash_core::{StocksState, StocksStore, ViewMode};
use tracing::debug;

use crate::cli::StocksArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &StocksArgs, store: &StocksStore) -> Result<CommandResult, CliError> {
    store.set_limit(i64::from(args.limit));
    store.set_sort(args.sort);
    store.set_order(args.order);
    if let Some(query) = &args.query {
        store.set_query(query.as_str());
    }
    if let Some(action) = &args.action {
        store.set_action_filter(action.as_str());
    }
    if let Some(rating) = &args.rating {
        store.set_rating_filter(rating.as_str());
    }

    store.fetch().await;

    loop {
        let state = store.snapshot();
        // Search results are a single page; the store rewinds their offset.
        if state.error.is_some()
            || state.mode == ViewMode::Search
            || state.current_page() >= args.page
        {
            break;
        }
        if !store.next_page() {
            debug!(
                requested = args.page,
                last = state.total_pages(),
                "requested page is past the end"
            );
            break;
        }
        store.fetch().await;
    }

    let state = store.snapshot();
    Ok(CommandResult::ok(page_value(&state)?).with_error(state.error.clone()))
}

pub fn page_value(state: &StocksState) -> Result<Value, serde_json::Error> {
    Ok(json!({
        "mode": state.mode,
        "query": state.params.query,
        "filters": {
            "action": state.params.action_filter,
            "rating": state.params.rating_filter,
        },
        "sort": state.params.sort,
        "order": state.params.order,
        "items": serde_json::to_value(&state.items)?,
        "total": state.total,
        "pagination": {
            "limit": state.params.limit,
            "offset": state.params.offset,
            "current_page": state.current_page(),
            "total_pages": state.total_pages(),
            "can_go_prev": state.can_go_prev(),
            "can_go_next": state.can_go_next(),
        },
    }))
}
