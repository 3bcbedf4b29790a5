//! Shared fixtures for behavior tests: a scripted transport and canned payloads.

pub use std::sync::Arc;
pub use tickerdash_core::{
    ClientConfig, HttpMethod, ScriptedHttpClient, StocksApi, Stores, Transport,
};

pub const BASE_URL: &str = "http://ratings.test/api/v1";

/// API handle whose every request is answered by the returned scripted client.
pub fn scripted_api() -> (Arc<ScriptedHttpClient>, Arc<StocksApi>) {
    let client = Arc::new(ScriptedHttpClient::new());
    let transport = Transport::with_http_client(ClientConfig::new(BASE_URL), client.clone());
    (client, Arc::new(StocksApi::new(transport)))
}

pub fn record_json(id: &str, ticker: &str) -> String {
    format!(
        r#"{{"id":"{id}","ticker":"{ticker}","target_from":"$100.00","target_to":"$110.00",
        "company":"{ticker} Inc.","action":"upgraded by","brokerage":"The Goldman Sachs Group",
        "rating_from":"Neutral","rating_to":"Buy","time":"2026-02-01T00:30:05Z",
        "created_at":"2026-02-01T01:00:00Z","updated_at":"2026-02-01T01:00:00Z"}}"#
    )
}

/// `/stocks`-shaped page holding `count` records out of `total`.
pub fn page_json(count: usize, total: u64) -> String {
    let records = (0..count)
        .map(|index| record_json(&index.to_string(), "AAPL"))
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"data":[{records}],"total":{total},"limit":20,"offset":0}}"#)
}

pub fn search_json(query: &str, count: usize) -> String {
    let records = (0..count)
        .map(|index| record_json(&index.to_string(), query))
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"query":"{query}","data":[{records}],"total":{count}}}"#)
}

pub fn error_json(message: &str) -> String {
    format!(r#"{{"error":"{message}"}}"#)
}
