mod dashboard;
mod detail;
mod single_shot;
mod stocks;

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tickerdash_core::{ClientConfig, CoreError, StocksApi, Stores, Transport};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{trace, Instrument};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::{Metadata, RequestId};
use crate::output::Envelope;

/// Payload of one command plus the error its action recorded, if any.
pub struct CommandResult {
    pub data: Value,
    pub error: Option<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self { data, error: None }
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    /// Local validation errors abort the command; API errors become output.
    pub fn from_outcome<T, F>(outcome: Result<T, CoreError>, to_value: F) -> Result<Self, CliError>
    where
        F: FnOnce(T) -> Result<Value, serde_json::Error>,
    {
        match outcome {
            Ok(value) => Ok(Self::ok(to_value(value)?)),
            Err(error) => Self::failed(error),
        }
    }

    pub fn failed(error: CoreError) -> Result<Self, CliError> {
        match error {
            CoreError::Validation(error) => Err(error.into()),
            error => Ok(Self::ok(Value::Null).with_error(Some(error.to_string()))),
        }
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope, CliError> {
    let config = client_config(cli);
    let api = Arc::new(StocksApi::new(Transport::new(config)));
    let stores = Stores::new(api.clone());

    let watchers = [
        trace_changes(stores.stocks.subscribe(), "stocks"),
        trace_changes(stores.metadata.subscribe(), "metadata"),
        trace_changes(stores.recommendations.subscribe(), "recommendations"),
        trace_changes(stores.sync.subscribe(), "sync"),
    ];

    let request_id = RequestId::new_v4();
    let started = Instant::now();
    let span = tracing::info_span!("command", request_id = %request_id);
    let result = dispatch(&cli.command, &api, &stores).instrument(span).await;

    for watcher in watchers {
        watcher.abort();
    }
    let result = result?;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    Ok(Envelope {
        meta: Metadata::new(request_id, latency_ms, api.transport().base_url())?,
        data: result.data,
        error: result.error,
    })
}

async fn dispatch(
    command: &Command,
    api: &StocksApi,
    stores: &Stores,
) -> Result<CommandResult, CliError> {
    match command {
        Command::Stocks(args) => stocks::run(args, &stores.stocks).await,
        Command::Show(args) => detail::show(args, api).await,
        Command::Ticker(args) => detail::ticker(args, api).await,
        Command::Latest(args) => detail::latest(args, api).await,
        Command::Metadata => single_shot::metadata(&stores.metadata).await,
        Command::Recommendations(args) => {
            single_shot::recommendations(args, &stores.recommendations).await
        }
        Command::Sync => single_shot::sync(&stores.sync).await,
        Command::Dashboard => dashboard::run(stores).await,
    }
}

fn client_config(cli: &Cli) -> ClientConfig {
    let config = match &cli.base_url {
        Some(base_url) => ClientConfig::new(base_url),
        None => ClientConfig::from_env(),
    };
    config.with_timeout_ms(cli.timeout_ms)
}

/// Logs every state transition a store publishes.
fn trace_changes<T>(mut changes: watch::Receiver<T>, store: &'static str) -> JoinHandle<()>
where
    T: Debug + Send + Sync + 'static,
{
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            trace!(store, state = ?*changes.borrow_and_update(), "store state changed");
        }
    })
}
