use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::metadata::Metadata;

/// Command output: metadata, payload, and the store error if the action failed.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub meta: Metadata,
    pub data: Value,
    pub error: Option<String>,
}

pub fn render(envelope: &Envelope, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(envelope)?,
    }

    Ok(())
}

const COLUMNS: [(&str, usize); 7] = [
    ("id", 8),
    ("ticker", 8),
    ("company", 28),
    ("action", 16),
    ("rating", 22),
    ("target", 18),
    ("time", 20),
];

fn render_table(envelope: &Envelope) -> Result<(), CliError> {
    println!("request_id  : {}", envelope.meta.request_id);
    println!("generated_at: {}", envelope.meta.generated_at);
    println!("base_url    : {}", envelope.meta.base_url);
    println!("latency_ms  : {}", envelope.meta.latency_ms);

    if let Some(error) = &envelope.error {
        println!("error       : {error}");
    }

    match record_rows(&envelope.data) {
        Some(records) => {
            if let Some(pagination) = envelope.data.get("pagination") {
                println!(
                    "page        : {} / {}",
                    pagination["current_page"], pagination["total_pages"]
                );
            }
            println!();
            println!("{}", header_line());
            for record in records {
                println!("{}", record_line(record));
            }
        }
        None => {
            println!("data:");
            let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
            for line in pretty_data.lines() {
                println!("  {line}");
            }
        }
    }

    Ok(())
}

/// Record arrays under `items`, `history`, or `data`.
fn record_rows(data: &Value) -> Option<&Vec<Value>> {
    ["items", "history", "data"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_array))
}

fn header_line() -> String {
    COLUMNS
        .iter()
        .map(|&(name, width)| format!("{name:<width$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn record_line(record: &Value) -> String {
    let cells = [
        text(record, "id").to_owned(),
        text(record, "ticker").to_owned(),
        text(record, "company").to_owned(),
        text(record, "action").to_owned(),
        format!("{} -> {}", text(record, "rating_from"), text(record, "rating_to")),
        format!("{} -> {}", text(record, "target_from"), text(record, "target_to")),
        text(record, "time").to_owned(),
    ];

    cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, (_, width))| format!("{:<width$}", truncate(cell, *width), width = *width))
        .collect::<Vec<_>>()
        .join(" ")
}

fn text<'a>(record: &'a Value, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("")
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_owned();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
