use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::report::{
    CDN_USAGE_AUDIT, GREEN_HOST_AUDIT, REFRESH_FREQUENCY_AUDIT, Report,
    SERVER_DATA_RETENTION_AUDIT, items,
};

/// Column names in output order.
pub const HEADERS: [&str; 11] = [
    "URL",
    "Green Host",
    "Static Count",
    "Cdn Hit Count",
    "Cdn Hit Rate",
    "Polling Request",
    "Polling Count",
    "Websocket Count",
    "Cookie Size",
    "Cached Resource Size",
    "Heavy Long Cache",
];

const UNKNOWN_HOST: &str = "Unknown";

/// One CSV row summarising a single report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Green Host", serialize_with = "serialize_cell")]
    pub green_host: Value,
    #[serde(rename = "Static Count")]
    pub static_count: usize,
    #[serde(rename = "Cdn Hit Count")]
    pub cdn_hit_count: usize,
    #[serde(rename = "Cdn Hit Rate")]
    pub cdn_hit_rate: String,
    #[serde(rename = "Polling Request", serialize_with = "serialize_cell")]
    pub polling_request: Value,
    #[serde(rename = "Polling Count")]
    pub polling_count: u64,
    #[serde(rename = "Websocket Count", serialize_with = "serialize_cell")]
    pub websocket_count: Value,
    #[serde(rename = "Cookie Size", serialize_with = "serialize_cell")]
    pub cookie_size: Value,
    #[serde(rename = "Cached Resource Size", serialize_with = "serialize_cell")]
    pub cached_resource_size: Value,
    #[serde(rename = "Heavy Long Cache", serialize_with = "serialize_cell")]
    pub heavy_long_cache: Value,
}

impl SummaryRow {
    pub fn from_report(report: &Report) -> Self {
        let green_items = items(report.details(GREEN_HOST_AUDIT));
        let green_host = match green_items.first() {
            Some(item) => item["hosted_by"].clone(),
            None => Value::String(UNKNOWN_HOST.to_string()),
        };

        let cdn_items = items(report.details(CDN_USAGE_AUDIT));
        let cdn_hit_count = cdn_items
            .iter()
            .filter(|item| item["cdnHit"] == Value::Bool(true))
            .count();

        let refresh = report.details(REFRESH_FREQUENCY_AUDIT);
        let polling_items = items(refresh);

        let retention = report.details(SERVER_DATA_RETENTION_AUDIT);

        SummaryRow {
            url: report.final_url().to_string(),
            green_host,
            static_count: cdn_items.len(),
            cdn_hit_count,
            cdn_hit_rate: hit_rate(cdn_hit_count, cdn_items.len()),
            polling_request: Value::Array(polling_items.to_vec()),
            polling_count: polling_count(polling_items),
            websocket_count: refresh["websocketCount"].clone(),
            cookie_size: retention["cookieTotalBytes"].clone(),
            cached_resource_size: retention["resourceCacheableBytes"].clone(),
            heavy_long_cache: retention["heavyLongCache"].clone(),
        }
    }
}

/// `hits / total` to two decimals, `"0.00"` when `total` is zero.
pub fn hit_rate(hits: usize, total: usize) -> String {
    if total == 0 {
        "0.00".to_string()
    } else {
        format!("{:.2}", hits as f64 / total as f64)
    }
}

/// Sum of `count` over polling items. Items without a numeric count add nothing.
pub fn polling_count(items: &[Value]) -> u64 {
    items.iter().filter_map(|item| item["count"].as_u64()).sum()
}

/// Text of a pass-through value inside a CSV cell.
///
/// Null becomes an empty cell and strings are written unquoted; anything
/// else is written as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn serialize_cell<S: Serializer>(value: &Value, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&cell_text(value))
}
