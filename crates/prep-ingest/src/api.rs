//! HTTP API loading.
//!
//! The endpoint is expected to answer `200 OK` with a JSON object whose
//! `data` key holds an array of flat objects. Anything else is reported as a
//! "no data" [`IngestError`] after logging a diagnostic.

use std::time::{Duration, Instant};

use polars::prelude::DataFrame;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{info, warn};

use prep_model::CellValue;

use crate::error::{IngestError, Result};
use crate::frame::frame_from_rows;

/// HTTP request timeout.
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(10);

/// Options for [`load_api_with_options`].
#[derive(Debug, Clone, Copy)]
pub struct ApiOptions {
    /// Upper bound for the whole request, body included.
    pub timeout: Duration,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_API_TIMEOUT,
        }
    }
}

/// Fetches rows from `url` with the default 10-second timeout.
pub fn load_api(url: &str) -> Result<DataFrame> {
    load_api_with_options(url, &ApiOptions::default())
}

/// Fetches rows from `url`.
///
/// Every failure is logged at `warn` and returned as an error for which
/// [`IngestError::is_no_data`] is true, except a bad client configuration.
pub fn load_api_with_options(url: &str, options: &ApiOptions) -> Result<DataFrame> {
    let start = Instant::now();
    let result = fetch_json(url, options).and_then(|body| frame_from_json(url, &body));
    match &result {
        Ok(df) => info!(
            url = %url,
            rows = df.height(),
            columns = df.width(),
            duration_ms = start.elapsed().as_millis(),
            "loaded api response"
        ),
        Err(IngestError::ApiStatus { status, body, .. }) => {
            warn!(url = %url, status, body = %body, "request failed");
        }
        Err(error) => warn!(url = %url, error = %error, "api load failed"),
    }
    result
}

fn fetch_json(url: &str, options: &ApiOptions) -> Result<Value> {
    let classify = |source: reqwest::Error| {
        if source.is_timeout() {
            IngestError::ApiTimeout {
                url: url.to_string(),
                timeout: options.timeout,
            }
        } else {
            IngestError::ApiRequest {
                url: url.to_string(),
                source,
            }
        }
    };

    let client = Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(classify)?;
    let response = client.get(url).send().map_err(classify)?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().unwrap_or_default();
        return Err(IngestError::ApiStatus {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().map_err(classify)?;
    serde_json::from_str(&text).map_err(|e| IngestError::ApiResponse {
        url: url.to_string(),
        reason: format!("body is not valid JSON: {e}"),
    })
}

fn json_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(b) => CellValue::Text(b.to_string()),
        Value::Number(n) => match n.as_i64() {
            Some(v) => CellValue::Integer(v),
            None => n.as_f64().map_or(CellValue::Missing, CellValue::Float),
        },
        Value::String(s) => CellValue::Text(s.clone()),
        nested => CellValue::Text(nested.to_string()),
    }
}

/// Converts a `{"data": [{...}, ...]}` document into a DataFrame.
///
/// Columns are the union of object keys in first-seen order; keys absent
/// from a record become missing cells.
pub fn frame_from_json(url: &str, body: &Value) -> Result<DataFrame> {
    let unexpected = |reason: &str| IngestError::ApiResponse {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let Some(data) = body.get("data") else {
        return Err(unexpected("missing 'data' key"));
    };
    let Some(records) = data.as_array() else {
        return Err(unexpected("'data' is not an array"));
    };

    let mut columns: Vec<String> = Vec::new();
    for record in records {
        let Some(object) = record.as_object() else {
            return Err(unexpected("'data' entries must be objects"));
        };
        for key in object.keys() {
            if !columns.iter().any(|existing| existing == key) {
                columns.push(key.clone());
            }
        }
    }

    let rows: Vec<Vec<CellValue>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).map_or(CellValue::Missing, json_cell))
                .collect()
        })
        .collect();

    frame_from_rows(&columns, &rows)
}
