//! Dataset loading and record normalization.
//!
//! The dataset is a JSON document holding either a top-level array of paper
//! records or an object with a `papers` array. It is fetched once per session
//! from a local file or an HTTP(S) URL.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::CACHE_CONTROL;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::Paper;
use crate::date::parse_published;

/// Default upper bound on an HTTP fetch of the dataset.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP request error: {0}")]
    Http(#[source] reqwest::Error),
    #[error("HTTP {status} fetching {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("timed out after {}s fetching {url}", .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },
    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected dataset layout: {0}")]
    Shape(String),
}

/// Where the dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interpret `s` as a URL when it has an http(s) scheme, otherwise as a path.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl From<&str> for DataSource {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Fetch and normalize the dataset. Performs exactly one read or request.
pub async fn load(source: &DataSource, timeout: Duration) -> Result<Vec<Paper>, LoadError> {
    let bytes = match source {
        DataSource::File(path) => tokio::fs::read(path).await.map_err(|e| LoadError::Io {
            path: path.clone(),
            source: e,
        })?,
        DataSource::Url(url) => fetch(url, timeout).await?,
    };

    let papers = parse_papers(&bytes)?;
    tracing::info!(source = %source, count = papers.len(), "dataset loaded");
    Ok(papers)
}

async fn fetch(url: &str, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("paperdeck/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(LoadError::Http)?;

    let classify = |e: reqwest::Error| {
        if e.is_timeout() {
            LoadError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            LoadError::Http(e)
        }
    };

    let resp = client
        .get(url)
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(classify)?;

    if !resp.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    let body = resp.bytes().await.map_err(classify)?;
    Ok(body.to_vec())
}

/// Parse a dataset payload into normalized papers, preserving record order.
///
/// Only the top-level layout can fail; individual records degrade to
/// defaults field by field. Records that are not JSON objects are skipped.
pub fn parse_papers(bytes: &[u8]) -> Result<Vec<Paper>, LoadError> {
    let value: Value = serde_json::from_slice(bytes)?;

    let records = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("papers") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(LoadError::Shape(format!(
                    "`papers` is {}, expected an array",
                    json_kind(&other)
                )));
            }
            None => {
                return Err(LoadError::Shape(
                    "object has no `papers` field".to_string(),
                ));
            }
        },
        other => {
            return Err(LoadError::Shape(format!(
                "top level is {}, expected an array or an object with `papers`",
                json_kind(&other)
            )));
        }
    };

    let mut papers = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match record {
            Value::Object(map) => papers.push(normalize_record(&map)),
            other => {
                tracing::warn!(index, kind = json_kind(&other), "skipping non-object record");
            }
        }
    }
    Ok(papers)
}

fn normalize_record(map: &Map<String, Value>) -> Paper {
    let published = text_field(map, "published");
    let published_at = parse_published(&published);
    if published_at.is_none() {
        tracing::debug!(published = %published, "unparsable publication date");
    }

    Paper {
        title: text_field(map, "title"),
        summary: text_field(map, "summary"),
        link: text_field(map, "link"),
        published,
        published_at,
        authors: text_list(map, "authors"),
        categories: text_list(map, "categories"),
        source: optional_text(map, "source"),
        matched_keywords: text_list(map, "matched_keywords"),
        id: optional_text(map, "id"),
        doi: optional_text(map, "doi"),
        primary_category: optional_text(map, "primary_category"),
        updated: optional_text(map, "updated"),
    }
}

fn text_field(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn optional_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn text_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
