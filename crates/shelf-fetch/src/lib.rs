// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use shelf_app::Record;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_SOURCE_URL: &str = "https://fetch-hiring.s3.amazonaws.com/hiring.json";

#[derive(Debug, Clone)]
pub struct Client {
    url: Url,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = parse_source_url(url)?;
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self { url, timeout, http })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn fetch_records(&self) -> Result<Vec<Record>> {
        debug!(url = %self.url, timeout_ms = self.timeout.as_millis() as u64, "fetching records");
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .map_err(|error| connection_error(self.url.as_str(), error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let body = response.text().context("read records response")?;
        let records = decode_records(&body)?;
        info!(url = %self.url, count = records.len(), "fetched records");
        Ok(records)
    }
}

pub fn parse_source_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("source.url must not be empty");
    }
    let url = Url::parse(trimmed).with_context(|| format!("invalid source url {trimmed:?}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!(
            "source url {trimmed:?} uses unsupported scheme {other:?}; use http or https, or pass --file for local JSON"
        ),
    }
}

pub fn decode_records(json: &str) -> Result<Vec<Record>> {
    let payload: Vec<RecordPayload> =
        serde_json::from_str(json).context("decode records JSON")?;
    Ok(payload.into_iter().map(RecordPayload::into_record).collect())
}

pub fn load_records_file(path: &Path) -> Result<Vec<Record>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read records file {}", path.display()))?;
    let records =
        decode_records(&raw).with_context(|| format!("load records file {}", path.display()))?;
    info!(path = %path.display(), count = records.len(), "loaded records file");
    Ok(records)
}

fn connection_error(url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach {} -- check [source].url or load a local file with --file ({})",
        url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(message) = parsed.error.or(parsed.message)
        && !message.is_empty()
    {
        return anyhow!("fetch failed ({}): {}", status.as_u16(), message);
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('{') {
        return anyhow!("fetch failed ({}): {}", status.as_u16(), trimmed);
    }

    match status.canonical_reason() {
        Some(reason) => anyhow!("fetch failed ({}): {}", status.as_u16(), reason),
        None => anyhow!("server returned {}", status.as_u16()),
    }
}

#[derive(Debug, Deserialize)]
struct RecordPayload {
    id: i64,
    #[serde(rename = "listId")]
    list_id: i64,
    name: Option<String>,
}

impl RecordPayload {
    fn into_record(self) -> Record {
        Record::new(self.id, self.list_id, self.name.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Client, clean_error_response, decode_records, parse_source_url};
    use anyhow::Result;
    use reqwest::StatusCode;
    use shelf_app::Record;
    use std::time::Duration;

    #[test]
    fn decode_records_accepts_null_and_missing_names() -> Result<()> {
        let records = decode_records(
            r#"[{"id": 684, "listId": 1, "name": "Item 684"},
                {"id": 276, "listId": 1, "name": null},
                {"id": 808, "listId": 4}]"#,
        )?;
        assert_eq!(
            records,
            vec![
                Record::new(684, 1, Some("Item 684")),
                Record::new(276, 1, None),
                Record::new(808, 4, None),
            ]
        );
        Ok(())
    }

    #[test]
    fn decode_records_keeps_blank_names_for_the_filter() -> Result<()> {
        let records = decode_records(r#"[{"id": 1, "listId": 2, "name": ""}]"#)?;
        assert_eq!(records[0].label.as_deref(), Some(""));
        Ok(())
    }

    #[test]
    fn decode_records_rejects_non_integer_group_keys() {
        let error = decode_records(r#"[{"id": 1, "listId": "two", "name": "Item"}]"#)
            .expect_err("string listId should fail");
        assert!(error.to_string().contains("decode records JSON"));
    }

    #[test]
    fn decode_records_rejects_non_array_payload() {
        assert!(decode_records(r#"{"id": 1}"#).is_err());
        assert!(decode_records("not json").is_err());
    }

    #[test]
    fn decode_records_handles_empty_array() -> Result<()> {
        assert!(decode_records("[]")?.is_empty());
        Ok(())
    }

    #[test]
    fn parse_source_url_requires_http_scheme() {
        assert!(parse_source_url("https://fetch-hiring.s3.amazonaws.com/hiring.json").is_ok());
        assert!(parse_source_url("  http://localhost:8080/items.json ").is_ok());

        let empty = parse_source_url("  ").expect_err("empty url should fail");
        assert!(empty.to_string().contains("must not be empty"));

        let file = parse_source_url("file:///tmp/items.json").expect_err("file url should fail");
        assert!(file.to_string().contains("--file"));

        assert!(parse_source_url("not a url").is_err());
    }

    #[test]
    fn client_keeps_url_and_timeout() -> Result<()> {
        let client = Client::new("http://localhost:9/items.json", Duration::from_millis(250))?;
        assert_eq!(client.url(), "http://localhost:9/items.json");
        assert_eq!(client.timeout(), Duration::from_millis(250));
        Ok(())
    }

    #[test]
    fn clean_error_response_prefers_json_message() {
        let error = clean_error_response(StatusCode::FORBIDDEN, r#"{"message":"Access Denied"}"#);
        assert_eq!(error.to_string(), "fetch failed (403): Access Denied");

        let error = clean_error_response(StatusCode::BAD_GATEWAY, r#"{"error":"upstream down"}"#);
        assert_eq!(error.to_string(), "fetch failed (502): upstream down");
    }

    #[test]
    fn clean_error_response_falls_back_to_short_body_then_reason() {
        let error = clean_error_response(StatusCode::NOT_FOUND, "no such key\n");
        assert_eq!(error.to_string(), "fetch failed (404): no such key");

        let error = clean_error_response(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(
            error.to_string(),
            "fetch failed (500): Internal Server Error"
        );
    }
}
