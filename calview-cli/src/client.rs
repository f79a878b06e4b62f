//! HTTP client for the calendar backend.
//!
//! The backend contract is only loosely pinned down: the events route prefix
//! varies between deployments and list responses come back either as a bare
//! JSON array or wrapped in an `items`/`events` field. The client probes the
//! configured path first and falls back to `/events` on 404 only; any other
//! failure surfaces immediately with the message mined from the error body.

use anyhow::{Context, Result, bail};
use calview_core::ViewBounds;
use chrono::{DateTime, Utc};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::Config;

/// Fallback route tried when the configured events path 404s.
const FALLBACK_EVENTS_PATH: &str = "/events";

pub struct EventsClient {
    http: reqwest::Client,
    base_url: Url,
    event_paths: Vec<String>,
}

/// Event fields sent on create/update, camelCase per the backend contract.
///
/// `None` fields are omitted from the body so `edit` can send partial
/// updates without clobbering fields it was not given.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl EventsClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(config.api_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid API base URL '{}'", config.api_url))?;

        let primary = normalize_path(&config.events_path);
        let mut event_paths = vec![primary];
        if event_paths[0] != FALLBACK_EVENTS_PATH {
            event_paths.push(FALLBACK_EVENTS_PATH.to_string());
        }

        Ok(EventsClient {
            http: reqwest::Client::new(),
            base_url,
            event_paths,
        })
    }

    /// List raw event records overlapping the given bounds.
    ///
    /// Records are returned untyped; normalization is the engine's job.
    pub async fn list_in_range(&self, bounds: &ViewBounds) -> Result<Vec<Value>> {
        let query = [
            ("start", bounds.start_rfc3339()),
            ("end", bounds.end_rfc3339()),
        ];
        let body = self.request(Method::GET, None, Some(&query), None).await?;
        Ok(extract_event_list(body.unwrap_or(Value::Null)))
    }

    pub async fn create(&self, payload: &EventPayload) -> Result<()> {
        self.request(Method::POST, None, None, Some(payload)).await?;
        Ok(())
    }

    pub async fn update(&self, id: &str, payload: &EventPayload) -> Result<()> {
        self.request(Method::PUT, Some(id), None, Some(payload)).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.request(Method::DELETE, Some(id), None, None).await?;
        Ok(())
    }

    /// Try each events path in order, falling back only on 404.
    async fn request(
        &self,
        method: Method,
        id: Option<&str>,
        query: Option<&[(&str, String)]>,
        body: Option<&EventPayload>,
    ) -> Result<Option<Value>> {
        let mut not_found = None;

        for path in &self.event_paths {
            let url = self.endpoint(path, id)?;

            let mut request = self.http.request(method.clone(), url);
            if let Some(query) = query {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("Could not reach the calendar backend at {}", self.base_url))?;

            if response.status() == StatusCode::NOT_FOUND {
                not_found = Some(anyhow::anyhow!(
                    "No events endpoint at {}{}",
                    self.base_url,
                    path.trim_start_matches('/')
                ));
                continue;
            }

            return read_body(response).await;
        }

        Err(not_found.unwrap_or_else(|| anyhow::anyhow!("No matching events endpoint found")))
    }

    fn endpoint(&self, path: &str, id: Option<&str>) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .with_context(|| format!("Invalid events path '{}'", path))?;

        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| anyhow::anyhow!("API base URL cannot hold a path"))?
                .push(id);
        }

        Ok(url)
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

async fn read_body(response: Response) -> Result<Option<Value>> {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    if !status.is_success() {
        bail!("{}", error_message(status.as_u16(), &text));
    }

    // 204 and empty 200 bodies are fine; some endpoints return plain text
    if text.is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str(&text).ok())
}

/// Mine an error body for a usable message.
///
/// JSON objects are probed for `message`/`error` fields; other non-empty
/// bodies are used verbatim; anything else becomes "Request failed (STATUS)".
fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            for key in ["message", "error"] {
                if let Some(Value::String(message)) = map.get(key) {
                    return message.clone();
                }
            }
        }
        Ok(Value::String(message)) if !message.trim().is_empty() => return message,
        _ => {
            let text = body.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }

    format!("Request failed ({})", status)
}

/// Accept a bare array or an `items`/`events` wrapper.
fn extract_event_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => ["items", "events"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_extract_event_list_shapes() {
        let bare = json!([{"id": "1"}, {"id": "2"}]);
        assert_eq!(extract_event_list(bare).len(), 2);

        let items = json!({"items": [{"id": "1"}]});
        assert_eq!(extract_event_list(items).len(), 1);

        let events = json!({"events": [{"id": "1"}], "total": 1});
        assert_eq!(extract_event_list(events).len(), 1);

        assert!(extract_event_list(json!({"unrelated": true})).is_empty());
        assert!(extract_event_list(Value::Null).is_empty());
    }

    #[test]
    fn test_error_message_mines_common_fields() {
        assert_eq!(
            error_message(400, r#"{"message": "End must be after start"}"#),
            "End must be after start"
        );
        assert_eq!(
            error_message(500, r#"{"error": "boom"}"#),
            "boom"
        );
        assert_eq!(error_message(502, "upstream unavailable"), "upstream unavailable");
        assert_eq!(error_message(500, ""), "Request failed (500)");
        assert_eq!(error_message(500, r#"{"detail": 1}"#), "Request failed (500)");
    }

    #[test]
    fn test_payload_serializes_camel_case_and_skips_none() {
        let payload = EventPayload {
            title: Some("Standup".to_string()),
            all_day: Some(false),
            start: Some(Utc.with_ymd_and_hms(2026, 3, 9, 9, 0, 0).unwrap()),
            ..EventPayload::default()
        };
        let value = serde_json::to_value(&payload).expect("Should serialize");
        let map = value.as_object().expect("Should be an object");

        assert_eq!(map["title"], "Standup");
        assert_eq!(map["allDay"], false);
        assert!(map.contains_key("start"));
        assert!(!map.contains_key("id"));
        assert!(!map.contains_key("end"));
        assert!(!map.contains_key("description"));
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let client = EventsClient::new(&Config::default()).expect("Should build");
        let url = client
            .endpoint("/api/events", Some("a b/c"))
            .expect("Should join");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:3001/api/events/a%20b%2Fc"
        );
    }

    #[test]
    fn test_fallback_path_is_registered_once() {
        let client = EventsClient::new(&Config::default()).expect("Should build");
        assert_eq!(client.event_paths, vec!["/api/events", "/events"]);

        let config = Config {
            events_path: "/events".to_string(),
            ..Config::default()
        };
        let client = EventsClient::new(&config).expect("Should build");
        assert_eq!(client.event_paths, vec!["/events"]);
    }
}
