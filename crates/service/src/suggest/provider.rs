use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// One address suggestion as the provider returns it. `data` is passed
/// through untouched; clients pick the fields they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub value: String,
    #[serde(default)]
    pub unrestricted_value: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("provider request failed: {0}")]
    Upstream(String),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("provider payload could not be parsed: {0}")]
    Decode(String),
}

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, query: &str, count: u32) -> Result<Vec<Suggestion>, SuggestError>;
}

/// DaData address-suggestion client. Auth is a static token header; request
/// timeout comes from config and a timed-out call is an ordinary failure.
pub struct DaDataProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl DaDataProvider {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url, api_key })
    }
}

#[async_trait]
impl SuggestionProvider for DaDataProvider {
    #[instrument(skip(self))]
    async fn suggest(&self, query: &str, count: u32) -> Result<Vec<Suggestion>, SuggestError> {
        #[derive(Serialize)]
        struct Body<'a> {
            query: &'a str,
            count: u32,
        }
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default)]
            suggestions: Vec<Suggestion>,
        }

        let resp = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Token {}", self.api_key))
            .json(&Body { query, count })
            .send()
            .await
            .map_err(|e| SuggestError::Upstream(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SuggestError::Status(resp.status().as_u16()));
        }

        let payload: Payload = resp
            .json()
            .await
            .map_err(|e| SuggestError::Decode(e.to_string()))?;
        Ok(payload.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_parses_dadata_payload() {
        let raw = r#"{
            "value": "г Москва, ул Тверская",
            "unrestricted_value": "101000, г Москва, ул Тверская",
            "data": {"city": "Москва", "street": "Тверская"}
        }"#;
        let s: Suggestion = serde_json::from_str(raw).unwrap();
        assert_eq!(s.value, "г Москва, ул Тверская");
        assert!(s.unrestricted_value.is_some());
        assert_eq!(s.data.unwrap()["city"], "Москва");
    }

    #[test]
    fn suggestion_tolerates_minimal_payload() {
        let s: Suggestion = serde_json::from_str(r#"{"value": "г Казань"}"#).unwrap();
        assert_eq!(s.value, "г Казань");
        assert!(s.unrestricted_value.is_none());
        assert!(s.data.is_none());
    }
}
