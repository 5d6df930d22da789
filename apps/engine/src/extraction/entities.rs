//! Optional named-entity stage.
//!
//! The extraction pipeline is polymorphic over this capability: a recognizer
//! backend is chosen at startup and injected into the [`ProfileExtractor`]
//! as an `Arc<dyn EntityRecognizer>`. Extraction must produce a correct
//! profile through the regex heuristics whether the recognizer is disabled,
//! returns nothing useful, or fails outright at runtime.
//!
//! [`ProfileExtractor`]: crate::extraction::ProfileExtractor

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Labels the recognizer collaborator may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Email,
    Phone,
    Location,
    Skill,
}

/// A labeled span of text returned by the recognizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
}

/// Pluggable entity-recognition backend.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn process(&self, text: &str) -> Result<Vec<Entity>>;
}

/// The "unavailable" variant: never produces entities, so every extractor
/// takes its regex fallback path. This is the default backend.
pub struct DisabledRecognizer;

#[async_trait]
impl EntityRecognizer for DisabledRecognizer {
    async fn process(&self, _text: &str) -> Result<Vec<Entity>> {
        Ok(Vec::new())
    }
}

/// The "available" variant: wraps an external recognition service that
/// accepts raw text and returns labeled spans as JSON.
pub struct RemoteRecognizer {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    entities: Vec<Entity>,
}

impl RemoteRecognizer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }
}

#[async_trait]
impl EntityRecognizer for RemoteRecognizer {
    async fn process(&self, text: &str) -> Result<Vec<Entity>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RecognizeRequest { text })
            .send()
            .await?
            .error_for_status()?;
        let body: RecognizeResponse = response.json().await?;
        Ok(body.entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_recognizer_returns_no_entities() {
        let rec = DisabledRecognizer;
        let out = rec.process("John Doe\njohn@example.com").await.unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_entity_label_wire_format_is_screaming_snake() {
        let s = serde_json::to_string(&EntityLabel::Person).unwrap();
        assert_eq!(s, "\"PERSON\"");
        let back: EntityLabel = serde_json::from_str("\"LOCATION\"").unwrap();
        assert_eq!(back, EntityLabel::Location);
    }

    #[test]
    fn test_recognize_response_deserializes() {
        let json = r#"{"entities": [{"label": "PERSON", "text": "Jane Roe"}]}"#;
        let parsed: RecognizeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.entities.len(), 1);
        assert_eq!(parsed.entities[0].label, EntityLabel::Person);
    }
}
