// File: wardrobot-core/src/classify/mod.rs
//
// Client for the external zero-shot text classifier. Generation requests
// arrive with a free-text event description ("dinner with the in-laws") and
// the classifier maps it onto one of the occasion labels. The trait keeps the
// HTTP round-trip mockable in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use wardrobot_common::models::OccasionTag;

use crate::Error;

/// Candidate labels offered to the classifier when resolving an event
/// description. "all rounder wear" is an item-side tag only; free text always
/// resolves to a concrete occasion.
pub const OCCASION_LABELS: &[&str] = &["formal wear", "casual wear", "sports wear"];

#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Returns the best-matching label out of `candidate_labels`.
    async fn classify(&self, text: &str, candidate_labels: &[&str]) -> Result<String, Error>;
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
    candidate_labels: &'a [&'a str],
}

#[derive(Deserialize)]
struct ClassifyResponse {
    label: Option<String>,
}

#[derive(Clone)]
pub struct HttpTextClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTextClassifier {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl TextClassifier for HttpTextClassifier {
    async fn classify(&self, text: &str, candidate_labels: &[&str]) -> Result<String, Error> {
        debug!("Classifying text {:?} against {:?}", text, candidate_labels);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { text, candidate_labels })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Classifier(format!(
                "classifier returned HTTP {}: {}",
                status, body
            )));
        }

        let parsed: ClassifyResponse = response.json().await?;
        parsed
            .label
            .ok_or_else(|| Error::Classifier("classifier response had no label".to_string()))
    }
}

/// Resolves a free-text event description to the occasion tag used for
/// generation queries.
pub async fn resolve_occasion(
    classifier: &dyn TextClassifier,
    text: &str,
) -> Result<OccasionTag, Error> {
    let label = classifier.classify(text, OCCASION_LABELS).await?;
    label
        .parse()
        .map_err(|_| Error::Classifier(format!("classifier returned unknown label: {}", label)))
}
