use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("classifier returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("no card detected")]
    NoCardDetected,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    #[serde(rename = "class")]
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

/// Client for a Roboflow-style hosted inference endpoint. The image is
/// posted base64-encoded; the response carries (label, confidence) pairs.
pub struct RoboflowClient {
    http: reqwest::Client,
    api_url: String,
    model_id: String,
    api_key: String,
}

impl RoboflowClient {
    pub fn new(
        api_url: String,
        model_id: String,
        api_key: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url,
            model_id,
            api_key,
        })
    }

    pub async fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifierError> {
        let url = format!("{}/{}", self.api_url.trim_end_matches('/'), self.model_id);
        let body = general_purpose::STANDARD.encode(image);

        let response = self
            .http
            .post(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClassifierError::Status(response.status()));
        }

        let decoded: InferenceResponse = response.json().await?;
        Ok(decoded.predictions)
    }
}

/// Pick the highest-confidence prediction; an empty set means the frame is
/// rejected and no game state changes.
pub fn best_prediction(predictions: Vec<Prediction>) -> Result<Prediction, ClassifierError> {
    predictions
        .into_iter()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .ok_or(ClassifierError::NoCardDetected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_prediction_picks_highest_confidence() {
        let predictions = vec![
            Prediction { label: "KC".into(), confidence: 0.42 },
            Prediction { label: "AC".into(), confidence: 0.91 },
            Prediction { label: "2H".into(), confidence: 0.67 },
        ];
        let best = best_prediction(predictions).unwrap();
        assert_eq!(best.label, "AC");
    }

    #[test]
    fn empty_predictions_reject_the_frame() {
        assert!(matches!(
            best_prediction(Vec::new()),
            Err(ClassifierError::NoCardDetected)
        ));
    }

    #[test]
    fn predictions_decode_from_inference_json() {
        let raw = r#"{"predictions":[{"class":"10C","confidence":0.88,"x":120.0}]}"#;
        let decoded: InferenceResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.predictions.len(), 1);
        assert_eq!(decoded.predictions[0].label, "10C");
    }

    #[test]
    fn missing_predictions_field_decodes_as_empty() {
        let decoded: InferenceResponse = serde_json::from_str("{}").unwrap();
        assert!(decoded.predictions.is_empty());
    }
}
