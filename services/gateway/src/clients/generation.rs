//! Generation backend client
//!
//! The backend takes a subject photo, a style reference image, and a
//! transformation prompt, and returns the generated output image. The
//! shipped client posts base64 payloads as JSON to a configured HTTP
//! endpoint with a bearer API key and a bounded request timeout.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend rejected the job with status {status}")]
    Rejected { status: u16 },

    #[error("backend returned no image data")]
    EmptyResult,

    #[error("backend returned undecodable image data")]
    BadPayload,
}

/// The image generation backend as the gateway sees it.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Produce a styled output image from the subject photo, the style
    /// reference image, and the transformation prompt.
    async fn generate(
        &self,
        subject: &[u8],
        style_reference: &[u8],
        prompt: &str,
    ) -> Result<Vec<u8>, GenerationError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationJob<'a> {
    prompt: &'a str,
    subject_image: String,
    style_image: String,
}

#[derive(Debug, Deserialize)]
struct GenerationResult {
    image: String,
}

/// HTTP client for a remote generation service.
pub struct HttpGenerationClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpGenerationClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl GenerationBackend for HttpGenerationClient {
    async fn generate(
        &self,
        subject: &[u8],
        style_reference: &[u8],
        prompt: &str,
    ) -> Result<Vec<u8>, GenerationError> {
        let job = GenerationJob {
            prompt,
            subject_image: BASE64.encode(subject),
            style_image: BASE64.encode(style_reference),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&job)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let result: GenerationResult = response.json().await?;
        if result.image.is_empty() {
            return Err(GenerationError::EmptyResult);
        }
        BASE64
            .decode(result.image.as_bytes())
            .map_err(|_| GenerationError::BadPayload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_serializes_camel_case_base64() {
        let job = GenerationJob {
            prompt: "a buzz cut",
            subject_image: BASE64.encode(b"subject"),
            style_image: BASE64.encode(b"style"),
        };

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["prompt"], "a buzz cut");
        assert_eq!(value["subjectImage"], BASE64.encode(b"subject"));
        assert_eq!(value["styleImage"], BASE64.encode(b"style"));
    }

    #[test]
    fn test_result_decodes_from_backend_json() {
        let raw = format!(r#"{{"image":"{}"}}"#, BASE64.encode(b"generated"));
        let result: GenerationResult = serde_json::from_str(&raw).unwrap();
        assert_eq!(BASE64.decode(result.image).unwrap(), b"generated");
    }
}
