pub mod types;

pub use types::{AnalysisResult, InteractionParameters, LanguageAnalysis, PronunciationReport};

use std::sync::Arc;

use tracing::info;

use crate::error::{Result, SessionError};

/// Resolves the analysis service base URL
///
/// Resolution happens once per request so an environment change mid-session
/// takes effect on the next upload.
pub trait EndpointResolver: Send + Sync {
    fn base_url(&self) -> String;
}

/// Fixed base URL, used by tests and CLI overrides
pub struct FixedEndpoint(pub String);

impl EndpointResolver for FixedEndpoint {
    fn base_url(&self) -> String {
        self.0.clone()
    }
}

/// Sends one finalized audio payload for analysis
///
/// The state machine guarantees at most one request in flight per
/// controller; implementations do not guard against overlap themselves.
#[async_trait::async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn send(
        &self,
        audio: Vec<u8>,
        params: &InteractionParameters,
    ) -> Result<AnalysisResult>;
}

/// HTTP client for the conversation analysis endpoint
pub struct AnalysisRequestClient {
    http: reqwest::Client,
    resolver: Arc<dyn EndpointResolver>,
}

impl AnalysisRequestClient {
    pub fn new(resolver: Arc<dyn EndpointResolver>) -> Self {
        Self {
            http: reqwest::Client::new(),
            resolver,
        }
    }
}

/// Query parameters for one request; the values are opaque pass-throughs
fn query_pairs(params: &InteractionParameters) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("personality", params.personality.clone()),
        ("user_level", params.user_level.clone()),
    ];

    if let Some(voice_id) = &params.voice_id {
        pairs.push(("voice_id", voice_id.clone()));
    }

    pairs
}

/// Parse a response body into an AnalysisResult
///
/// Missing required fields are a schema violation, reported as
/// `MalformedResponse`.
fn parse_result(body: &str) -> Result<AnalysisResult> {
    serde_json::from_str(body).map_err(|e| SessionError::MalformedResponse(e.to_string()))
}

#[async_trait::async_trait]
impl AnalysisTransport for AnalysisRequestClient {
    async fn send(
        &self,
        audio: Vec<u8>,
        params: &InteractionParameters,
    ) -> Result<AnalysisResult> {
        let base = self.resolver.base_url();
        let url = format!("{}/api/v1/conversation/audio", base);

        info!(
            "Uploading {} bytes to {} (personality={}, level={})",
            audio.len(),
            url,
            params.personality,
            params.user_level
        );

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("recording.wav")
            .mime_str("audio/wav")
            .map_err(|e| SessionError::RequestFailed(e.to_string()))?;

        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self
            .http
            .post(&url)
            .query(&query_pairs(params))
            .multipart(form);

        if let Some(token) = &params.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SessionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::RequestFailed(format!(
                "analysis service returned {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SessionError::RequestFailed(e.to_string()))?;

        parse_result(&body)
    }
}
