// Vaani Engine — Inference Gateway
//
// Client for the remote inference service. The service owns the language
// model; this side only ships the utterance plus recent conversation
// context and maps the structured reply back into the pipeline.
//
// The trait seam exists so the dispatcher can be exercised with scripted
// gateways in tests instead of a live server.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::atoms::config::AssistantConfig;
use crate::atoms::constants::ACTION_NONE;
use crate::atoms::error::{AssistantError, AssistantResult};

// ── Wire types ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    text: &'a str,
    context: &'a str,
}

/// Structured reply from the inference service. Absent fields degrade to
/// inert defaults rather than failing the parse.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayReply {
    #[serde(default)]
    pub reply: String,
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

fn default_action() -> String {
    ACTION_NONE.to_string()
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    ollama: Option<String>,
}

// ── Trait seam ─────────────────────────────────────────────────────────────

#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// One inference round-trip. `context` is the newline-joined recent
    /// conversation, possibly empty.
    async fn generate(&self, text: &str, context: &str) -> AssistantResult<GatewayReply>;

    /// Liveness probe; false on any transport or status problem.
    async fn health(&self) -> bool;
}

// ── HTTP implementation ────────────────────────────────────────────────────

pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGateway {
    pub fn new(config: &AssistantConfig) -> AssistantResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.response_timeout_secs))
            .build()?;
        Ok(HttpGateway {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceGateway for HttpGateway {
    async fn generate(&self, text: &str, context: &str) -> AssistantResult<GatewayReply> {
        let url = format!("{}/query", self.endpoint);
        debug!("[gateway] POST {} ({} bytes context)", url, context.len());

        let response = self
            .client
            .post(&url)
            .json(&QueryRequest { text, context })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Gateway(format!(
                "inference service returned {}",
                status
            )));
        }

        let reply: GatewayReply = response.json().await?;
        if reply.reply.trim().is_empty() {
            return Err(AssistantError::Gateway("empty reply from inference service".into()));
        }
        info!(
            "[gateway] reply action='{}' confidence={:?}",
            reply.action, reply.confidence
        );
        Ok(reply)
    }

    async fn health(&self) -> bool {
        let url = format!("{}/health", self.endpoint);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<HealthResponse>().await {
                    Ok(h) => {
                        debug!("[gateway] health status='{}' ollama={:?}", h.status, h.ollama);
                        h.status == "healthy"
                    }
                    Err(e) => {
                        warn!("[gateway] malformed health response: {}", e);
                        false
                    }
                }
            }
            Ok(response) => {
                warn!("[gateway] health probe returned {}", response.status());
                false
            }
            Err(e) => {
                debug!("[gateway] health probe failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_parses_full_payload() {
        let json = r#"{
            "reply": "Calling your mother now",
            "action": "call",
            "target": "mom",
            "emotion": "helpful",
            "confidence": 0.92
        }"#;
        let r: GatewayReply = serde_json::from_str(json).unwrap();
        assert_eq!(r.reply, "Calling your mother now");
        assert_eq!(r.action, "call");
        assert_eq!(r.target, "mom");
        assert_eq!(r.emotion.as_deref(), Some("helpful"));
        assert_eq!(r.confidence, Some(0.92));
    }

    #[test]
    fn missing_fields_default_to_inert() {
        let r: GatewayReply = serde_json::from_str(r#"{"reply": "Hello there"}"#).unwrap();
        assert_eq!(r.action, "none");
        assert_eq!(r.target, "");
        assert!(r.emotion.is_none());
        assert!(r.confidence.is_none());
    }

    #[test]
    fn health_payload_shapes() {
        let h: HealthResponse =
            serde_json::from_str(r#"{"status": "healthy", "ollama": "connected"}"#).unwrap();
        assert_eq!(h.status, "healthy");
        assert_eq!(h.ollama.as_deref(), Some("connected"));

        let h: HealthResponse = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        assert_eq!(h.status, "degraded");
        assert!(h.ollama.is_none());
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let mut config = AssistantConfig::default();
        config.endpoint = "http://127.0.0.1:8000/".to_string();
        let g = HttpGateway::new(&config).unwrap();
        assert_eq!(g.endpoint(), "http://127.0.0.1:8000");
    }
}
