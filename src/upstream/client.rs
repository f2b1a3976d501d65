//! Generative-text endpoint client
//!
//! One request per user turn against a `generateContent`-style HTTP API, with
//! the credential passed as a query parameter. A non-2xx status or a reply
//! missing `candidates[0].content.parts[0].text` is an upstream error; the
//! caller decides what a failed turn means.

use super::TextGenerator;
use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client for the generative upstream
pub struct GenerativeClient {
    config: UpstreamConfig,
    client: reqwest::Client,
    api_key: String,
}

impl GenerativeClient {
    /// Create a client, resolving the credential from the configured
    /// environment variable.
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let api_key = Self::resolve_credential(&config.credential_env)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            client,
            api_key,
        })
    }

    /// Create a client with an explicit credential (for tests and embedders
    /// that manage credentials themselves).
    pub fn with_api_key(config: UpstreamConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            client,
            api_key: api_key.into(),
        })
    }

    /// Resolve credential from environment variable
    fn resolve_credential(credential_env: &str) -> Result<String> {
        std::env::var(credential_env).map_err(|_| {
            Error::Config(format!(
                "Failed to resolve upstream credential from env var: {}",
                credential_env
            ))
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GenerativeClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "generateContent returned {}: {}",
                status, body
            )));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse generateContent reply: {}", e)))?;

        reply.first_text().ok_or_else(|| {
            Error::Upstream("generateContent reply contained no candidate text".to_string())
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Extract `candidates[0].content.parts[0].text`, if present and non-empty
    fn first_text(&self) -> Option<String> {
        let part = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?;
        if part.text.is_empty() {
            None
        } else {
            Some(part.text.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_reply() {
        let reply: GenerateResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"role": "model",
                                 "parts": [{"text": "A derivative measures change."}]}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            reply.first_text().as_deref(),
            Some("A derivative measures change.")
        );
    }

    #[test]
    fn test_parse_reply_without_candidates() {
        let reply: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(reply.first_text().is_none());

        let reply: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(reply.first_text().is_none());
    }

    #[test]
    fn test_parse_reply_with_empty_parts() {
        let reply: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
        )
        .unwrap();
        assert!(reply.first_text().is_none());
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 1024,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        let config = json.get("generationConfig").unwrap();
        assert_eq!(config.get("maxOutputTokens").unwrap(), 1024);
        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            serde_json::json!("hi")
        );
    }

    #[test]
    fn test_endpoint_includes_model() {
        let config = UpstreamConfig {
            api_base: "http://localhost:9999/v1beta".to_string(),
            model: "test-model".to_string(),
            ..Default::default()
        };
        let client = GenerativeClient::with_api_key(config, "secret").unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/test-model:generateContent"
        );
    }

    #[tokio::test]
    async fn test_non_2xx_reply_is_upstream_error() {
        use std::io::{Read, Write};

        // One-shot listener returning a canned 503
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf);
            let body = "overloaded";
            let response = format!(
                "HTTP/1.1 503 Service Unavailable\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).unwrap();
        });

        let config = UpstreamConfig {
            api_base: format!("http://{}/v1beta", addr),
            model: "test-model".to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        let client = GenerativeClient::with_api_key(config, "secret").unwrap();

        let err = client.generate("hello").await.unwrap_err();
        match err {
            Error::Upstream(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("overloaded"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn test_missing_credential_env_fails() {
        let config = UpstreamConfig {
            credential_env: "TUTORMIND_TEST_KEY_THAT_DOES_NOT_EXIST".to_string(),
            ..Default::default()
        };
        assert!(GenerativeClient::new(config).is_err());
    }
}
