//! Model gateway — the single point of entry for all Claude API calls in Roster.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! All model interactions MUST go through this module, and every caller must
//! carry a deterministic fallback — a gateway failure is never surfaced to an
//! end user from a happy path.
//!
//! Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all gateway calls in Roster.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;

/// Gateway failures, from the caller's point of view. Either the model could
/// not be reached at all, or it answered with something we cannot use.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    #[error("Invalid response format: {reason}")]
    InvalidResponseFormat { reason: String },
}

/// The model gateway seam. Prompt construction and JSON decoding live in the
/// callers; implementations only move a prompt to a model and JSON back.
///
/// Carried in `AppState` as `Arc<dyn ModelGateway>` so tests substitute stubs.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Submits a prompt and returns the model's output parsed as JSON.
    /// The prompt must instruct the model to return valid JSON.
    async fn submit(&self, prompt: &str, system: &str) -> Result<Value, GatewayError>;
}

/// Decodes a gateway JSON value into the caller's expected shape.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, GatewayError> {
    serde_json::from_value(value).map_err(|e| GatewayError::InvalidResponseFormat {
        reason: format!("model JSON did not match the expected shape: {e}"),
    })
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    /// Extracts the text content from the first text block.
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Production gateway over the Anthropic Messages API, with bounded
/// exponential-backoff retry on 429 and 5xx.
#[derive(Clone)]
pub struct AnthropicGateway {
    client: Client,
    api_key: String,
}

impl AnthropicGateway {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl ModelGateway for AnthropicGateway {
    async fn submit(&self, prompt: &str, system: &str) -> Result<Value, GatewayError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_reason = String::from("no request attempted");

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Gateway attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_reason = format!("request failed: {e}");
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Anthropic API returned {}: {}", status, body);
                last_reason = format!("status {}: {}", status.as_u16(), body);
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Pull the API's own message out of the error body when present
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(GatewayError::ModelUnavailable {
                    reason: format!("status {}: {message}", status.as_u16()),
                });
            }

            let parsed: MessagesResponse =
                response
                    .json()
                    .await
                    .map_err(|e| GatewayError::InvalidResponseFormat {
                        reason: format!("response body was not valid JSON: {e}"),
                    })?;

            debug!(
                "Gateway call succeeded: input_tokens={}, output_tokens={}",
                parsed.usage.input_tokens, parsed.usage.output_tokens
            );

            let text = parsed.text().ok_or_else(|| GatewayError::InvalidResponseFormat {
                reason: "no text content block in response".to_string(),
            })?;

            // Strip markdown code fences if the model wraps JSON in them
            let text = strip_json_fences(text);

            return serde_json::from_str(text).map_err(|e| GatewayError::InvalidResponseFormat {
                reason: format!("model output was not valid JSON: {e}"),
            });
        }

        Err(GatewayError::ModelUnavailable {
            reason: format!("gave up after {MAX_RETRIES} attempts; last error: {last_reason}"),
        })
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Shaped {
        summary: String,
    }

    #[test]
    fn test_decode_matching_shape() {
        let value = json!({"summary": "Strong candidate."});
        let shaped: Shaped = decode(value).unwrap();
        assert_eq!(shaped.summary, "Strong candidate.");
    }

    #[test]
    fn test_decode_mismatched_shape_is_invalid_format() {
        let value = json!({"something_else": 42});
        let result: Result<Shaped, _> = decode(value);
        assert!(matches!(
            result,
            Err(GatewayError::InvalidResponseFormat { .. })
        ));
    }

    #[test]
    fn test_text_extraction_skips_non_text_blocks() {
        let response = MessagesResponse {
            content: vec![
                ContentBlock {
                    block_type: "tool_use".to_string(),
                    text: None,
                },
                ContentBlock {
                    block_type: "text".to_string(),
                    text: Some("{\"ok\": true}".to_string()),
                },
            ],
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
            },
        };
        assert_eq!(response.text(), Some("{\"ok\": true}"));
    }
}
