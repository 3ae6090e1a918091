//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::service::{AdviceError, AdviceService};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Connection settings for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Defaults with the API key read from `api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns [`AdviceError::MissingApiKey`] if the variable is unset or empty.
    pub fn from_env(api_key_env: &str) -> Result<Self, AdviceError> {
        let api_key = std::env::var(api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AdviceError::MissingApiKey(api_key_env.to_string()))?;
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key,
            timeout: Duration::from_secs(30),
        })
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: Url,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`AdviceError::Config`] if the base URL, model or key cannot be
    /// used to build a request, or [`AdviceError::Http`] if the client fails
    /// to build.
    pub fn new(config: GeminiConfig) -> Result<Self, AdviceError> {
        let endpoint = endpoint_url(&config.base_url, &config.model)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| AdviceError::Config("API key is not a valid header value".to_string()))?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AdviceService for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AdviceError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        tracing::debug!(endpoint = %self.endpoint, "requesting advice");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdviceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        Ok(body.text())
    }
}

fn endpoint_url(base_url: &str, model: &str) -> Result<Url, AdviceError> {
    if model.is_empty() || model.contains('/') {
        return Err(AdviceError::Config(format!("invalid model name '{model}'")));
    }
    let base = Url::parse(base_url)
        .map_err(|e| AdviceError::Config(format!("invalid base URL '{base_url}': {e}")))?;
    match base.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AdviceError::Config(format!(
                "unsupported scheme '{other}' in base URL"
            )))
        }
    }
    let base = if base.path().ends_with('/') {
        base
    } else {
        let mut with_slash = base.clone();
        with_slash.set_path(&format!("{}/", base.path()));
        with_slash
    };
    base.join(&format!("v1beta/models/{model}:generateContent"))
        .map_err(|e| AdviceError::Config(format!("cannot build endpoint: {e}")))
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, empty if there is none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> GeminiConfig {
        GeminiConfig {
            base_url: base_url.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: "test-key".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new(config(DEFAULT_BASE_URL)).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = GeminiClient::new(config("http://localhost:8080/proxy")).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://localhost:8080/proxy/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn rejects_bad_config() {
        assert!(matches!(
            GeminiClient::new(config("ftp://example.com")),
            Err(AdviceError::Config(_))
        ));
        assert!(matches!(
            GeminiClient::new(config("not a url")),
            Err(AdviceError::Config(_))
        ));
        let mut bad_model = config(DEFAULT_BASE_URL);
        bad_model.model = "../x".to_string();
        assert!(matches!(
            GeminiClient::new(bad_model),
            Err(AdviceError::Config(_))
        ));
    }

    #[test]
    fn missing_key_is_reported() {
        let err = GeminiConfig::from_env("WAGEBOOK_TEST_KEY_THAT_IS_NEVER_SET").unwrap_err();
        assert!(err.to_string().contains("WAGEBOOK_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"月薪穩定，"},{"text":"建議先存緊急預備金。"}],"role":"model"}},
            {"content":{"parts":[{"text":"ignored"}]}}
        ]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text(), "月薪穩定，建議先存緊急預備金。");
    }

    #[test]
    fn response_without_candidates_is_empty() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.text(), "");
        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(parsed.text(), "");
    }

    #[test]
    fn request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some("hi".to_string()),
                }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }
}
