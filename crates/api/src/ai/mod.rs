//! Client for an OpenAI-compatible chat-completion provider.
//!
//! Used for AI code assist in the editor. Failures never fail the calling
//! request: handlers log them and answer with an empty result.

use playground_core::completion::{select_models, strip_code_fence, user_message, SYSTEM_PROMPT};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Default model when neither the request nor `OPENAI_MODEL_DEFAULT` names one.
pub const DEFAULT_MODEL: &str = "google/gemini-3-pro-preview";

/// Default upstream base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default keywords a model id must contain to be offered to users.
pub const DEFAULT_ALLOWED_KEYWORDS: [&str; 2] = ["gpt-5", "gemini-3"];

/// Provider settings.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer key for the provider. Without it every call fails fast.
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
    pub allowed_keywords: Vec<String>,
}

impl AiConfig {
    /// Load provider settings from environment variables.
    ///
    /// | Env Var                | Default                       |
    /// |------------------------|-------------------------------|
    /// | `OPENAI_API_KEY`       | unset (AI assist disabled)    |
    /// | `OPENAI_BASE_URL`      | `https://api.openai.com/v1`   |
    /// | `OPENAI_MODEL_DEFAULT` | `google/gemini-3-pro-preview` |
    /// | `OPENAI_MODEL_ALLOWED` | `gpt-5,gemini-3`              |
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let api_key = var("OPENAI_API_KEY");
        if api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; AI code assist is disabled");
        }

        let allowed_keywords = match var("OPENAI_MODEL_ALLOWED") {
            Some(list) => list
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
            None => DEFAULT_ALLOWED_KEYWORDS.map(String::from).to_vec(),
        };

        Self {
            api_key,
            base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            default_model: var("OPENAI_MODEL_DEFAULT").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            allowed_keywords,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            allowed_keywords: DEFAULT_ALLOWED_KEYWORDS.map(String::from).to_vec(),
        }
    }
}

/// Errors from the upstream provider.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("AI provider is not configured (OPENAI_API_KEY unset)")]
    MissingKey,

    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("AI provider error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("AI provider returned no choices")]
    EmptyResponse,
}

/// Generated markup, fences already stripped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneratedCode {
    pub code: String,
}

/// A model offered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
}

/* --------------------------------------------------------------------------
Wire types
-------------------------------------------------------------------------- */

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelInfo>,
}

/* --------------------------------------------------------------------------
Client
-------------------------------------------------------------------------- */

/// HTTP client for the provider. The filtered model list is cached after the
/// first non-empty fetch.
pub struct AiClient {
    client: reqwest::Client,
    config: AiConfig,
    models: RwLock<Vec<ModelInfo>>,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: AiConfig) -> Self {
        Self {
            client,
            config,
            models: RwLock::new(Vec::new()),
        }
    }

    fn api_key(&self) -> Result<&str, AiError> {
        self.config.api_key.as_deref().ok_or(AiError::MissingKey)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Generate or modify markup from a natural-language prompt.
    ///
    /// Sends `POST {base}/chat/completions` and returns the first choice with
    /// any wrapping code fence removed.
    pub async fn generate_code(
        &self,
        prompt: &str,
        current_code: Option<&str>,
        model: Option<&str>,
    ) -> Result<GeneratedCode, AiError> {
        let key = self.api_key()?;
        let model = model
            .filter(|m| !m.is_empty())
            .unwrap_or(self.config.default_model.as_str());
        let user = user_message(prompt, current_code);
        let body = ChatRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
        };

        let response = self
            .client
            .post(self.url("chat/completions"))
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;
        let completion: ChatResponse = Self::parse_response(response).await?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(AiError::EmptyResponse)?;
        let content = choice.message.content.unwrap_or_default();

        tracing::debug!(model, chars = content.len(), "AI completion received");
        Ok(GeneratedCode {
            code: strip_code_fence(&content).to_string(),
        })
    }

    /// Models whose id contains an allowed keyword, default model first.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, AiError> {
        {
            let cached = self.models.read().await;
            if !cached.is_empty() {
                return Ok(cached.clone());
            }
        }

        let key = self.api_key()?;
        let response = self
            .client
            .get(self.url("models"))
            .bearer_auth(key)
            .send()
            .await?;
        let list: ModelList = Self::parse_response(response).await?;

        let ids = list.data.iter().map(|m| m.id.clone()).collect();
        let selected = select_models(ids, &self.config.allowed_keywords, &self.config.default_model);
        let models: Vec<ModelInfo> = selected
            .into_iter()
            .filter_map(|id| list.data.iter().find(|m| m.id == id).cloned())
            .collect();

        if !models.is_empty() {
            *self.models.write().await = models.clone();
        }
        Ok(models)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or return
    /// [`AiError::Api`] with the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
