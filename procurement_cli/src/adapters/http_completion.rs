//! HTTP completion adapter against an OpenAI-compatible chat completions
//! endpoint.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial HttpCompletion adapter.

#[derive(serde::Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: std::vec::Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(serde::Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: std::vec::Vec<ChatChoice>,
}

/// Calls an OpenAI-compatible `/chat/completions` endpoint with a single
/// user message and returns the raw response text. Unlike `HttpEmbedder`,
/// failures here are propagated rather than degraded, since the extraction
/// and agent stages already treat a missing completion as "fall back to the
/// prior stage" at the call site.
pub struct HttpCompletion {
    client: reqwest::Client,
    base_url: String,
    api_key: std::option::Option<String>,
    model: String,
    temperature: f32,
}

impl HttpCompletion {
    pub fn new(base_url: String, api_key: std::option::Option<String>, model: String) -> Self {
        HttpCompletion { client: reqwest::Client::new(), base_url, api_key, model, temperature: 0.2 }
    }
}

#[async_trait::async_trait]
impl extraction::json_completion::JsonCompletionPort for HttpCompletion {
    async fn complete_json(&self, prompt: &str) -> std::result::Result<std::string::String, std::string::String> {
        let body = ChatRequest {
            model: &self.model,
            messages: std::vec![ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
        };

        let mut request = self.client.post(std::format!("{}/chat/completions", self.base_url)).json(&body);
        if let std::option::Option::Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|error| std::format!("completion request failed: {error}"))?;
        if !response.status().is_success() {
            return std::result::Result::Err(std::format!("completion provider returned status {}", response.status()));
        }

        let parsed: ChatResponse = response.json().await.map_err(|error| std::format!("completion decode failed: {error}"))?;
        match parsed.choices.into_iter().next() {
            std::option::Option::Some(choice) => std::result::Result::Ok(choice.message.content),
            std::option::Option::None => std::result::Result::Err(std::string::String::from("completion response had no choices")),
        }
    }
}
