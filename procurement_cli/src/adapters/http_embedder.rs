//! HTTP embedding adapter against an OpenAI-compatible `/embeddings` endpoint.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial HttpEmbedder with zero-vector fallback.

#[derive(serde::Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(serde::Deserialize)]
struct EmbeddingData {
    embedding: std::vec::Vec<f32>,
}

#[derive(serde::Deserialize)]
struct EmbeddingResponse {
    data: std::vec::Vec<EmbeddingData>,
}

/// Calls an OpenAI-compatible embeddings endpoint. On any transport,
/// status, or decode failure, degrades to a zero vector of the configured
/// dimension rather than failing the caller, matching the graceful-fallback
/// posture the rest of the evidence layer takes toward the embedding
/// provider.
pub struct HttpEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: std::option::Option<String>,
    model: String,
    dimension: usize,
}

impl HttpEmbedder {
    pub fn new(base_url: String, api_key: std::option::Option<String>, model: String, dimension: usize) -> Self {
        HttpEmbedder { client: reqwest::Client::new(), base_url, api_key, model, dimension }
    }
}

#[async_trait::async_trait]
impl evidence_store::embedder::Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> std::result::Result<std::vec::Vec<f32>, std::string::String> {
        if text.is_empty() {
            return std::result::Result::Err(std::string::String::from("cannot embed empty text"));
        }

        let mut request = self.client.post(std::format!("{}/embeddings", self.base_url)).json(&EmbeddingRequest { model: &self.model, input: text });
        if let std::option::Option::Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        match request.send().await {
            std::result::Result::Ok(response) if response.status().is_success() => match response.json::<EmbeddingResponse>().await {
                std::result::Result::Ok(body) => match body.data.into_iter().next() {
                    std::option::Option::Some(data) => std::result::Result::Ok(data.embedding),
                    std::option::Option::None => {
                        println!("[HttpEmbedder] empty embedding response, falling back to zero vector");
                        std::result::Result::Ok(vec![0.0; self.dimension])
                    }
                },
                std::result::Result::Err(error) => {
                    println!("[HttpEmbedder] decode failed: {error}, falling back to zero vector");
                    std::result::Result::Ok(vec![0.0; self.dimension])
                }
            },
            std::result::Result::Ok(response) => {
                println!("[HttpEmbedder] provider returned status {}, falling back to zero vector", response.status());
                std::result::Result::Ok(vec![0.0; self.dimension])
            }
            std::result::Result::Err(error) => {
                println!("[HttpEmbedder] request failed: {error}, falling back to zero vector");
                std::result::Result::Ok(vec![0.0; self.dimension])
            }
        }
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
