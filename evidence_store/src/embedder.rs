//! Defines the Embedder output port used by the Vector Store.
//!
//! Revision History
//! - 2026-01-12T00:00:00Z @AI: Initial Embedder port, adapted from the task
//!   orchestrator's embedding port for the evidence store crate.

/// Port for converting text into fixed-dimension embedding vectors.
///
/// Implementations are expected to be deterministic for a given text and
/// model version; the Vector Store does not retry on its own, so transient
/// failures should be retried inside the adapter if that is desired.
#[async_trait::async_trait]
pub trait Embedder: std::marker::Send + std::marker::Sync {
    /// Embeds a single text string.
    async fn embed(&self, text: &str) -> std::result::Result<std::vec::Vec<f32>, std::string::String>;

    /// Embeds multiple text strings; implementations may batch this more
    /// efficiently than repeated `embed` calls.
    async fn embed_batch(
        &self,
        texts: &[&str],
    ) -> std::result::Result<std::vec::Vec<std::vec::Vec<f32>>, std::string::String> {
        let mut out = std::vec::Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        std::result::Result::Ok(out)
    }

    /// The fixed dimensionality produced by this embedder.
    fn dimension(&self) -> usize;
}

#[cfg(test)]
pub(crate) struct FixedEmbedder {
    pub dim: usize,
}

#[cfg(test)]
#[async_trait::async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, text: &str) -> std::result::Result<std::vec::Vec<f32>, std::string::String> {
        let mut seed: u32 = 7;
        for byte in text.bytes() {
            seed = seed.wrapping_mul(31).wrapping_add(byte as u32);
        }
        let mut v = std::vec::Vec::with_capacity(self.dim);
        for i in 0..self.dim {
            let x = ((seed.wrapping_add(i as u32)) % 1000) as f32 / 1000.0;
            v.push(x);
        }
        std::result::Result::Ok(v)
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_embedder_is_deterministic() {
        let embedder = FixedEmbedder { dim: 8 };
        let a = embedder.embed("hello").await.unwrap();
        let b = embedder.embed("hello").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[tokio::test]
    async fn test_embed_batch_default_impl() {
        let embedder = FixedEmbedder { dim: 4 };
        let out = embedder.embed_batch(&["a", "b"]).await.unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].len(), 4);
    }
}
