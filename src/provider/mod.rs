use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;

pub mod gemini;

/// The text-generation backend: one prompt in, one text response out.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(cfg: &Config, api_key: String) -> DynProvider {
    Box::new(gemini::GeminiProvider::new(
        cfg.api_base.clone(),
        cfg.model.clone(),
        api_key,
    ))
}
