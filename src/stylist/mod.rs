use tracing::{info, warn};

use crate::outfit::SuggestionRequest;
use crate::prompt;
use crate::provider::DynProvider;

/// Prefix of every in-band failure string returned by [`Stylist`].
pub const FAILURE_MARKER: &str = "❌";

pub fn is_failure(text: &str) -> bool {
    text.starts_with(FAILURE_MARKER)
}

/// Turns a suggestion request into outfit text.
///
/// Provider failures never escape: they come back as a string starting with
/// [`FAILURE_MARKER`] so the caller can render them like any other answer.
pub struct Stylist {
    provider: DynProvider,
}

impl Stylist {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    pub async fn generate(&self, req: &SuggestionRequest) -> String {
        let prompt = prompt::build_initial_prompt(&req.conditions, &req.items);
        self.ask(&prompt, "generating").await
    }

    pub async fn refine(&self, req: &SuggestionRequest, feedback: &str) -> String {
        let prompt = prompt::build_refinement_prompt(&req.conditions, &req.items, feedback);
        self.ask(&prompt, "refining").await
    }

    async fn ask(&self, prompt: &str, verb: &str) -> String {
        tracing::debug!(%prompt, "stylist: prompt");
        match self.provider.generate(prompt).await {
            Ok(text) => {
                info!(bytes = text.len(), "stylist: {verb} succeeded");
                text
            }
            Err(e) => {
                warn!(error = %e, "stylist: {verb} failed");
                format!("{FAILURE_MARKER} Error {verb} outfit: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outfit::*;
    use crate::provider::Provider;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct Fixed(&'static str);

    #[async_trait]
    impl Provider for Fixed {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl Provider for Failing {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(anyhow!("quota exhausted"))
        }
    }

    struct Recording(Arc<Mutex<Vec<String>>>);

    #[async_trait]
    impl Provider for Recording {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.0.lock().unwrap().push(prompt.to_string());
            Ok("ok".into())
        }
    }

    fn request() -> SuggestionRequest {
        SuggestionRequest {
            conditions: Conditions {
                weather: Weather::Sunny,
                season: Season::Summer,
                mood: Mood::Playful,
                event: Event::CasualOuting,
                style: StylePreference::Streetwear,
                color: ColorPreference::Vibrant,
            },
            items: vec!["Blue jeans".into(), "White sneakers".into()],
        }
    }

    #[tokio::test]
    async fn generate_returns_provider_text_verbatim() {
        let s = Stylist::new(Box::new(Fixed("STUB_OK")));
        assert_eq!(s.generate(&request()).await, "STUB_OK");
    }

    #[tokio::test]
    async fn generate_failure_is_in_band() {
        let s = Stylist::new(Box::new(Failing));
        let out = s.generate(&request()).await;
        assert!(is_failure(&out));
        assert!(out.starts_with("❌ Error generating outfit:"));
        assert!(out.contains("quota exhausted"));
    }

    #[tokio::test]
    async fn refine_failure_is_in_band() {
        let s = Stylist::new(Box::new(Failing));
        let out = s.refine(&request(), "more color").await;
        assert!(out.starts_with("❌ Error refining outfit:"));
        assert!(out.contains("quota exhausted"));
    }

    #[tokio::test]
    async fn each_call_sends_exactly_one_prompt() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Stylist::new(Box::new(Recording(seen.clone())));
        s.generate(&request()).await;
        s.refine(&request(), "swap the sneakers").await;

        let prompts = seen.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("Wardrobe: Blue jeans, White sneakers"));
        assert!(!prompts[0].contains("User Feedback"));
        assert!(prompts[1].contains("User Feedback: swap the sneakers"));
    }

    #[test]
    fn plain_text_is_not_a_failure() {
        assert!(!is_failure("**Outfit**: ❌ nothing matches"));
    }
}
