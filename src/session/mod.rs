use crate::errors::StoreError;
use crate::outfit::{Conditions, HistoryEntry, SuggestionRequest};
use crate::store::{JsonStore, SaveReport};
use crate::stylist::Stylist;

/// Per-run state of the interactive front end: the wardrobe in use, the last
/// answer shown and the last feedback given. Owned by the command handler and
/// passed explicitly, never global.
#[derive(Debug, Default)]
pub struct Session {
    pub wardrobe: Vec<String>,
    pub suggestion: Option<String>,
    pub feedback: String,
}

/// One answer from the stylist and what happened when it was logged.
#[derive(Debug)]
pub struct Turn {
    pub text: String,
    pub saved: Result<SaveReport, StoreError>,
}

impl Session {
    pub fn with_wardrobe(items: Vec<String>) -> Self {
        Self { wardrobe: items, ..Self::default() }
    }

    fn request(&self, conditions: Conditions) -> SuggestionRequest {
        SuggestionRequest { conditions, items: self.wardrobe.clone() }
    }

    pub async fn suggest(&mut self, stylist: &Stylist, store: &JsonStore, conditions: Conditions) -> Turn {
        let text = stylist.generate(&self.request(conditions)).await;
        self.record(store, conditions, text)
    }

    pub async fn refine(
        &mut self,
        stylist: &Stylist,
        store: &JsonStore,
        conditions: Conditions,
        feedback: String,
    ) -> Turn {
        let text = stylist.refine(&self.request(conditions), &feedback).await;
        self.feedback = feedback;
        self.record(store, conditions, text)
    }

    // Failure strings are logged too; history mirrors what the user saw.
    fn record(&mut self, store: &JsonStore, conditions: Conditions, text: String) -> Turn {
        let saved = store.append_history(HistoryEntry::new(conditions, text.clone()));
        self.suggestion = Some(text.clone());
        Turn { text, saved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outfit::*;
    use crate::provider::Provider;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    struct Stub;

    #[async_trait]
    impl Provider for Stub {
        async fn generate(&self, prompt: &str) -> Result<String> {
            if prompt.contains("User Feedback") {
                Ok("STUB_REFINED".into())
            } else {
                Ok("STUB_OK".into())
            }
        }
    }

    struct Down;

    #[async_trait]
    impl Provider for Down {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    fn conditions() -> Conditions {
        Conditions {
            weather: Weather::Sunny,
            season: Season::Summer,
            mood: Mood::Playful,
            event: Event::CasualOuting,
            style: StylePreference::Streetwear,
            color: ColorPreference::Vibrant,
        }
    }

    fn store(dir: &std::path::Path) -> JsonStore {
        JsonStore::new(dir.join("outfit_history.json"), dir.join("wardrobes.json"))
    }

    #[tokio::test]
    async fn suggestion_is_shown_and_logged() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        let stylist = Stylist::new(Box::new(Stub));
        let mut session = Session::with_wardrobe(vec!["Blue jeans".into(), "White sneakers".into()]);

        let turn = session.suggest(&stylist, &store, conditions()).await;
        assert_eq!(turn.text, "STUB_OK");
        assert!(turn.saved.is_ok());
        assert_eq!(session.suggestion.as_deref(), Some("STUB_OK"));

        let history = store.load_history().data;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].outfit, "STUB_OK");
        assert_eq!(history[0].conditions(), conditions());
    }

    #[tokio::test]
    async fn refine_keeps_feedback_and_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        let stylist = Stylist::new(Box::new(Stub));
        let mut session = Session::with_wardrobe(vec!["Red hoodie".into()]);

        session.suggest(&stylist, &store, conditions()).await;
        let turn = session.refine(&stylist, &store, conditions(), "warmer".into()).await;

        assert_eq!(turn.text, "STUB_REFINED");
        assert_eq!(session.feedback, "warmer");
        assert_eq!(session.suggestion.as_deref(), Some("STUB_REFINED"));
        let outfits: Vec<_> = store.load_history().data.into_iter().map(|e| e.outfit).collect();
        assert_eq!(outfits, vec!["STUB_OK", "STUB_REFINED"]);
    }

    #[tokio::test]
    async fn provider_failure_still_returns_a_turn() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        let stylist = Stylist::new(Box::new(Down));
        let mut session = Session::with_wardrobe(vec!["Black heels".into()]);

        let turn = session.suggest(&stylist, &store, conditions()).await;
        assert!(crate::stylist::is_failure(&turn.text));
        assert!(turn.text.contains("connection refused"));
        assert_eq!(store.load_history().data.len(), 1);
    }
}
