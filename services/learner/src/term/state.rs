//! services/learner/src/term/state.rs
//!
//! Defines the application's shared state, handed to every page.

use crate::adapters::{
    ApiClient, HttpExampleSource, HttpProgressSink, HttpStorySource, HttpWordSource,
};
use crate::config::Config;
use crate::error::AppError;
use std::sync::Arc;
use vocab_core::deck::DeckOptions;
use vocab_core::ports::{ExampleSource, ProgressSink, StorySource, WordSource};
use vocab_core::session::{SessionOptions, SessionPorts};
use vocab_core::AuthContext;

//=========================================================================================
// AppState (Shared Across All Pages)
//=========================================================================================

/// The shared application state, created once at startup and passed to all pages.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthContext>,
    pub words: Arc<dyn WordSource>,
    pub examples: Arc<dyn ExampleSource>,
    pub progress: Arc<dyn ProgressSink>,
    pub stories: Arc<dyn StorySource>,
}

impl AppState {
    /// Wires the HTTP adapters for the configured API.
    pub fn connect(config: Arc<Config>, auth: Arc<AuthContext>) -> Result<Self, AppError> {
        let api = ApiClient::new(
            &config.api_base_url,
            config.request_timeout,
            Some(auth.clone()),
        )?;

        Ok(Self {
            words: Arc::new(HttpWordSource::new(api.clone())),
            examples: Arc::new(HttpExampleSource::new(
                api.clone(),
                config.example_translations.clone(),
            )),
            progress: Arc::new(HttpProgressSink::new(api.clone())),
            stories: Arc::new(HttpStorySource::new(api, config.story_text_fields.clone())),
            config,
            auth,
        })
    }

    pub fn session_ports(&self) -> SessionPorts {
        SessionPorts {
            words: self.words.clone(),
            examples: self.examples.clone(),
            progress: self.progress.clone(),
        }
    }

    /// Session settings for whoever is signed in right now.
    pub fn session_options(&self) -> SessionOptions {
        let user = self.auth.current_user();
        SessionOptions {
            deck: DeckOptions {
                batch_size: self.config.session_size,
                examples_per_word: self.config.examples_per_word,
            },
            guest: user.as_ref().is_some_and(|u| u.is_guest()),
            record_progress: user.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::EnvIdentity;
    use vocab_core::domain::User;

    async fn state_for(user: Option<User>) -> AppState {
        let token = user.as_ref().map(|_| "token".to_string());
        let auth = Arc::new(AuthContext::init(Arc::new(EnvIdentity::new(user, token))));
        auth.wait_ready().await;
        AppState::connect(Arc::new(Config::default()), auth).unwrap()
    }

    fn member() -> User {
        User {
            uid: "u-1".to_string(),
            email: None,
            display_name: None,
            provider_id: "token".to_string(),
            is_anonymous: false,
        }
    }

    #[tokio::test]
    async fn only_signed_in_members_record_progress() {
        let signed_out = state_for(None).await.session_options();
        assert!(!signed_out.guest);
        assert!(!signed_out.record_progress);

        let member = state_for(Some(member())).await.session_options();
        assert!(!member.guest);
        assert!(member.record_progress);

        let state = state_for(None).await;
        state.auth.sign_in_as_guest();
        let guest = state.session_options();
        assert!(guest.guest);
        assert!(guest.record_progress);
    }
}
