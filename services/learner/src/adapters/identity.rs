//! services/learner/src/adapters/identity.rs
//!
//! An identity provider backed by a pre-issued ID token from the
//! environment. It implements the `IdentityProvider` port from the `core`
//! crate for terminal use, where no interactive sign-in flow exists.

use crate::config::Config;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Mutex;
use vocab_core::{
    domain::User,
    ports::{IdentityProvider, PortError, PortResult, UserStream},
};

pub struct EnvIdentity {
    user: Mutex<Option<User>>,
    token: Option<String>,
}

impl EnvIdentity {
    pub fn new(user: Option<User>, token: Option<String>) -> Self {
        Self {
            user: Mutex::new(user),
            token,
        }
    }

    /// Builds the provider from `LEARNER_UID`, `LEARNER_EMAIL` and `LEARNER_ID_TOKEN`.
    pub fn from_config(config: &Config) -> Self {
        let user = match (&config.uid, &config.id_token) {
            (Some(uid), Some(_)) => Some(User {
                uid: uid.clone(),
                email: config.email.clone(),
                display_name: None,
                provider_id: "token".to_string(),
                is_anonymous: false,
            }),
            _ => None,
        };
        Self::new(user, config.id_token.clone())
    }

    fn current(&self) -> Option<User> {
        self.user.lock().ok().and_then(|u| u.clone())
    }
}

#[async_trait]
impl IdentityProvider for EnvIdentity {
    fn subscribe(&self) -> UserStream {
        // The user never changes behind our back: emit it once, then stay open.
        stream::once(futures::future::ready(self.current()))
            .chain(stream::pending())
            .boxed()
    }

    async fn sign_in_with_email(&self, _email: &str, _password: &str) -> PortResult<User> {
        Err(PortError::Unavailable(
            "email sign-in needs an interactive identity provider; set LEARNER_ID_TOKEN instead"
                .to_string(),
        ))
    }

    async fn sign_up_with_email(&self, _email: &str, _password: &str) -> PortResult<User> {
        Err(PortError::Unavailable(
            "sign-up needs an interactive identity provider".to_string(),
        ))
    }

    async fn sign_out(&self) -> PortResult<()> {
        if let Ok(mut user) = self.user.lock() {
            *user = None;
        }
        Ok(())
    }

    async fn id_token(&self, user: &User) -> PortResult<String> {
        match (self.current(), &self.token) {
            (Some(current), Some(token)) if current.uid == user.uid => Ok(token.clone()),
            _ => Err(PortError::Unauthorized),
        }
    }
}
