//! crates/vocab_core/src/auth.rs
//!
//! Client-side auth state. An `AuthContext` is created once at startup,
//! follows the identity provider's user changes on a background task and
//! is handed to whoever needs the current user or a bearer token.

use crate::domain::User;
use crate::ports::{IdentityProvider, PortResult};
use futures::StreamExt;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Snapshot of the auth state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the provider reported the initial user.
    pub loading: bool,
}

pub struct AuthContext {
    provider: Arc<dyn IdentityProvider>,
    state: watch::Sender<AuthState>,
    cancel: CancellationToken,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl AuthContext {
    /// Subscribes to the provider's user changes. Must run inside a Tokio runtime.
    pub fn init(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(AuthState { user: None, loading: true });
        let cancel = CancellationToken::new();

        let mut changes = provider.subscribe();
        let tx = state.clone();
        let token = cancel.clone();
        let listener = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    next = changes.next() => match next {
                        Some(user) => tx.send_modify(|s| {
                            s.user = user;
                            s.loading = false;
                        }),
                        None => {
                            tx.send_modify(|s| s.loading = false);
                            break;
                        }
                    },
                }
            }
            info!("Identity subscription closed.");
        });

        Self {
            provider,
            state,
            cancel,
            listener: Mutex::new(Some(listener)),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// A receiver that observes every state change.
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Waits until the provider reported the initial user.
    pub async fn wait_ready(&self) -> Option<User> {
        let mut rx = self.state.subscribe();
        let user = match rx.wait_for(|s| !s.loading).await {
            Ok(state) => state.user.clone(),
            Err(_) => self.current_user(),
        };
        user
    }

    pub async fn sign_in_with_email(&self, email: &str, password: &str) -> PortResult<User> {
        let user = self.provider.sign_in_with_email(email, password).await?;
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_up_with_email(&self, email: &str, password: &str) -> PortResult<User> {
        let user = self.provider.sign_up_with_email(email, password).await?;
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    /// Dev mode: signs in a local guest without contacting the provider.
    pub fn sign_in_as_guest(&self) -> User {
        let guest = User::guest();
        self.set_user(Some(guest.clone()));
        guest
    }

    pub async fn sign_out(&self) -> PortResult<()> {
        self.set_user(None);
        self.provider.sign_out().await
    }

    /// Bearer token for the current user. Guests and signed-out users have none.
    pub async fn token(&self) -> PortResult<Option<String>> {
        match self.current_user() {
            Some(user) if !user.is_guest() => self.provider.id_token(&user).await.map(Some),
            _ => Ok(None),
        }
    }

    /// Stops following the provider. Safe to call more than once.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self.listener.lock().ok().and_then(|mut slot| slot.take());
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Identity listener ended abnormally: {}", e);
            }
        }
    }

    fn set_user(&self, user: Option<User>) {
        self.state.send_modify(|s| {
            s.user = user;
            s.loading = false;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PortError, UserStream};
    use async_trait::async_trait;
    use futures::channel::mpsc;

    struct FakeIdentity {
        changes: Mutex<Option<mpsc::UnboundedReceiver<Option<User>>>>,
    }

    fn member(uid: &str) -> User {
        User {
            uid: uid.to_string(),
            email: Some(format!("{uid}@example.com")),
            display_name: None,
            provider_id: "password".to_string(),
            is_anonymous: false,
        }
    }

    fn fake_identity() -> (Arc<FakeIdentity>, mpsc::UnboundedSender<Option<User>>) {
        let (tx, rx) = mpsc::unbounded();
        (Arc::new(FakeIdentity { changes: Mutex::new(Some(rx)) }), tx)
    }

    #[async_trait]
    impl IdentityProvider for FakeIdentity {
        fn subscribe(&self) -> UserStream {
            match self.changes.lock().unwrap().take() {
                Some(rx) => Box::pin(rx),
                None => Box::pin(futures::stream::empty()),
            }
        }

        async fn sign_in_with_email(&self, email: &str, password: &str) -> PortResult<User> {
            if password == "secret" {
                Ok(member(email.split('@').next().unwrap_or(email)))
            } else {
                Err(PortError::Unauthorized)
            }
        }

        async fn sign_up_with_email(&self, email: &str, _password: &str) -> PortResult<User> {
            Ok(member(email))
        }

        async fn sign_out(&self) -> PortResult<()> {
            Ok(())
        }

        async fn id_token(&self, user: &User) -> PortResult<String> {
            Ok(format!("token-for-{}", user.uid))
        }
    }

    #[tokio::test]
    async fn follows_provider_changes() {
        let (provider, tx) = fake_identity();
        let auth = AuthContext::init(provider);
        assert!(auth.is_loading());

        tx.unbounded_send(Some(member("amina"))).unwrap();
        let user = auth.wait_ready().await;
        assert_eq!(user.map(|u| u.uid), Some("amina".to_string()));

        let mut rx = auth.watch();
        tx.unbounded_send(None).unwrap();
        rx.wait_for(|s| s.user.is_none()).await.unwrap();
        assert!(auth.current_user().is_none());

        auth.shutdown().await;
    }

    #[tokio::test]
    async fn guest_has_no_token() {
        let (provider, _tx) = fake_identity();
        let auth = AuthContext::init(provider);

        let guest = auth.sign_in_as_guest();
        assert!(guest.is_guest());
        assert!(!auth.is_loading());
        assert_eq!(auth.token().await.unwrap(), None);

        auth.shutdown().await;
    }

    #[tokio::test]
    async fn sign_in_then_out() {
        let (provider, _tx) = fake_identity();
        let auth = AuthContext::init(provider);

        assert!(matches!(
            auth.sign_in_with_email("omar@example.com", "wrong").await,
            Err(PortError::Unauthorized)
        ));
        auth.sign_in_with_email("omar@example.com", "secret").await.unwrap();
        assert_eq!(auth.token().await.unwrap(), Some("token-for-omar".to_string()));

        auth.sign_out().await.unwrap();
        assert_eq!(auth.token().await.unwrap(), None);

        auth.shutdown().await;
        auth.shutdown().await;
    }
}
