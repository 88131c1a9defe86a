//! crates/vocab_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the remote REST API and the identity provider.

use crate::domain::{
    LearnedReceipt, ProgressTotals, Story, User, UserStats, VerseExample, Word, WordId, WordPage,
};
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., HTTP, auth).
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// Stream of identity changes. `None` means signed out.
pub type UserStream = Pin<Box<dyn Stream<Item = Option<User>> + Send>>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait WordSource: Send + Sync {
    /// Next words the current user has not learned yet.
    async fn fetch_words_to_learn(&self, limit: usize) -> PortResult<Vec<Word>>;

    async fn get_word(&self, id: WordId) -> PortResult<Word>;

    async fn search_words(&self, query: &str, limit: usize) -> PortResult<Vec<Word>>;

    async fn list_words(&self, page: u32, limit: u32) -> PortResult<WordPage>;
}

#[async_trait]
pub trait ExampleSource: Send + Sync {
    /// Searches verse usages of the given Arabic text.
    async fn fetch_examples(&self, arabic: &str, count: usize) -> PortResult<Vec<VerseExample>>;
}

#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Durably records that the current user has learned a word.
    async fn record_word_learned(&self, id: WordId) -> PortResult<LearnedReceipt>;

    async fn unlearn_word(&self, id: WordId) -> PortResult<ProgressTotals>;

    async fn record_batch_learned(&self, ids: &[WordId]) -> PortResult<ProgressTotals>;

    async fn user_stats(&self) -> PortResult<UserStats>;

    async fn learned_words(&self, page: u32, limit: u32) -> PortResult<WordPage>;
}

#[async_trait]
pub trait StorySource: Send + Sync {
    async fn list_stories(&self) -> PortResult<Vec<Story>>;

    async fn get_story(&self, id: &str) -> PortResult<Story>;

    async fn random_story(&self) -> PortResult<Story>;
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Emits the current user immediately, then every subsequent change.
    fn subscribe(&self) -> UserStream;

    async fn sign_in_with_email(&self, email: &str, password: &str) -> PortResult<User>;

    async fn sign_up_with_email(&self, email: &str, password: &str) -> PortResult<User>;

    async fn sign_out(&self) -> PortResult<()>;

    /// Returns a bearer token for the given user.
    async fn id_token(&self, user: &User) -> PortResult<String>;
}
