pub mod auth;
pub mod deck;
pub mod domain;
pub mod fallback;
pub mod ports;
pub mod session;
pub mod text;

#[cfg(test)]
mod fakes;

pub use auth::{AuthContext, AuthState};
pub use deck::{fetch_examples_lenient, load_deck, DeckOptions, DeckOrigin, LoadedDeck};
pub use domain::{
    LearnedReceipt, ProgressTotals, Story, User, UserStats, VerseExample, Word, WordId, WordPage,
    WordSummary, WordType,
};
pub use ports::{
    ExampleSource, IdentityProvider, PortError, PortResult, ProgressSink, StorySource, UserStream,
    WordSource,
};
pub use session::{
    Advance, LearningSession, SessionError, SessionNotice, SessionOptions, SessionPhase,
    SessionPorts, SessionProgress, SessionSummary,
};
