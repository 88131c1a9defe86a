//! crates/vocab_core/src/session.rs
//!
//! The learning session controller. A session drives one pass through a
//! fixed deck of flashcards, tracks the flip state of the current card and
//! collects "I know this" / "still learning" verdicts.
//!
//! ```text
//! Loading ──► Active(position, flipped) ──► Complete
//!    └──────► Empty   (no eligible cards: "all caught up")
//! ```

use crate::deck::{load_deck, DeckOptions, DeckOrigin, LoadedDeck};
use crate::domain::{Word, WordId};
use crate::fallback::builtin_deck;
use crate::ports::{ExampleSource, ProgressSink, WordSource};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

//=========================================================================================
// Session Types
//=========================================================================================

/// The collaborators a session talks to.
#[derive(Clone)]
pub struct SessionPorts {
    pub words: Arc<dyn WordSource>,
    pub examples: Arc<dyn ExampleSource>,
    pub progress: Arc<dyn ProgressSink>,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub deck: DeckOptions,
    /// Guests review the built-in deck and never write progress remotely.
    pub guest: bool,
    /// Send "I know this" verdicts to the progress sink. Off when nobody is signed in.
    pub record_progress: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            deck: DeckOptions::default(),
            guest: false,
            record_progress: true,
        }
    }
}

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Active { position: usize, flipped: bool },
    Complete,
    /// The word service had nothing left to learn.
    Empty,
}

/// Non-blocking messages for the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// The deck could not be fetched and the built-in cards are in use.
    OfflineDeck,
    MarkedLearned { word_id: WordId },
    ProgressWriteFailed { word_id: WordId, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reviewed: usize,
    pub learned: usize,
}

/// Position of the current card, for progress bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionProgress {
    /// One-based number of the card on screen.
    pub card_number: usize,
    pub total: usize,
    /// Share of the deck already behind the current card.
    pub fraction: f64,
}

/// The result of moving past a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { position: usize },
    Completed(SessionSummary),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("No card is active (session is {0:?})")]
    NotActive(SessionPhase),
}

//=========================================================================================
// LearningSession
//=========================================================================================

pub struct LearningSession {
    id: Uuid,
    ports: SessionPorts,
    options: SessionOptions,
    deck: Vec<Word>,
    origin: DeckOrigin,
    phase: SessionPhase,
    learned: usize,
    notices: Option<UnboundedSender<SessionNotice>>,
    /// Progress writes still in flight. Dropping the handles detaches them.
    pending: Vec<JoinHandle<()>>,
}

impl LearningSession {
    /// Creates a session in the `Loading` phase. Call [`start`](Self::start) to fill the deck.
    pub fn new(ports: SessionPorts, options: SessionOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            ports,
            options,
            deck: Vec::new(),
            origin: DeckOrigin::Remote,
            phase: SessionPhase::Loading,
            learned: 0,
            notices: None,
            pending: Vec::new(),
        }
    }

    /// Routes notices to the given channel.
    pub fn with_notices(mut self, tx: UnboundedSender<SessionNotice>) -> Self {
        self.notices = Some(tx);
        self
    }

    /// Creates and starts a session in one go.
    pub async fn begin(ports: SessionPorts, options: SessionOptions) -> Self {
        let mut session = Self::new(ports, options);
        session.start().await;
        session
    }

    /// Loads the deck and positions the session on the first card.
    pub async fn start(&mut self) {
        self.phase = SessionPhase::Loading;

        let loaded = if self.options.guest {
            info!("Guest session {}: using the built-in deck", self.id);
            LoadedDeck {
                cards: builtin_deck(),
                origin: DeckOrigin::Builtin,
            }
        } else {
            let loaded = load_deck(
                self.ports.words.as_ref(),
                self.ports.examples.as_ref(),
                &self.options.deck,
            )
            .await;
            if loaded.origin == DeckOrigin::Builtin {
                self.notify(SessionNotice::OfflineDeck);
            }
            loaded
        };

        self.deck = loaded.cards;
        self.origin = loaded.origin;
        self.learned = 0;
        self.phase = if self.deck.is_empty() {
            info!("Session {}: all caught up, nothing to learn", self.id);
            SessionPhase::Empty
        } else {
            info!("Session {} started with {} cards", self.id, self.deck.len());
            SessionPhase::Active { position: 0, flipped: false }
        };
    }

    /// Throws the current pass away and starts a brand-new session.
    pub async fn restart(&mut self) {
        // Writes from the previous pass stay in `pending` so `settle` still awaits them.
        self.id = Uuid::new_v4();
        self.deck.clear();
        self.learned = 0;
        self.start().await;
    }

    /// Turns the current card over. Returns the new flip state.
    pub fn flip(&mut self) -> Result<bool, SessionError> {
        match &mut self.phase {
            SessionPhase::Active { flipped, .. } => {
                *flipped = !*flipped;
                Ok(*flipped)
            }
            other => Err(SessionError::NotActive(*other)),
        }
    }

    /// Records the verdict for the current card and moves on.
    ///
    /// When `mark_learned` is set, the progress write is spawned on the
    /// current Tokio runtime and not awaited.
    pub fn advance(&mut self, mark_learned: bool) -> Result<Advance, SessionError> {
        let position = match self.phase {
            SessionPhase::Active { position, .. } => position,
            other => return Err(SessionError::NotActive(other)),
        };

        if mark_learned {
            self.learned += 1;
            if self.options.record_progress && !self.options.guest {
                self.record_learned(self.deck[position].id);
            }
        }

        if position + 1 >= self.deck.len() {
            self.phase = SessionPhase::Complete;
            let summary = self.completed_summary();
            info!(
                "Session {} complete: reviewed {}, learned {}",
                self.id, summary.reviewed, summary.learned
            );
            Ok(Advance::Completed(summary))
        } else {
            self.phase = SessionPhase::Active { position: position + 1, flipped: false };
            Ok(Advance::Next { position: position + 1 })
        }
    }

    /// Waits for every progress write started by this session.
    pub async fn settle(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                warn!("Progress write task did not finish: {}", e);
            }
        }
    }

    fn record_learned(&mut self, word_id: WordId) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            error!("No async runtime available; progress for word {} not recorded", word_id);
            return;
        };
        let progress = self.ports.progress.clone();
        let notices = self.notices.clone();
        self.pending.push(runtime.spawn(async move {
            let notice = match progress.record_word_learned(word_id).await {
                Ok(receipt) => {
                    info!(
                        "Recorded word {} as learned ({} learned in total)",
                        word_id, receipt.total_words_learned
                    );
                    SessionNotice::MarkedLearned { word_id }
                }
                Err(e) => {
                    error!("Failed to record word {} as learned: {}", word_id, e);
                    SessionNotice::ProgressWriteFailed { word_id, reason: e.to_string() }
                }
            };
            if let Some(tx) = notices {
                let _ = tx.send(notice);
            }
        }));
    }

    fn notify(&self, notice: SessionNotice) {
        if let Some(tx) = &self.notices {
            let _ = tx.send(notice);
        }
    }

    fn completed_summary(&self) -> SessionSummary {
        SessionSummary {
            reviewed: self.deck.len(),
            learned: self.learned,
        }
    }

    //-------------------------------------------------------------------------------------
    // Accessors
    //-------------------------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn origin(&self) -> DeckOrigin {
        self.origin
    }

    pub fn deck(&self) -> &[Word] {
        &self.deck
    }

    pub fn learned_count(&self) -> usize {
        self.learned
    }

    pub fn current_card(&self) -> Option<&Word> {
        match self.phase {
            SessionPhase::Active { position, .. } => self.deck.get(position),
            _ => None,
        }
    }

    pub fn is_flipped(&self) -> bool {
        matches!(self.phase, SessionPhase::Active { flipped: true, .. })
    }

    pub fn progress(&self) -> Option<SessionProgress> {
        match self.phase {
            SessionPhase::Active { position, .. } => Some(SessionProgress {
                card_number: position + 1,
                total: self.deck.len(),
                fraction: position as f64 / self.deck.len() as f64,
            }),
            _ => None,
        }
    }

    /// The summary of a finished pass, `None` until the session is complete.
    pub fn summary(&self) -> Option<SessionSummary> {
        (self.phase == SessionPhase::Complete).then(|| self.completed_summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{sample_word, FakeExamples, FakeProgress, FakeWords};
    use std::sync::atomic::Ordering;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn ports(words: Arc<FakeWords>, progress: Arc<FakeProgress>) -> SessionPorts {
        SessionPorts {
            words,
            examples: Arc::new(FakeExamples::default()),
            progress,
        }
    }

    fn deck_of(n: u32) -> Arc<FakeWords> {
        Arc::new(FakeWords::with_deck((1..=n).map(sample_word).collect()))
    }

    #[tokio::test]
    async fn n_advances_complete_a_deck_of_n() {
        for n in 1..=7 {
            let mut session = LearningSession::begin(
                ports(deck_of(n), Arc::new(FakeProgress::default())),
                SessionOptions::default(),
            )
            .await;
            assert_eq!(session.phase(), SessionPhase::Active { position: 0, flipped: false });

            for step in 1..n as usize {
                assert_eq!(session.advance(false).unwrap(), Advance::Next { position: step });
            }
            let last = session.advance(false).unwrap();
            assert!(matches!(last, Advance::Completed(_)));
            assert_eq!(session.phase(), SessionPhase::Complete);
        }
    }

    #[tokio::test]
    async fn double_flip_restores_flip_state() {
        let mut session = LearningSession::begin(
            ports(deck_of(3), Arc::new(FakeProgress::default())),
            SessionOptions::default(),
        )
        .await;

        assert!(session.flip().unwrap());
        assert!(!session.flip().unwrap());
        assert_eq!(session.phase(), SessionPhase::Active { position: 0, flipped: false });
    }

    #[tokio::test]
    async fn advancing_resets_flip() {
        let mut session = LearningSession::begin(
            ports(deck_of(3), Arc::new(FakeProgress::default())),
            SessionOptions::default(),
        )
        .await;

        session.flip().unwrap();
        assert!(session.is_flipped());
        session.advance(false).unwrap();
        assert!(!session.is_flipped());
        assert_eq!(session.current_card().map(|w| w.id), Some(2));
    }

    #[tokio::test]
    async fn mixed_verdicts_are_summarised() {
        let progress = Arc::new(FakeProgress::default());
        let mut session =
            LearningSession::begin(ports(deck_of(5), progress.clone()), SessionOptions::default())
                .await;

        for verdict in [true, false, true, false, true] {
            session.advance(verdict).unwrap();
        }
        session.settle().await;

        assert_eq!(session.summary(), Some(SessionSummary { reviewed: 5, learned: 3 }));
        assert_eq!(session.learned_count(), 3);
        let mut recorded = progress.recorded();
        recorded.sort_unstable();
        assert_eq!(recorded, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn empty_word_source_is_all_caught_up() {
        let words = Arc::new(FakeWords::with_deck(Vec::new()));
        let mut session =
            LearningSession::begin(ports(words, Arc::new(FakeProgress::default())), SessionOptions::default())
                .await;

        assert_eq!(session.phase(), SessionPhase::Empty);
        assert!(session.summary().is_none());
        assert!(matches!(
            session.advance(true),
            Err(SessionError::NotActive(SessionPhase::Empty))
        ));
    }

    #[tokio::test]
    async fn failing_word_source_falls_back_to_builtin_deck() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = LearningSession::new(
            ports(Arc::new(FakeWords::failing()), Arc::new(FakeProgress::default())),
            SessionOptions::default(),
        )
        .with_notices(tx);
        session.start().await;

        assert_eq!(session.origin(), DeckOrigin::Builtin);
        assert!(!session.deck().is_empty());
        assert_eq!(rx.recv().await, Some(SessionNotice::OfflineDeck));

        let len = session.deck().len();
        for _ in 0..len {
            session.advance(false).unwrap();
        }
        assert_eq!(session.summary(), Some(SessionSummary { reviewed: len, learned: 0 }));
    }

    #[tokio::test]
    async fn progress_failure_does_not_block_advancing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = LearningSession::new(
            ports(deck_of(2), Arc::new(FakeProgress::failing())),
            SessionOptions::default(),
        )
        .with_notices(tx);
        session.start().await;

        assert_eq!(session.advance(true).unwrap(), Advance::Next { position: 1 });
        session.settle().await;

        assert_eq!(session.learned_count(), 1);
        assert!(matches!(
            rx.recv().await,
            Some(SessionNotice::ProgressWriteFailed { word_id: 1, .. })
        ));
    }

    #[tokio::test]
    async fn guests_never_touch_remote_services() {
        let words = deck_of(5);
        let progress = Arc::new(FakeProgress::default());
        let options = SessionOptions { guest: true, ..SessionOptions::default() };
        let mut session = LearningSession::begin(ports(words.clone(), progress.clone()), options).await;

        assert_eq!(session.origin(), DeckOrigin::Builtin);
        for _ in 0..session.deck().len() {
            session.advance(true).unwrap();
        }
        session.settle().await;

        assert_eq!(words.calls.load(Ordering::SeqCst), 0);
        assert!(progress.recorded().is_empty());
        assert_eq!(session.learned_count(), session.deck().len());
    }

    #[tokio::test]
    async fn restart_creates_a_fresh_session() {
        let words = deck_of(2);
        let mut session = LearningSession::begin(
            ports(words.clone(), Arc::new(FakeProgress::default())),
            SessionOptions::default(),
        )
        .await;
        let first_id = session.id();
        session.advance(true).unwrap();
        session.advance(true).unwrap();
        assert_eq!(session.phase(), SessionPhase::Complete);

        session.restart().await;

        assert_ne!(session.id(), first_id);
        assert_eq!(session.phase(), SessionPhase::Active { position: 0, flipped: false });
        assert_eq!(session.learned_count(), 0);
        assert_eq!(words.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn settle_after_restart_waits_for_earlier_writes() {
        let progress = Arc::new(FakeProgress::slow(Duration::from_millis(200)));
        let mut session =
            LearningSession::begin(ports(deck_of(2), progress.clone()), SessionOptions::default())
                .await;
        session.advance(true).unwrap();
        session.advance(true).unwrap();

        session.restart().await;
        session.settle().await;

        let mut recorded = progress.recorded();
        recorded.sort_unstable();
        assert_eq!(recorded, vec![1, 2]);
    }

    #[tokio::test]
    async fn signed_out_sessions_keep_the_remote_deck_but_skip_writes() {
        let words = deck_of(3);
        let progress = Arc::new(FakeProgress::default());
        let options = SessionOptions { record_progress: false, ..SessionOptions::default() };
        let mut session = LearningSession::begin(ports(words.clone(), progress.clone()), options).await;

        assert_eq!(session.origin(), DeckOrigin::Remote);
        for _ in 0..3 {
            session.advance(true).unwrap();
        }
        session.settle().await;

        assert_eq!(words.calls.load(Ordering::SeqCst), 1);
        assert!(progress.recorded().is_empty());
        assert_eq!(session.summary(), Some(SessionSummary { reviewed: 3, learned: 3 }));
    }

    #[tokio::test]
    async fn progress_reports_card_number_and_fraction() {
        let mut session = LearningSession::begin(
            ports(deck_of(4), Arc::new(FakeProgress::default())),
            SessionOptions::default(),
        )
        .await;
        session.advance(false).unwrap();

        let progress = session.progress().unwrap();
        assert_eq!(progress.card_number, 2);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.fraction, 0.25);
    }

    #[test]
    fn flip_before_start_is_rejected() {
        let mut session = LearningSession::new(
            ports(deck_of(1), Arc::new(FakeProgress::default())),
            SessionOptions::default(),
        );
        assert!(matches!(
            session.flip(),
            Err(SessionError::NotActive(SessionPhase::Loading))
        ));
    }
}
