//! crates/vocab_core/src/deck.rs
//!
//! Loads the deck for one learning session: the primary word request,
//! per-card example enrichment, and the offline fallback.

use crate::domain::{VerseExample, Word};
use crate::fallback::builtin_deck;
use crate::ports::{ExampleSource, PortResult, WordSource};
use crate::text::strip_diacritics;
use futures::future::join_all;
use tracing::{info, warn};

/// Where the cards of a deck came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckOrigin {
    /// Served by the word service.
    Remote,
    /// Built-in cards, used offline or for guests.
    Builtin,
}

/// Tunables for a deck request.
#[derive(Debug, Clone)]
pub struct DeckOptions {
    pub batch_size: usize,
    pub examples_per_word: usize,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            examples_per_word: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedDeck {
    pub cards: Vec<Word>,
    pub origin: DeckOrigin,
}

/// Fetches verse examples for `arabic`, retrying once without diacritics.
///
/// The retry only happens when stripping actually changes the text. If the
/// retry fails too, the error of the first attempt is returned.
pub async fn fetch_examples_lenient(
    examples: &dyn ExampleSource,
    arabic: &str,
    count: usize,
) -> PortResult<Vec<VerseExample>> {
    match examples.fetch_examples(arabic, count).await {
        Ok(found) => Ok(found),
        Err(first_error) => {
            let simple = strip_diacritics(arabic);
            if simple == arabic {
                return Err(first_error);
            }
            examples
                .fetch_examples(&simple, count)
                .await
                .map_err(|_| first_error)
        }
    }
}

/// Attaches examples to a card that has none. Failures leave the card as it was.
async fn enrich(examples: &dyn ExampleSource, mut word: Word, count: usize) -> Word {
    if word.has_examples() {
        return word;
    }
    match fetch_examples_lenient(examples, &word.arabic, count).await {
        Ok(found) => word.examples = Some(found),
        Err(e) => warn!("Failed to fetch examples for {} ({}): {}", word.arabic, word.id, e),
    }
    word
}

/// Loads and enriches the deck for a new session.
///
/// A failed word request falls back to the built-in deck, so the caller
/// always gets something to review. An empty remote deck is returned as is.
pub async fn load_deck(
    words: &dyn WordSource,
    examples: &dyn ExampleSource,
    options: &DeckOptions,
) -> LoadedDeck {
    let fetched = match words.fetch_words_to_learn(options.batch_size).await {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!("Failed to load words to learn, using the built-in deck: {}", e);
            return LoadedDeck {
                cards: builtin_deck(),
                origin: DeckOrigin::Builtin,
            };
        }
    };

    let needing = fetched.iter().filter(|w| !w.has_examples()).count();
    if needing > 0 {
        info!("Enriching {} of {} cards with verse examples", needing, fetched.len());
    }

    // One request per card, all in flight together; join_all keeps deck order.
    let cards = join_all(
        fetched
            .into_iter()
            .map(|word| enrich(examples, word, options.examples_per_word)),
    )
    .await;

    LoadedDeck {
        cards,
        origin: DeckOrigin::Remote,
    }
}
