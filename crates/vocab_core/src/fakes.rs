//! In-memory port implementations for unit tests.

use crate::domain::{
    LearnedReceipt, ProgressTotals, UserStats, VerseExample, Word, WordId, WordPage, WordType,
};
use crate::ports::{ExampleSource, PortError, PortResult, ProgressSink, WordSource};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn sample_word(id: WordId) -> Word {
    Word {
        id,
        arabic: format!("word-{id}"),
        translation: format!("translation {id}"),
        english: None,
        bangla: None,
        transliteration: format!("w{id}"),
        frequency: 100 + id,
        word_type: WordType::Noun,
        examples: None,
    }
}

#[derive(Default)]
pub struct FakeWords {
    deck: Option<Vec<Word>>,
    pub calls: AtomicUsize,
}

impl FakeWords {
    pub fn with_deck(deck: Vec<Word>) -> Self {
        Self { deck: Some(deck), calls: AtomicUsize::new(0) }
    }

    pub fn failing() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WordSource for FakeWords {
    async fn fetch_words_to_learn(&self, limit: usize) -> PortResult<Vec<Word>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.deck {
            Some(deck) => Ok(deck.iter().take(limit).cloned().collect()),
            None => Err(PortError::Unavailable("connection refused".to_string())),
        }
    }

    async fn get_word(&self, id: WordId) -> PortResult<Word> {
        self.deck
            .iter()
            .flatten()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("word {id}")))
    }

    async fn search_words(&self, query: &str, limit: usize) -> PortResult<Vec<Word>> {
        Ok(self
            .deck
            .iter()
            .flatten()
            .filter(|w| w.translation.contains(query))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_words(&self, page: u32, limit: u32) -> PortResult<WordPage> {
        let words = self.deck.clone().unwrap_or_default();
        Ok(WordPage {
            total_words: Some(words.len() as u32),
            words,
            current_page: page,
            total_pages: 1,
            words_per_page: limit,
        })
    }
}

#[derive(Default)]
pub struct FakeExamples {
    failing: HashSet<String>,
    queries: Mutex<Vec<String>>,
}

impl FakeExamples {
    pub fn failing_for(mut self, arabic: &str) -> Self {
        self.failing.insert(arabic.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExampleSource for FakeExamples {
    async fn fetch_examples(&self, arabic: &str, _count: usize) -> PortResult<Vec<VerseExample>> {
        self.queries.lock().unwrap().push(arabic.to_string());
        if self.failing.contains(arabic) {
            return Err(PortError::Unexpected("search failed".to_string()));
        }
        Ok(vec![VerseExample {
            verse: format!("verse with {arabic}"),
            translation: "a translation".to_string(),
            reference: "1:1".to_string(),
        }])
    }
}

#[derive(Default)]
pub struct FakeProgress {
    pub fail: bool,
    /// Latency of each write.
    delay: Option<Duration>,
    recorded: Mutex<Vec<WordId>>,
}

impl FakeProgress {
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn slow(delay: Duration) -> Self {
        Self { delay: Some(delay), ..Default::default() }
    }

    pub fn recorded(&self) -> Vec<WordId> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressSink for FakeProgress {
    async fn record_word_learned(&self, id: WordId) -> PortResult<LearnedReceipt> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(PortError::Unexpected("write rejected".to_string()));
        }
        let mut recorded = self.recorded.lock().unwrap();
        recorded.push(id);
        Ok(LearnedReceipt {
            word_id: id,
            word: format!("word-{id}"),
            translation: String::new(),
            frequency: 0,
            total_words_learned: recorded.len() as u32,
            total_frequency_known: 0,
        })
    }

    async fn unlearn_word(&self, id: WordId) -> PortResult<ProgressTotals> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.retain(|w| *w != id);
        Ok(ProgressTotals {
            affected: 1,
            total_words_learned: recorded.len() as u32,
            total_frequency_known: 0,
        })
    }

    async fn record_batch_learned(&self, ids: &[WordId]) -> PortResult<ProgressTotals> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.extend_from_slice(ids);
        Ok(ProgressTotals {
            affected: ids.len() as u32,
            total_words_learned: recorded.len() as u32,
            total_frequency_known: 0,
        })
    }

    async fn user_stats(&self) -> PortResult<UserStats> {
        Ok(UserStats {
            total_words_learned: self.recorded().len() as u32,
            ..UserStats::default()
        })
    }

    async fn learned_words(&self, page: u32, limit: u32) -> PortResult<WordPage> {
        Ok(WordPage {
            words: Vec::new(),
            current_page: page,
            total_pages: 0,
            total_words: Some(0),
            words_per_page: limit,
        })
    }
}
