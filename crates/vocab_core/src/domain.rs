//! crates/vocab_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, Utc};

/// Numeric identifier the backend assigns to every vocabulary word.
pub type WordId = u32;

/// Grammatical category of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordType {
    Noun,
    Verb,
    Particle,
    Adjective,
    Pronoun,
    Preposition,
    Other,
}

impl WordType {
    /// Parses the backend's label. Unknown labels fall into `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "noun" => WordType::Noun,
            "verb" => WordType::Verb,
            "particle" => WordType::Particle,
            "adjective" => WordType::Adjective,
            "pronoun" => WordType::Pronoun,
            "preposition" => WordType::Preposition,
            _ => WordType::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WordType::Noun => "Noun",
            WordType::Verb => "Verb",
            WordType::Particle => "Particle",
            WordType::Adjective => "Adjective",
            WordType::Pronoun => "Pronoun",
            WordType::Preposition => "Preposition",
            WordType::Other => "Other",
        }
    }
}

/// A single usage of a word inside a verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseExample {
    pub verse: String,
    /// May be empty when the search returned no usable translation.
    pub translation: String,
    /// `"chapter:verse"`, e.g. `"2:156"`.
    pub reference: String,
}

/// A vocabulary item shown on a flashcard.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub id: WordId,
    pub arabic: String,
    pub translation: String,
    pub english: Option<String>,
    pub bangla: Option<String>,
    pub transliteration: String,
    pub frequency: u32,
    pub word_type: WordType,
    /// `None` means examples were never attached; enrichment fills these in.
    pub examples: Option<Vec<VerseExample>>,
}

impl Word {
    pub fn has_examples(&self) -> bool {
        self.examples.is_some()
    }
}

/// A page of words returned by list endpoints.
#[derive(Debug, Clone)]
pub struct WordPage {
    pub words: Vec<Word>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_words: Option<u32>,
    pub words_per_page: u32,
}

// Represents a signed-in learner - used throughout app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub provider_id: String,
    pub is_anonymous: bool,
}

impl User {
    pub const DEV_MODE_PROVIDER: &'static str = "dev-mode";

    /// The local development user that bypasses the identity provider.
    pub fn guest() -> Self {
        Self {
            uid: "guest-123".to_string(),
            email: Some("guest@example.com".to_string()),
            display_name: Some("Guest User".to_string()),
            provider_id: Self::DEV_MODE_PROVIDER.to_string(),
            is_anonymous: false,
        }
    }

    /// Guests learn from the built-in deck and never write progress remotely.
    pub fn is_guest(&self) -> bool {
        self.is_anonymous || self.provider_id == Self::DEV_MODE_PROVIDER
    }
}

/// A short summary of a recently learned word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSummary {
    pub id: WordId,
    pub arabic: String,
    pub translation: String,
    pub transliteration: String,
    pub frequency: u32,
}

/// Aggregated learning statistics for the current user.
#[derive(Debug, Clone)]
pub struct UserStats {
    pub total_words_learned: u32,
    pub total_frequency_known: u64,
    pub member_since: Option<DateTime<Utc>>,
    pub last_active: Option<DateTime<Utc>>,
    pub total_available_words: u32,
    pub coverage_percentage: f64,
    pub progress_percentage: f64,
    pub recently_learned: Vec<WordSummary>,
}

impl Default for UserStats {
    // A new user without any recorded progress.
    fn default() -> Self {
        Self {
            total_words_learned: 0,
            total_frequency_known: 0,
            member_since: None,
            last_active: None,
            total_available_words: 0,
            coverage_percentage: 0.0,
            progress_percentage: 0.0,
            recently_learned: Vec::new(),
        }
    }
}

/// Acknowledgement returned after recording a learned word.
#[derive(Debug, Clone)]
pub struct LearnedReceipt {
    pub word_id: WordId,
    pub word: String,
    pub translation: String,
    pub frequency: u32,
    pub total_words_learned: u32,
    pub total_frequency_known: u64,
}

/// Totals after a word was removed from, or a batch added to, the learned list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTotals {
    pub affected: u32,
    pub total_words_learned: u32,
    pub total_frequency_known: u64,
}

/// A short wisdom story shown on the wisdom page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub id: String,
    pub title: String,
    /// Resolved from whichever text field the backend populated.
    pub body: String,
    pub source: Option<String>,
    pub tags: Vec<String>,
}

impl Story {
    pub fn share_text(&self) -> String {
        format!(
            "{}\n\n\"{}\"\n\n— {}",
            self.title,
            self.body,
            self.source.as_deref().unwrap_or("Daily Wisdom")
        )
    }
}
