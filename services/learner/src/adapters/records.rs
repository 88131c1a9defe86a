//! services/learner/src/adapters/records.rs
//!
//! "Impure" wire records for the REST API and their conversion into the
//! core domain types. Only the fields the client uses are declared; serde
//! ignores the rest (`_id`, `createdAt`, ...).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use vocab_core::domain::{
    LearnedReceipt, ProgressTotals, UserStats, VerseExample, Word, WordPage, WordSummary, WordType,
};

#[derive(Debug, Deserialize)]
pub struct VerseExampleRecord {
    pub verse: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub reference: String,
}
impl VerseExampleRecord {
    pub fn to_domain(self) -> VerseExample {
        VerseExample {
            verse: self.verse,
            translation: self.translation,
            reference: self.reference,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WordRecord {
    pub id: u32,
    pub arabic: String,
    pub translation: String,
    pub english: Option<String>,
    pub bangla: Option<String>,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub frequency: u32,
    #[serde(rename = "type")]
    pub word_type: Option<String>,
    pub examples: Option<Vec<VerseExampleRecord>>,
}
impl WordRecord {
    pub fn to_domain(self) -> Word {
        Word {
            id: self.id,
            arabic: self.arabic,
            translation: self.translation,
            english: self.english,
            bangla: self.bangla,
            transliteration: self.transliteration,
            frequency: self.frequency,
            word_type: self
                .word_type
                .as_deref()
                .map(WordType::from_label)
                .unwrap_or(WordType::Other),
            examples: self
                .examples
                .map(|examples| examples.into_iter().map(VerseExampleRecord::to_domain).collect()),
        }
    }
}

fn words_to_domain(records: Vec<WordRecord>) -> Vec<Word> {
    records.into_iter().map(WordRecord::to_domain).collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRecord {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub total_words: Option<u32>,
    pub total_learned: Option<u32>,
    #[serde(default)]
    pub words_per_page: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct WordsListRecord {
    pub words: Vec<WordRecord>,
    pub pagination: PaginationRecord,
}
impl WordsListRecord {
    pub fn to_domain(self) -> WordPage {
        let pagination = self.pagination;
        WordPage {
            words: words_to_domain(self.words),
            current_page: pagination.current_page,
            total_pages: pagination.total_pages,
            total_words: pagination.total_words.or(pagination.total_learned),
            words_per_page: pagination.words_per_page,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordsToLearnRecord {
    #[serde(default)]
    pub words: Vec<WordRecord>,
}
impl WordsToLearnRecord {
    pub fn to_domain(self) -> Vec<Word> {
        words_to_domain(self.words)
    }
}

#[derive(Debug, Deserialize)]
pub struct WordSearchRecord {
    #[serde(default)]
    pub words: Vec<WordRecord>,
}
impl WordSearchRecord {
    pub fn to_domain(self) -> Vec<Word> {
        words_to_domain(self.words)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkLearnedRecord {
    pub word_id: u32,
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub total_words_learned: u32,
    #[serde(default)]
    pub total_frequency_known: u64,
}
impl MarkLearnedRecord {
    pub fn to_domain(self) -> LearnedReceipt {
        LearnedReceipt {
            word_id: self.word_id,
            word: self.word,
            translation: self.translation,
            frequency: self.frequency,
            total_words_learned: self.total_words_learned,
            total_frequency_known: self.total_frequency_known,
        }
    }
}

/// Response of both the unlearn and the batch endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressTotalsRecord {
    pub word_id: Option<u32>,
    pub added_count: Option<u32>,
    #[serde(default)]
    pub total_words_learned: u32,
    #[serde(default)]
    pub total_frequency_known: u64,
}
impl ProgressTotalsRecord {
    pub fn to_domain(self) -> ProgressTotals {
        let affected = match (self.added_count, self.word_id) {
            (Some(added), _) => added,
            (None, Some(_)) => 1,
            (None, None) => 0,
        };
        ProgressTotals {
            affected,
            total_words_learned: self.total_words_learned,
            total_frequency_known: self.total_frequency_known,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WordSummaryRecord {
    pub id: u32,
    pub arabic: String,
    pub translation: String,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub frequency: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsRecord {
    #[serde(default)]
    pub total_words_learned: u32,
    #[serde(default)]
    pub total_frequency_known: u64,
    pub member_since: Option<String>,
    pub last_active: Option<String>,
    #[serde(default)]
    pub total_available_words: u32,
    #[serde(default)]
    pub quran_coverage_percentage: f64,
    #[serde(default)]
    pub progress_percentage: f64,
    #[serde(default)]
    pub recently_learned: Vec<WordSummaryRecord>,
}
impl UserStatsRecord {
    pub fn to_domain(self) -> UserStats {
        UserStats {
            total_words_learned: self.total_words_learned,
            total_frequency_known: self.total_frequency_known,
            member_since: self.member_since.as_deref().and_then(parse_timestamp),
            last_active: self.last_active.as_deref().and_then(parse_timestamp),
            total_available_words: self.total_available_words,
            coverage_percentage: self.quran_coverage_percentage,
            progress_percentage: self.progress_percentage,
            recently_learned: self
                .recently_learned
                .into_iter()
                .map(|w| WordSummary {
                    id: w.id,
                    arabic: w.arabic,
                    translation: w.translation,
                    transliteration: w.transliteration,
                    frequency: w.frequency,
                })
                .collect(),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
