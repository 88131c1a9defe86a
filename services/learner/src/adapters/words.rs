//! services/learner/src/adapters/words.rs
//!
//! This module contains the adapter for the word endpoints.
//! It implements the `WordSource` port from the `core` crate.

use super::http::ApiClient;
use super::records::{WordRecord, WordSearchRecord, WordsListRecord, WordsToLearnRecord};
use async_trait::async_trait;
use vocab_core::{
    domain::{Word, WordId, WordPage},
    ports::{PortResult, WordSource},
};

/// An adapter that implements `WordSource` over the REST API.
#[derive(Clone)]
pub struct HttpWordSource {
    api: ApiClient,
}

impl HttpWordSource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl WordSource for HttpWordSource {
    /// `GET /words/learn` — protected; only words the user has not learned.
    async fn fetch_words_to_learn(&self, limit: usize) -> PortResult<Vec<Word>> {
        let record: WordsToLearnRecord = self
            .api
            .get("/words/learn", &[("limit", limit.to_string())])
            .await?;
        Ok(record.to_domain())
    }

    async fn get_word(&self, id: WordId) -> PortResult<Word> {
        let record: WordRecord = self.api.get(&format!("/words/{}", id), &[]).await?;
        Ok(record.to_domain())
    }

    async fn search_words(&self, query: &str, limit: usize) -> PortResult<Vec<Word>> {
        let path = format!("/words/search/{}", encode_segment(query));
        let record: WordSearchRecord = self.api.get(&path, &[("limit", limit.to_string())]).await?;
        Ok(record.to_domain())
    }

    async fn list_words(&self, page: u32, limit: u32) -> PortResult<WordPage> {
        let record: WordsListRecord = self
            .api
            .get("/words", &[("page", page.to_string()), ("limit", limit.to_string())])
            .await?;
        Ok(record.to_domain())
    }
}

/// Percent-encodes a single path segment.
fn encode_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_arabic_and_spaces() {
        assert_eq!(encode_segment("in the"), "in%20the");
        assert_eq!(encode_segment("فِي"), "%D9%81%D9%90%D9%8A");
        assert_eq!(encode_segment("mercy"), "mercy");
    }
}
