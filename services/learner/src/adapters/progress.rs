//! services/learner/src/adapters/progress.rs
//!
//! This module contains the adapter for the progress endpoints.
//! It implements the `ProgressSink` port from the `core` crate.
//! Every call here is protected and needs a signed-in user.

use super::http::ApiClient;
use super::records::{MarkLearnedRecord, ProgressTotalsRecord, UserStatsRecord, WordsListRecord};
use async_trait::async_trait;
use serde::Serialize;
use vocab_core::{
    domain::{LearnedReceipt, ProgressTotals, UserStats, WordId, WordPage},
    ports::{PortResult, ProgressSink},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkLearnedRequest {
    word_id: WordId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchLearnedRequest<'a> {
    word_ids: &'a [WordId],
}

/// An adapter that implements `ProgressSink` over the REST API.
#[derive(Clone)]
pub struct HttpProgressSink {
    api: ApiClient,
}

impl HttpProgressSink {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProgressSink for HttpProgressSink {
    async fn record_word_learned(&self, id: WordId) -> PortResult<LearnedReceipt> {
        let record: MarkLearnedRecord = self
            .api
            .post("/progress", &MarkLearnedRequest { word_id: id })
            .await?;
        Ok(record.to_domain())
    }

    async fn unlearn_word(&self, id: WordId) -> PortResult<ProgressTotals> {
        let record: ProgressTotalsRecord = self.api.delete(&format!("/progress/{}", id)).await?;
        Ok(record.to_domain())
    }

    async fn record_batch_learned(&self, ids: &[WordId]) -> PortResult<ProgressTotals> {
        let record: ProgressTotalsRecord = self
            .api
            .post("/progress/batch", &BatchLearnedRequest { word_ids: ids })
            .await?;
        Ok(record.to_domain())
    }

    async fn user_stats(&self) -> PortResult<UserStats> {
        let record: UserStatsRecord = self.api.get("/progress/stats", &[]).await?;
        Ok(record.to_domain())
    }

    async fn learned_words(&self, page: u32, limit: u32) -> PortResult<WordPage> {
        let record: WordsListRecord = self
            .api
            .get(
                "/progress/learned",
                &[("page", page.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        Ok(record.to_domain())
    }
}
