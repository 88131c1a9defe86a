//! services/learner/src/adapters/stories.rs
//!
//! This module contains the adapter for the wisdom story endpoints.
//! It implements the `StorySource` port from the `core` crate.
//!
//! Stories have carried their text under different field names; the order
//! in which those fields are tried comes from configuration.

use super::http::ApiClient;
use async_trait::async_trait;
use serde_json::{Map, Value};
use vocab_core::{
    domain::Story,
    ports::{PortError, PortResult, StorySource},
};

/// An adapter that implements `StorySource` over the REST API.
#[derive(Clone)]
pub struct HttpStorySource {
    api: ApiClient,
    text_fields: Vec<String>,
}

impl HttpStorySource {
    pub fn new(api: ApiClient, text_fields: Vec<String>) -> Self {
        Self { api, text_fields }
    }

    fn to_story(&self, record: Value) -> PortResult<Story> {
        match record {
            Value::Object(map) => Ok(story_from_record(&map, &self.text_fields)),
            other => Err(PortError::Unexpected(format!(
                "Expected a story object, got {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl StorySource for HttpStorySource {
    async fn list_stories(&self) -> PortResult<Vec<Story>> {
        let records: Vec<Value> = self.api.get("/stories", &[]).await?;
        records.into_iter().map(|r| self.to_story(r)).collect()
    }

    async fn get_story(&self, id: &str) -> PortResult<Story> {
        let path = format!("/stories/{}", urlencoding::encode(id));
        let record: Value = self.api.get(&path, &[]).await?;
        self.to_story(record)
    }

    async fn random_story(&self) -> PortResult<Story> {
        let record: Value = self.api.get("/stories/random", &[]).await?;
        self.to_story(record)
    }
}

/// Returns the first non-empty text among `fields`, or an empty string.
pub fn resolve_story_text(record: &Map<String, Value>, fields: &[String]) -> String {
    fields
        .iter()
        .filter_map(|f| record.get(f).and_then(Value::as_str))
        .find(|text| !text.trim().is_empty())
        .unwrap_or_default()
        .to_string()
}

fn story_from_record(record: &Map<String, Value>, fields: &[String]) -> Story {
    let id = match (record.get("_id"), record.get("id")) {
        (Some(Value::String(id)), _) => id.clone(),
        (_, Some(Value::Number(n))) => n.to_string(),
        (_, Some(Value::String(id))) => id.clone(),
        _ => String::new(),
    };
    let str_field = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);

    Story {
        id,
        title: str_field("title").unwrap_or_default(),
        body: resolve_story_text(record, fields),
        source: str_field("source"),
        tags: record
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default(),
    }
}
