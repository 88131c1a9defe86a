//! services/learner/src/adapters/quran.rs
//!
//! This module contains the adapter for the verse search proxy.
//! It implements the `ExampleSource` port from the `core` crate.
//!
//! The proxy has returned several response shapes over time, so the body is
//! read as raw JSON and the result list is looked up in each known location.

use super::http::ApiClient;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use vocab_core::{
    domain::VerseExample,
    ports::{ExampleSource, PortError, PortResult},
    text::{clean_translation, join_word_translations},
};

/// Locations of the result list, tried in order.
const RESULT_POINTERS: [&str; 4] = [
    "/results",
    "/search/results",
    "/data/results",
    "/data/search/results",
];

/// An adapter that implements `ExampleSource` over the REST API.
#[derive(Clone)]
pub struct HttpExampleSource {
    api: ApiClient,
    /// Comma-separated translation resource ids, e.g. `"161"`.
    translations: String,
}

impl HttpExampleSource {
    pub fn new(api: ApiClient, translations: String) -> Self {
        Self { api, translations }
    }
}

#[async_trait]
impl ExampleSource for HttpExampleSource {
    async fn fetch_examples(&self, arabic: &str, count: usize) -> PortResult<Vec<VerseExample>> {
        let body = self
            .api
            .get_raw(
                "/quran/examples",
                &[
                    ("word", arabic.to_string()),
                    ("size", count.to_string()),
                    ("translations", self.translations.clone()),
                ],
            )
            .await?;

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("verse search failed");
            return Err(PortError::Unexpected(message.to_string()));
        }

        let examples = parse_examples(&body);
        debug!("Found {} verse examples for {}", examples.len(), arabic);
        Ok(examples)
    }
}

/// Extracts verse examples from any known response shape.
///
/// An unrecognised body yields no examples.
pub fn parse_examples(body: &Value) -> Vec<VerseExample> {
    RESULT_POINTERS
        .iter()
        .find_map(|pointer| body.pointer(pointer).and_then(Value::as_array))
        .map(|results| results.iter().map(to_example).collect())
        .unwrap_or_default()
}

fn to_example(result: &Value) -> VerseExample {
    let verse = result
        .get("text_uthmani")
        .and_then(Value::as_str)
        .or_else(|| result.get("text").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    let first_translation = result
        .get("translations")
        .and_then(Value::as_array)
        .and_then(|t| t.first())
        .and_then(|t| t.get("text"))
        .and_then(Value::as_str);

    let translation = match first_translation {
        Some(text) => clean_translation(text),
        None => {
            // Fall back to the word-by-word glosses.
            let glosses = result
                .get("words")
                .and_then(Value::as_array)
                .map(|words| {
                    words
                        .iter()
                        .filter_map(|w| w.pointer("/translation/text").and_then(Value::as_str))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            join_word_translations(glosses)
        }
    };

    let reference = result
        .get("verse_key")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    VerseExample {
        verse,
        translation,
        reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result() -> Value {
        json!({
            "verse_key": "2:156",
            "text_uthmani": "إِنَّا لِلَّهِ وَإِنَّا إِلَيْهِ رَٰجِعُونَ",
            "translations": [{"id": 1, "text": "Indeed we belong to Allah<sup foot_note=1>1</sup>", "resource_id": 161}]
        })
    }

    #[test]
    fn every_known_shape_yields_the_same_examples() {
        let shapes = [
            json!({ "results": [result()] }),
            json!({ "search": { "results": [result()] } }),
            json!({ "success": true, "data": { "results": [result()] } }),
            json!({ "success": true, "data": { "search": { "results": [result()] } } }),
        ];
        for shape in shapes {
            let examples = parse_examples(&shape);
            assert_eq!(examples.len(), 1, "shape {shape}");
            assert_eq!(examples[0].reference, "2:156");
            assert_eq!(examples[0].translation, "Indeed we belong to Allah");
        }
    }

    #[test]
    fn falls_back_to_plain_text_and_word_glosses() {
        let body = json!({ "results": [{
            "verse_key": "1:1",
            "text": "بسم الله",
            "translations": [],
            "words": [
                {"translation": {"text": "(In) the name"}},
                {"translation": null},
                {"translation": {"text": "[of] Allah"}}
            ]
        }]});
        let examples = parse_examples(&body);
        assert_eq!(examples[0].verse, "بسم الله");
        assert_eq!(examples[0].translation, "In the name of Allah");
    }

    #[test]
    fn unknown_shape_has_no_examples() {
        assert!(parse_examples(&json!({ "verses": [] })).is_empty());
        assert!(parse_examples(&json!({ "data": { "results": "nope" } })).is_empty());
    }
}
