//! services/learner/src/term/word.rs
//!
//! Word detail and word search pages.

use crate::error::AppError;
use crate::term::{render, state::AppState};
use std::io::Write;
use tracing::warn;
use vocab_core::deck::fetch_examples_lenient;
use vocab_core::domain::WordId;
use vocab_core::ports::PortError;
use vocab_core::text::format_number;

/// Shows one word with its verse examples.
pub async fn show<W: Write>(state: &AppState, id: WordId, out: &mut W) -> Result<(), AppError> {
    let mut word = match state.words.get_word(id).await {
        Ok(word) => word,
        Err(PortError::NotFound(_)) => {
            writeln!(out, "Word #{} not found.", id)?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if !word.has_examples() {
        match fetch_examples_lenient(
            state.examples.as_ref(),
            &word.arabic,
            state.config.examples_per_word,
        )
        .await
        {
            Ok(found) => word.examples = Some(found),
            Err(e) => warn!("Could not load usage examples for {}: {}", word.arabic, e),
        }
    }

    writeln!(out, "{}", word.arabic)?;
    if let Some(english) = &word.english {
        writeln!(out, "  English: {}", english)?;
    }
    if let Some(bangla) = &word.bangla {
        writeln!(out, "  Bangla:  {}", bangla)?;
    }
    writeln!(
        out,
        "  Appears {} times in the Quran",
        format_number(word.frequency as u64)
    )?;
    render::card_back(out, &word)?;
    Ok(())
}

/// Lists words matching `query`.
pub async fn search<W: Write>(
    state: &AppState,
    query: &str,
    limit: usize,
    out: &mut W,
) -> Result<(), AppError> {
    let words = state.words.search_words(query, limit).await?;
    if words.is_empty() {
        writeln!(out, "No words match \"{}\".", query)?;
        return Ok(());
    }
    writeln!(out, "{} result(s) for \"{}\":", words.len(), query)?;
    for word in &words {
        render::word_line(out, word)?;
    }
    Ok(())
}

/// Lists one page of the whole vocabulary.
pub async fn browse<W: Write>(
    state: &AppState,
    page: u32,
    limit: u32,
    out: &mut W,
) -> Result<(), AppError> {
    let listing = state.words.list_words(page, limit).await?;
    for word in &listing.words {
        render::word_line(out, word)?;
    }
    writeln!(
        out,
        "Page {} of {}{}",
        listing.current_page,
        listing.total_pages,
        listing
            .total_words
            .map(|t| format!(" ({} words)", format_number(t as u64)))
            .unwrap_or_default()
    )?;
    Ok(())
}
