//! services/learner/src/term/wisdom.rs
//!
//! The daily wisdom page.

use crate::error::AppError;
use crate::term::{render, state::AppState};
use std::io::Write;
use vocab_core::text::truncate;

/// Shows a story: the one with `id`, or a random one.
pub async fn show<W: Write>(
    state: &AppState,
    id: Option<&str>,
    share: bool,
    out: &mut W,
) -> Result<(), AppError> {
    let story = match id {
        Some(id) => state.stories.get_story(id).await?,
        None => state.stories.random_story().await?,
    };
    if share {
        writeln!(out, "{}", story.share_text())?;
    } else {
        render::story(out, &story)?;
    }
    Ok(())
}

/// Lists every story with a short preview.
pub async fn list<W: Write>(state: &AppState, out: &mut W) -> Result<(), AppError> {
    let stories = state.stories.list_stories().await?;
    if stories.is_empty() {
        writeln!(out, "No stories yet.")?;
    }
    for story in &stories {
        writeln!(out, "{:<26} {} — {}", story.id, story.title, truncate(&story.body, 60))?;
    }
    Ok(())
}
