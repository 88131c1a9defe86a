//! services/learner/src/term/progress.rs
//!
//! Dashboard, progress and unlearn pages.

use crate::error::AppError;
use crate::term::{render, state::AppState};
use std::io::Write;
use tracing::info;
use vocab_core::domain::{UserStats, WordId};
use vocab_core::ports::PortError;
use vocab_core::text::format_number;

/// Stats for the current user. A user without any progress yet gets empty stats.
async fn load_stats(state: &AppState) -> Result<UserStats, AppError> {
    match state.progress.user_stats().await {
        Ok(stats) => Ok(stats),
        Err(PortError::NotFound(_)) => {
            info!("No stats recorded yet; showing defaults");
            Ok(UserStats::default())
        }
        Err(e) => Err(e.into()),
    }
}

fn require_member<W: Write>(state: &AppState, out: &mut W) -> Result<bool, AppError> {
    match state.auth.current_user() {
        Some(user) if !user.is_guest() => Ok(true),
        Some(_) => {
            writeln!(out, "Guests have no saved progress. Sign in to track your learning.")?;
            Ok(false)
        }
        None => {
            writeln!(out, "You are not signed in.")?;
            Ok(false)
        }
    }
}

/// The home page: a greeting and the headline numbers.
pub async fn dashboard<W: Write>(state: &AppState, out: &mut W) -> Result<(), AppError> {
    let name = state
        .auth
        .current_user()
        .and_then(|u| u.display_name.or(u.email))
        .unwrap_or_else(|| "Learner".to_string());
    writeln!(out, "Assalamu alaikum, {}!", name)?;
    if !require_member(state, out)? {
        return Ok(());
    }

    let stats = load_stats(state).await?;
    render::stats(out, &stats)?;
    if let Some(latest) = stats.recently_learned.first() {
        writeln!(out, "Last learned: {} ({})", latest.arabic, latest.translation)?;
    }
    writeln!(out, "Run `learner learn` to continue.")?;
    Ok(())
}

/// Full progress: stats plus a page of learned words.
pub async fn progress<W: Write>(
    state: &AppState,
    page: u32,
    limit: u32,
    out: &mut W,
) -> Result<(), AppError> {
    if !require_member(state, out)? {
        return Ok(());
    }

    let stats = load_stats(state).await?;
    render::stats(out, &stats)?;
    writeln!(
        out,
        "You understand {}% of the Quran's vocabulary!",
        stats.coverage_percentage
    )?;

    let learned = match state.progress.learned_words(page, limit).await {
        Ok(learned) => learned,
        Err(PortError::NotFound(_)) => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    writeln!(out)?;
    writeln!(out, "Learned words (page {} of {}):", learned.current_page, learned.total_pages)?;
    for word in &learned.words {
        render::word_line(out, word)?;
    }
    Ok(())
}

/// Removes a word from the learned list.
pub async fn unlearn<W: Write>(state: &AppState, id: WordId, out: &mut W) -> Result<(), AppError> {
    if !require_member(state, out)? {
        return Ok(());
    }
    let totals = state.progress.unlearn_word(id).await?;
    writeln!(
        out,
        "Word #{} moved back to learning. {} words learned.",
        id,
        format_number(totals.total_words_learned as u64)
    )?;
    Ok(())
}

/// Marks several words as learned at once.
pub async fn mark_learned<W: Write>(
    state: &AppState,
    ids: &[WordId],
    out: &mut W,
) -> Result<(), AppError> {
    if !require_member(state, out)? {
        return Ok(());
    }
    let totals = state.progress.record_batch_learned(ids).await?;
    writeln!(
        out,
        "Added {} word(s). {} words learned.",
        totals.affected,
        format_number(totals.total_words_learned as u64)
    )?;
    Ok(())
}
