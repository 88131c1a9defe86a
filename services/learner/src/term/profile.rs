//! services/learner/src/term/profile.rs
//!
//! The profile page.

use crate::error::AppError;
use crate::term::state::AppState;
use std::io::Write;
use tracing::warn;

pub async fn show<W: Write>(state: &AppState, out: &mut W) -> Result<(), AppError> {
    let Some(user) = state.auth.current_user() else {
        writeln!(out, "You are not signed in.")?;
        return Ok(());
    };

    writeln!(out, "{}", user.display_name.as_deref().unwrap_or("Learner"))?;
    if let Some(email) = &user.email {
        writeln!(out, "  {}", email)?;
    }
    writeln!(out, "  uid: {}", user.uid)?;
    if user.is_guest() {
        writeln!(out, "  Guest mode: progress is not saved.")?;
        return Ok(());
    }

    match state.progress.user_stats().await {
        Ok(stats) => {
            if let Some(since) = stats.member_since {
                writeln!(out, "  Member since {}", since.format("%B %-d, %Y"))?;
            }
            if let Some(active) = stats.last_active {
                writeln!(out, "  Last active {}", active.format("%B %-d, %Y"))?;
            }
            writeln!(out, "  {} words learned", stats.total_words_learned)?;
        }
        Err(e) => warn!("Could not load profile stats: {}", e),
    }
    Ok(())
}
