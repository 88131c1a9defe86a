//! services/learner/src/term/learn.rs
//!
//! The interactive learning page. Reads one command per line:
//! `f` flip, `k` I know this, `s` still learning, `r` restart, `q` quit.

use crate::error::AppError;
use crate::term::{render, state::AppState};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::info;
use vocab_core::session::{
    Advance, LearningSession, SessionNotice, SessionPhase, SessionSummary,
};

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Flip,
    Know,
    StillLearning,
    Restart,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "f" | "flip" | "" => Command::Flip,
        "k" | "know" | "y" => Command::Know,
        "s" | "still" | "n" => Command::StillLearning,
        "r" | "restart" => Command::Restart,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Unknown,
    }
}

async fn next_command<R: AsyncBufRead + Unpin>(input: &mut R) -> Result<Command, AppError> {
    let mut line = String::new();
    let read = input.read_line(&mut line).await?;
    if read == 0 {
        return Ok(Command::Quit);
    }
    Ok(parse_command(&line))
}

fn print_notices<W: Write>(
    out: &mut W,
    notices: &mut mpsc::UnboundedReceiver<SessionNotice>,
) -> Result<(), AppError> {
    while let Ok(notice) = notices.try_recv() {
        match notice {
            SessionNotice::OfflineDeck => writeln!(out, "! Network error. Using offline mode.")?,
            SessionNotice::MarkedLearned { .. } => writeln!(out, "✓ Marked as learned!")?,
            SessionNotice::ProgressWriteFailed { word_id, .. } => {
                writeln!(out, "! Could not save progress for word #{}", word_id)?
            }
        }
    }
    Ok(())
}

/// Runs learning sessions until the user quits.
///
/// Returns the summary of the last completed pass, if any.
pub async fn run<R, W>(
    state: &AppState,
    mut input: R,
    out: &mut W,
) -> Result<Option<SessionSummary>, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (tx, mut notices) = mpsc::unbounded_channel();
    let mut session = LearningSession::new(state.session_ports(), state.session_options())
        .with_notices(tx);
    writeln!(out, "Preparing your session...")?;
    session.start().await;

    let mut last_summary = None;
    loop {
        print_notices(out, &mut notices)?;

        match session.phase() {
            SessionPhase::Loading => session.start().await,
            SessionPhase::Empty => {
                render::all_caught_up(out)?;
                break;
            }
            SessionPhase::Complete => {
                if let Some(summary) = session.summary() {
                    render::summary(out, &summary)?;
                    last_summary = Some(summary);
                }
                writeln!(out, "[r] Start Another Session  [q] Go Home")?;
                match next_command(&mut input).await? {
                    Command::Restart => {
                        info!("Restarting learning session");
                        session.restart().await;
                    }
                    Command::Quit => break,
                    _ => writeln!(out, "Type r or q.")?,
                }
            }
            SessionPhase::Active { flipped, .. } => {
                if let Some(word) = session.current_card() {
                    render::card(out, word, flipped, session.progress())?;
                }
                writeln!(out, "[f] flip  [k] I Know This  [s] Still Learning  [q] quit")?;
                match next_command(&mut input).await? {
                    Command::Flip => {
                        session.flip()?;
                    }
                    Command::Know => {
                        if let Advance::Completed(summary) = session.advance(true)? {
                            last_summary = Some(summary);
                        }
                    }
                    Command::StillLearning => {
                        if let Advance::Completed(summary) = session.advance(false)? {
                            last_summary = Some(summary);
                        }
                    }
                    Command::Quit => break,
                    Command::Restart | Command::Unknown => {
                        writeln!(out, "Type f, k, s or q.")?
                    }
                }
            }
        }
    }

    session.settle().await;
    print_notices(out, &mut notices)?;
    out.flush()?;
    Ok(last_summary)
}
