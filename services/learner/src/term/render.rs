//! services/learner/src/term/render.rs
//!
//! Plain-text rendering of cards, examples, stats and stories.

use std::io::{self, Write};
use vocab_core::domain::{Story, UserStats, VerseExample, Word};
use vocab_core::session::{SessionProgress, SessionSummary};
use vocab_core::text::{format_number, highlight, percentage, truncate};

const BAR_WIDTH: usize = 24;

pub fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Verse text with every occurrence of the studied word wrapped in `*`.
pub fn highlighted_verse(verse: &str, arabic: &str) -> String {
    highlight(verse, arabic)
        .into_iter()
        .map(|s| if s.highlighted { format!("*{}*", s.text) } else { s.text.to_string() })
        .collect()
}

pub fn example<W: Write>(out: &mut W, ex: &VerseExample, arabic: &str) -> io::Result<()> {
    writeln!(out, "    {}", highlighted_verse(&ex.verse, arabic))?;
    if ex.translation.is_empty() {
        writeln!(out, "    Translation unavailable ({})", ex.reference)
    } else {
        writeln!(out, "    \"{}\" ({})", ex.translation, ex.reference)
    }
}

/// Back face of a card: meaning, transliteration and up to two examples.
pub fn card_back<W: Write>(out: &mut W, word: &Word) -> io::Result<()> {
    writeln!(out, "  {} • #{}", word.word_type.label(), word.id)?;
    writeln!(out, "  {}", word.translation)?;
    writeln!(out, "  /{}/", word.transliteration)?;
    match word.examples.as_deref() {
        Some(examples) if !examples.is_empty() => {
            writeln!(out, "  Usage in Quran:")?;
            for ex in examples.iter().take(2) {
                example(out, ex, &word.arabic)?;
            }
            Ok(())
        }
        _ => writeln!(out, "  No examples available"),
    }
}

pub fn card<W: Write>(
    out: &mut W,
    word: &Word,
    flipped: bool,
    progress: Option<SessionProgress>,
) -> io::Result<()> {
    if let Some(p) = progress {
        writeln!(
            out,
            "Session Progress {} {} / {}",
            progress_bar(p.fraction),
            p.card_number,
            p.total
        )?;
    }
    writeln!(out)?;
    writeln!(out, "  {}", word.arabic)?;
    writeln!(out, "  frequency {}", format_number(word.frequency as u64))?;
    if flipped {
        card_back(out, word)?;
    }
    writeln!(out)
}

pub fn summary<W: Write>(out: &mut W, summary: &SessionSummary) -> io::Result<()> {
    writeln!(out, "Session Complete!")?;
    writeln!(
        out,
        "You reviewed {} words and mastered {} new ones.",
        summary.reviewed, summary.learned
    )?;
    writeln!(
        out,
        "Known this session: {}%",
        percentage(summary.learned as f64, summary.reviewed as f64)
    )
}

pub fn all_caught_up<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "You're all caught up!")?;
    writeln!(out, "You've learned all available words for now. Come back later for more!")
}

pub fn word_line<W: Write>(out: &mut W, word: &Word) -> io::Result<()> {
    writeln!(
        out,
        "#{:<5} {:<14} {:<24} /{}/ ({})",
        word.id,
        word.arabic,
        truncate(&word.translation, 24),
        word.transliteration,
        format_number(word.frequency as u64)
    )
}

pub fn stats<W: Write>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    writeln!(
        out,
        "Words learned:    {} of {}",
        format_number(stats.total_words_learned as u64),
        format_number(stats.total_available_words as u64)
    )?;
    writeln!(
        out,
        "Quran coverage:   {}% {}",
        stats.coverage_percentage,
        progress_bar(stats.coverage_percentage / 100.0)
    )?;
    writeln!(
        out,
        "Occurrences known: {}",
        format_number(stats.total_frequency_known)
    )?;
    writeln!(out, "Progress:         {}%", stats.progress_percentage)?;
    if let Some(since) = stats.member_since {
        writeln!(out, "Member since:     {}", since.format("%B %-d, %Y"))?;
    }
    Ok(())
}

pub fn story<W: Write>(out: &mut W, story: &Story) -> io::Result<()> {
    writeln!(out, "{}", story.title)?;
    writeln!(out)?;
    writeln!(out, "\"{}\"", story.body)?;
    writeln!(out)?;
    writeln!(out, "— {}", story.source.as_deref().unwrap_or("Daily Wisdom"))?;
    if !story.tags.is_empty() {
        writeln!(out, "#{}", story.tags.join(" #"))?;
    }
    Ok(())
}
