//! Rolling-caption deduplication.
//!
//! Auto-generated WebVTT captions are usually rendered as "rolling" captions: each cue repeats
//! the line currently on screen, so the same sentence shows up again and again as a growing
//! (and sometimes shrinking) prefix of itself. `RollingDedup` folds that stream back into the
//! sequence of lines a human would have read.
//!
//! The merge rule is purely textual: any two lines where one literally starts with the other are
//! treated as renderings of the same caption, even if they are unrelated sentences.

use tracing::trace;

/// What [`RollingDedup::push`] did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Same text as the last accepted line.
    Repeat,

    /// The line extended the last accepted line and replaced it.
    Grew,

    /// The line was a partial rendering of the last accepted line and was dropped.
    Shrank,

    /// The line started a new transcript entry.
    Appended,
}

/// Scan state for one normalization call.
///
/// Invariants:
/// - every buffered entry is non-empty
/// - adjacent entries are never equal nor in a prefix relationship
/// - `last_seen` always equals the final buffered entry (or is empty when nothing is buffered)
#[derive(Debug, Default)]
pub struct RollingDedup {
    buffer: Vec<String>,
    last_seen: String,
}

impl RollingDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one cleaned, non-empty cue line.
    pub fn push(&mut self, line: &str) -> Step {
        debug_assert!(!line.is_empty(), "cue lines must be non-empty");

        if line == self.last_seen {
            return Step::Repeat;
        }

        let has_last = !self.last_seen.is_empty();
        let step = if self.buffer.is_empty() {
            // The first content line is always kept.
            self.buffer.push(line.to_owned());
            Step::Appended
        } else if has_last && line.starts_with(&self.last_seen) {
            if let Some(last) = self.buffer.last_mut() {
                line.clone_into(last);
            }
            Step::Grew
        } else if has_last && (self.last_seen.starts_with(line) || self.last_seen.ends_with(line)) {
            // A shorter rendering of what is already buffered. Keep comparing against the longer
            // line so a later regrowth still merges.
            return Step::Shrank;
        } else {
            self.buffer.push(line.to_owned());
            Step::Appended
        };

        line.clone_into(&mut self.last_seen);
        trace!(?step, entries = self.buffer.len(), "cue line accepted");
        step
    }

    /// The accepted entries so far.
    pub fn entries(&self) -> &[String] {
        &self.buffer
    }

    /// Join the accepted entries with single spaces.
    pub fn finish(self) -> String {
        self.buffer.join(" ")
    }
}
