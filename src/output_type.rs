use std::io::Write;

use crate::outcome::Outcome;

/// How a binary renders an [`Outcome`].
///
/// - `ValueEnum` (with the `cli` feature) lets this enum be used directly as a `clap` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// One JSON object: `{"success": ..., "transcript"|"error": ...}`.
    #[default]
    Json,

    /// The bare transcript on stdout; errors go to stderr.
    Text,
}

impl OutputType {
    /// Write `outcome` to `out` (results) or `err` (text-mode failures).
    pub fn write<W: Write, E: Write>(
        self,
        outcome: &Outcome,
        out: &mut W,
        err: &mut E,
    ) -> crate::Result<()> {
        match (self, outcome) {
            (Self::Json, _) => {
                serde_json::to_writer(&mut *out, outcome)?;
                writeln!(out)?;
                out.flush()?;
            }
            (Self::Text, Outcome::Success { transcript }) => {
                writeln!(out, "{transcript}")?;
                out.flush()?;
            }
            (Self::Text, Outcome::Failure { error }) => {
                writeln!(err, "error: {error}")?;
                err.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(output: OutputType, outcome: &Outcome) -> anyhow::Result<(String, String)> {
        let mut out = Vec::new();
        let mut err = Vec::new();
        output.write(outcome, &mut out, &mut err)?;
        Ok((String::from_utf8(out)?, String::from_utf8(err)?))
    }

    #[test]
    fn json_writes_record_line_for_both_shapes() -> anyhow::Result<()> {
        let (out, err) = render(OutputType::Json, &Outcome::success("hi"))?;
        assert_eq!(out, "{\"success\":true,\"transcript\":\"hi\"}\n");
        assert!(err.is_empty());

        let (out, _) = render(OutputType::Json, &Outcome::failure("bad"))?;
        assert_eq!(out, "{\"success\":false,\"error\":\"bad\"}\n");
        Ok(())
    }

    #[test]
    fn text_splits_results_and_errors() -> anyhow::Result<()> {
        let (out, err) = render(OutputType::Text, &Outcome::success("hi there"))?;
        assert_eq!(out, "hi there\n");
        assert!(err.is_empty());

        let (out, err) = render(OutputType::Text, &Outcome::failure("bad"))?;
        assert!(out.is_empty());
        assert_eq!(err, "error: bad\n");
        Ok(())
    }
}
