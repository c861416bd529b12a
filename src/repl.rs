//! Interactive read-evaluate-print loop.
//!
//! Every failure is reported on its own line and the loop keeps going.
//! `exit` or end of input ends it.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::calculator::{CalcResult, copy_to_clipboard, evaluate_expression};
use crate::config::Config;
use crate::history::History;

/// Copies text somewhere, normally the system clipboard.
pub type Copier = fn(&str) -> anyhow::Result<()>;

/// Interactive session state: configuration, history and the clipboard hook.
pub struct Repl {
    config: Config,
    history: History,
    copier: Copier,
}

impl Repl {
    /// Create a session that copies to the system clipboard.
    pub fn new(config: Config) -> Self {
        Self::with_copier(config, copy_to_clipboard)
    }

    /// Create a session with a custom copy hook.
    pub fn with_copier(config: Config, copier: Copier) -> Self {
        Self {
            config,
            history: History::new(),
            copier,
        }
    }

    /// Get the lines evaluated so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Run until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> anyhow::Result<()> {
        let mut buf = Vec::new();

        loop {
            write!(output, "{}", self.config.prompt)?;
            output.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(output)?;
                break;
            }

            // Invalid UTF-8 becomes U+FFFD, which validation rejects for this line only.
            let line = String::from_utf8_lossy(&buf);
            let trimmed = line.trim();
            match trimmed.to_lowercase().as_str() {
                "exit" => break,
                "history" => self.print_history(&mut output)?,
                "copy" => self.copy_last(&mut output)?,
                "" => writeln!(output, "Error: Expression cannot be null or empty.")?,
                _ => self.evaluate_line(trimmed, &mut output)?,
            }
        }

        info!(lines = self.history.entries().len(), "session ended");
        Ok(())
    }

    fn evaluate_line<W: Write>(&mut self, line: &str, output: &mut W) -> anyhow::Result<()> {
        let result = evaluate_expression(line, self.config.precision);
        write_result(&result, self.config.show_postfix, output)?;

        if self.config.copy_results
            && let Some(text) = result.clipboard()
            && let Err(e) = (self.copier)(text)
        {
            warn!(error = %e, "failed to copy result");
        }

        self.history.push(&result);
        Ok(())
    }

    fn print_history<W: Write>(&self, output: &mut W) -> anyhow::Result<()> {
        if self.history.is_empty() {
            writeln!(output, "No history yet.")?;
        }
        for (i, entry) in self.history.entries().iter().enumerate() {
            let marker = if entry.is_error { "!" } else { "=" };
            writeln!(
                output,
                "{:>3}: {} {} {}",
                i + 1,
                entry.expression,
                marker,
                entry.display_result
            )?;
        }
        Ok(())
    }

    fn copy_last<W: Write>(&self, output: &mut W) -> anyhow::Result<()> {
        let Some(entry) = self.history.last() else {
            writeln!(output, "Nothing to copy.")?;
            return Ok(());
        };

        match (self.copier)(entry.text_for_clipboard()) {
            Ok(()) => writeln!(output, "Copied: {}", entry.text_for_clipboard())?,
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
        Ok(())
    }
}

/// Print a result the way the interactive loop and one-shot mode do.
///
/// Postfix notation is printed whenever conversion succeeded, even if
/// evaluation then failed.
pub fn write_result<W: Write>(
    result: &CalcResult,
    show_postfix: bool,
    output: &mut W,
) -> std::io::Result<()> {
    if show_postfix && let Some(postfix) = result.postfix() {
        writeln!(output, "Postfix notation: {}", postfix)?;
    }
    match result {
        CalcResult::Success { display_result, .. } => writeln!(output, "Result: {}", display_result),
        CalcResult::Error { message, .. } => writeln!(output, "Error: {}", message),
    }
}
