//! Lines evaluated during an interactive session.

use crate::calculator::CalcResult;

/// A single evaluated line.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// The expression as entered, trimmed.
    pub expression: String,
    /// The formatted result, or the error message.
    pub display_result: String,
    /// The result for the clipboard. None if evaluation failed.
    pub clipboard_result: Option<String>,
    pub is_error: bool,
}

impl HistoryEntry {
    /// Create an entry from a calculation result.
    pub fn from_calc_result(result: &CalcResult) -> Self {
        Self {
            expression: result.expression().to_string(),
            display_result: result.display().to_string(),
            clipboard_result: result.clipboard().map(str::to_string),
            is_error: !result.is_success(),
        }
    }

    /// Get the text to copy to clipboard.
    /// Returns the result for successful calculations, or the error message
    /// so the user can still copy it.
    pub fn text_for_clipboard(&self) -> &str {
        self.clipboard_result
            .as_deref()
            .unwrap_or(&self.display_result)
    }
}

/// Session history, oldest first.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an evaluated line.
    pub fn push(&mut self, result: &CalcResult) {
        self.entries.push(HistoryEntry::from_calc_result(result));
    }

    /// Get the most recent entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Get all entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Check if nothing has been evaluated yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::evaluate_expression;

    #[test]
    fn test_entry_from_success() {
        let entry = HistoryEntry::from_calc_result(&evaluate_expression("6 * 7", None));
        assert_eq!(entry.expression, "6 * 7");
        assert_eq!(entry.display_result, "42");
        assert!(!entry.is_error);
        assert_eq!(entry.text_for_clipboard(), "42");
    }

    #[test]
    fn test_entry_from_error_copies_message() {
        let entry = HistoryEntry::from_calc_result(&evaluate_expression("6 / 0", None));
        assert!(entry.is_error);
        assert_eq!(entry.clipboard_result, None);
        assert_eq!(entry.text_for_clipboard(), "Cannot divide by zero");
    }

    #[test]
    fn test_history_order() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert!(history.last().is_none());

        history.push(&evaluate_expression("1 + 1", None));
        history.push(&evaluate_expression("2 + 2", None));

        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.entries()[0].expression, "1 + 1");
        assert_eq!(history.last().unwrap().display_result, "4");
    }
}
