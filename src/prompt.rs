// Operator confirmation before destructive actions

use crate::models::DatabaseRecord;
use std::io::{BufRead, Write};

pub trait ConfirmPrompt {
    /// Blocks until the operator answers; `true` lets the drop proceed.
    fn confirm(&self, record: &DatabaseRecord) -> bool;
}

/// Asks on stdout and reads one line from stdin. Anything but y/yes declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&self, record: &DatabaseRecord) -> bool {
        let mut stdout = std::io::stdout();
        if write!(
            stdout,
            "Drop database `{}` ({})? [y/N] ",
            record.name,
            record.size_human()
        )
        .and_then(|_| stdout.flush())
        .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read confirmation");
                false
            }
        }
    }
}

/// Fixed answer, for `--yes` and tests.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl ConfirmPrompt for AutoConfirm {
    fn confirm(&self, _record: &DatabaseRecord) -> bool {
        self.0
    }
}
