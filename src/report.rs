use solana_program::{msg, pubkey::Pubkey};

use crate::error::ErrorKind;

/// Append-only log of one instruction, framed the way the runtime frames
/// program logs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Logs {
    lines: Vec<String>,
}

impl Logs {
    /// Starts a log with the `Program <id> invoke [1]` marker.
    pub fn invoke(program_id: &Pubkey) -> Self {
        Self {
            lines: vec![format!("Program {} invoke [1]", program_id)],
        }
    }

    /// Program message. Also emitted through `msg!`.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        msg!("{}", message);
        self.lines.push(format!("Program log: {}", message));
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success { logs: Vec<String> },
    Failure { kind: ErrorKind, logs: Vec<String> },
}

impl Outcome {
    pub(crate) fn success(program_id: &Pubkey, mut logs: Logs) -> Self {
        logs.push(format!("Program {} success", program_id));
        Outcome::Success {
            logs: logs.into_lines(),
        }
    }

    pub(crate) fn failure(program_id: &Pubkey, kind: ErrorKind, mut logs: Logs) -> Self {
        logs.push(format!("Program {} failed: {}", program_id, kind));
        Outcome::Failure {
            kind,
            logs: logs.into_lines(),
        }
    }

    pub fn logs(&self) -> &[String] {
        match self {
            Outcome::Success { logs } | Outcome::Failure { logs, .. } => logs,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn into_result(self) -> Result<(), ErrorKind> {
        match self {
            Outcome::Success { .. } => Ok(()),
            Outcome::Failure { kind, .. } => Err(kind),
        }
    }
}

/// Outcomes of a submitted batch, in submission order. A batch stops at its
/// first failure, so only the last outcome can be a failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub outcomes: Vec<Outcome>,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(Outcome::is_success)
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.outcomes.iter().find_map(Outcome::error)
    }

    /// Every log line of the batch, in order.
    pub fn logs(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .flat_map(|outcome| outcome.logs().iter().map(String::as_str))
            .collect()
    }
}
