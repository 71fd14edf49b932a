//! Structured error types shared across the dps crates.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic attached to every [`DpsError`].
///
/// Context entries keep the order they were added in, so a rendered error
/// reads outermost first: run, then command, then the offending cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case code such as `unknown-run` or `simulator-exit`.
    pub code: String,
    /// One-line description of what went wrong.
    pub message: String,
    /// Ordered `key=value` pairs locating the failure.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub context: IndexMap<String, String>,
    /// What the user can do about it, e.g. the list of known runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Diagnostic with no context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: IndexMap::new(),
            hint: None,
        }
    }

    /// Records `key=value`; a repeated key keeps its first position.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Replaces the hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Context value recorded under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

/// Canonical error type for the sweep driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum DpsError {
    /// The simulator executable could not be started.
    #[error("launch error: {0}")]
    Launch(ErrorInfo),
    /// The simulator ran but reported failure through its exit status.
    #[error("simulator exited with {}: {info}", describe_status(.code))]
    Exit {
        /// Exit code, absent when the process was terminated by a signal.
        code: Option<i32>,
        /// Structured payload.
        info: ErrorInfo,
    },
    /// Captured output does not satisfy a consumer's numeric contract.
    #[error("malformed output: {0}")]
    Output(ErrorInfo),
    /// Table serialization and file errors.
    #[error("table error: {0}")]
    Table(ErrorInfo),
    /// Unknown presets, runs or inconsistent options.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Console and report output failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in entries {
                write!(f, " {key}={value}")?;
            }
            write!(f, ")")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "; {hint}")?;
        }
        Ok(())
    }
}

impl DpsError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DpsError::Launch(info)
            | DpsError::Exit { info, .. }
            | DpsError::Output(info)
            | DpsError::Table(info)
            | DpsError::Config(info)
            | DpsError::Io(info) => info,
        }
    }

    /// Returns the simulator exit code for [`DpsError::Exit`] failures.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            DpsError::Exit { code, .. } => *code,
            _ => None,
        }
    }
}
