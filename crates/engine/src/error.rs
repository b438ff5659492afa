//! The engine outcome taxonomy.
//!
//! Every engine operation returns [`Outcome<T>`]: `Ok` on success, otherwise
//! one of the closed [`EngineError`] variants. There is no nullable or
//! "absent" stand-in anywhere in the API, and callers are expected to match
//! every variant explicitly.
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use sea_orm::DbErr;
use thiserror::Error;

/// Result alias used by every engine operation.
pub type Outcome<T> = Result<T, EngineError>;

/// Machine-readable codes for business-rule conflicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusinessCode {
    /// An identical active movement already exists.
    DuplicateMovement,
}

impl BusinessCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateMovement => "duplicate_movement",
        }
    }
}

impl fmt::Display for BusinessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed validation messages.
///
/// Ordered, so error bodies and assertions are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Underlying cause of an [`EngineError::System`] failure.
///
/// Kept for logging and correlation only. The outward-facing message of the
/// wrapping error stays generic.
#[derive(Error, Debug)]
pub enum SystemCause {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("storage operation exceeded {0:?}")]
    Timeout(Duration),
    #[error("{0}")]
    Data(String),
}

/// Engine errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A referenced record does not exist or is inactive.
    #[error("{0} not found")]
    NotFound(String),
    /// The request failed structural validation before any lookup.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// A business rule rejected an otherwise well-formed request.
    #[error("{message}")]
    Business {
        code: BusinessCode,
        message: String,
    },
    /// Infrastructure failure. The cause is reachable through `source()`
    /// and must never be shown to external callers.
    #[error("internal error")]
    System(#[source] SystemCause),
}

impl EngineError {
    #[must_use]
    pub fn duplicate_movement() -> Self {
        Self::Business {
            code: BusinessCode::DuplicateMovement,
            message: "an identical active movement already exists".to_string(),
        }
    }

    /// Unexpected content coming back from storage.
    pub(crate) fn data(message: impl Into<String>) -> Self {
        Self::System(SystemCause::Data(message.into()))
    }
}

impl From<DbErr> for EngineError {
    fn from(value: DbErr) -> Self {
        Self::System(SystemCause::Database(value))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (
                Self::Business {
                    code: a,
                    message: am,
                },
                Self::Business {
                    code: b,
                    message: bm,
                },
            ) => a == b && am == bm,
            (Self::System(a), Self::System(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
