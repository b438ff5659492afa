//! Internal helpers for model conversion.

use uuid::Uuid;

use crate::{EngineError, Outcome};

/// Parse a UUID coming back from storage, labeling the failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> Outcome<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::data(format!("invalid {label} id: {value}")))
}
