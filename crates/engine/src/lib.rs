//! Double-entry movement ledger engine.
//!
//! Converts one money-movement request into a [`Movement`] plus exactly two
//! linked [`LedgerEntry`] rows with correctly signed amounts, guards against
//! duplicate submission with a storage-level unique index, and reports every
//! failure through the closed [`EngineError`] taxonomy instead of throwing
//! or returning optionals.
//!
//! The flow of [`Engine::execute`]:
//!
//! 1. structural validation into a field-keyed error map
//! 2. both endpoints resolved fresh (category + active status)
//! 3. [`MovementBehavior`] derived from the category pair
//! 4. signed amounts computed from the behavior
//! 5. movement + both entries persisted in one transaction

pub use accounts::{AccountInfo, Category};
pub use behavior::MovementBehavior;
pub use commands::MovementCmd;
pub use entries::{EntryRole, LedgerEntry};
pub use error::{BusinessCode, EngineError, FieldErrors, Outcome, SystemCause};
pub use money::Money;
pub use movements::Movement;
pub use ops::{Engine, EngineBuilder};

mod accounts;
mod behavior;
mod commands;
mod entries;
mod error;
mod money;
mod movements;
mod ops;
mod util;
