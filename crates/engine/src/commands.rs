//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::Money;

/// Request one money movement between two accounts.
#[derive(Clone, Debug)]
pub struct MovementCmd {
    pub source_account_id: Uuid,
    pub destination_account_id: Uuid,
    /// Absolute amount to move; must be strictly positive.
    pub amount: Money,
    /// Calendar date of the movement. No time of day, no timezone.
    pub movement_date: NaiveDate,
    pub active: bool,
}

impl MovementCmd {
    #[must_use]
    pub fn new(
        source_account_id: Uuid,
        destination_account_id: Uuid,
        amount: Money,
        movement_date: NaiveDate,
    ) -> Self {
        Self {
            source_account_id,
            destination_account_id,
            amount,
            movement_date,
            active: true,
        }
    }

    /// Overrides the initial active status.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
