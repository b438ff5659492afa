use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Movement classification as exposed on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementBehavior {
    BillPayment,
    Transfer,
    CashAdvance,
    BalanceTransfer,
}

/// Which end of a movement an entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRole {
    Source,
    Destination,
}

pub mod movement {
    use super::*;

    /// Request body for creating a movement.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MovementNew {
        pub source_account_id: Uuid,
        pub destination_account_id: Uuid,
        /// Absolute amount as a 2-decimal string, e.g. `"100.00"`.
        pub amount: String,
        /// Calendar date (`YYYY-MM-DD`), no time component, no timezone.
        pub movement_date: NaiveDate,
    }

    /// A movement as returned by the server.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MovementView {
        pub id: Uuid,
        pub source_account_id: Uuid,
        pub destination_account_id: Uuid,
        /// Absolute amount as a 2-decimal string.
        pub amount: String,
        pub movement_date: NaiveDate,
        pub behavior: MovementBehavior,
        pub source_entry_id: Uuid,
        pub destination_entry_id: Uuid,
    }

    /// One signed leg of a movement.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: Uuid,
        pub movement_id: Uuid,
        pub account_id: Uuid,
        /// Signed amount as a 2-decimal string, e.g. `"-100.00"`.
        pub amount: String,
        pub entry_date: NaiveDate,
        pub role: EntryRole,
    }
}
