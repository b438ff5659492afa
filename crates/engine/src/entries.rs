//! Ledger entries.
//!
//! A [`LedgerEntry`] is one signed leg of a movement. The source leg and the
//! destination leg are always created together, carry the same calendar
//! date, and share the movement id as their correlation key.
//!
//! Amounts are signed:
//! - on an asset account, positive means money arrived
//! - on a liability account, positive means the debt grew

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, util::parse_uuid};

/// Which end of the movement an entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRole {
    Source,
    Destination,
}

impl EntryRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Destination => "destination",
        }
    }
}

impl TryFrom<&str> for EntryRole {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "source" => Ok(Self::Source),
            "destination" => Ok(Self::Destination),
            other => Err(EngineError::data(format!("invalid entry role: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub movement_id: Uuid,
    pub account_id: Uuid,
    /// Signed amount, as produced by the behavior sign table.
    pub amount: Money,
    /// Same calendar date as the owning movement.
    pub entry_date: NaiveDate,
    pub role: EntryRole,
    pub active: bool,
}

impl LedgerEntry {
    #[must_use]
    pub fn new(
        movement_id: Uuid,
        account_id: Uuid,
        amount: Money,
        entry_date: NaiveDate,
        role: EntryRole,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            movement_id,
            account_id,
            amount,
            entry_date,
            role,
            active: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub movement_id: String,
    pub account_id: String,
    pub amount_minor: i64,
    pub entry_date: Date,
    pub role: String,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movements::Entity",
        from = "Column::MovementId",
        to = "super::movements::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Movements,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Accounts,
}

impl Related<super::movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&LedgerEntry> for ActiveModel {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            movement_id: ActiveValue::Set(entry.movement_id.to_string()),
            account_id: ActiveValue::Set(entry.account_id.to_string()),
            amount_minor: ActiveValue::Set(entry.amount.cents()),
            entry_date: ActiveValue::Set(entry.entry_date),
            role: ActiveValue::Set(entry.role.as_str().to_string()),
            active: ActiveValue::Set(entry.active),
        }
    }
}

impl TryFrom<Model> for LedgerEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "entry")?,
            movement_id: parse_uuid(&model.movement_id, "movement")?,
            account_id: parse_uuid(&model.account_id, "account")?,
            amount: Money::new(model.amount_minor),
            entry_date: model.entry_date,
            role: EntryRole::try_from(model.role.as_str())?,
            active: model.active,
        })
    }
}
