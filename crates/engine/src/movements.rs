//! Movement records.
//!
//! A [`Movement`] is one money-transfer event between two accounts. It is
//! persisted together with exactly two entries, one per role, inside a
//! single transaction, and carries back-references to both of them. The
//! stored amount is always the absolute value; signs live on the entries.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, MovementBehavior, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movement {
    pub id: Uuid,
    pub source_account_id: Uuid,
    pub destination_account_id: Uuid,
    /// Absolute amount; always positive.
    pub amount: Money,
    /// Calendar date, no time of day, no timezone.
    pub movement_date: NaiveDate,
    pub behavior: MovementBehavior,
    pub source_entry_id: Uuid,
    pub destination_entry_id: Uuid,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub source_account_id: String,
    pub destination_account_id: String,
    pub amount_minor: i64,
    pub movement_date: Date,
    pub behavior: String,
    pub source_entry_id: String,
    pub destination_entry_id: String,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::entries::Entity")]
    Entries,
}

impl Related<super::entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Movement> for ActiveModel {
    fn from(movement: &Movement) -> Self {
        Self {
            id: ActiveValue::Set(movement.id.to_string()),
            source_account_id: ActiveValue::Set(movement.source_account_id.to_string()),
            destination_account_id: ActiveValue::Set(movement.destination_account_id.to_string()),
            amount_minor: ActiveValue::Set(movement.amount.cents()),
            movement_date: ActiveValue::Set(movement.movement_date),
            behavior: ActiveValue::Set(movement.behavior.as_str().to_string()),
            source_entry_id: ActiveValue::Set(movement.source_entry_id.to_string()),
            destination_entry_id: ActiveValue::Set(movement.destination_entry_id.to_string()),
            active: ActiveValue::Set(movement.active),
        }
    }
}

impl TryFrom<Model> for Movement {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "movement")?,
            source_account_id: parse_uuid(&model.source_account_id, "account")?,
            destination_account_id: parse_uuid(&model.destination_account_id, "account")?,
            amount: Money::new(model.amount_minor),
            movement_date: model.movement_date,
            behavior: MovementBehavior::try_from(model.behavior.as_str())?,
            source_entry_id: parse_uuid(&model.source_entry_id, "entry")?,
            destination_entry_id: parse_uuid(&model.destination_entry_id, "entry")?,
            active: model.active,
        })
    }
}
