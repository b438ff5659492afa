//! Movement endpoints.
//!
//! The engine treats accounts as a read model: on every request it resolves
//! the category and active status of both endpoints and never writes back.
//! There is deliberately no caching here, a category change between two
//! requests must be visible to the second one or the sign calculation goes
//! wrong silently.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// Accounting category of an account.
///
/// Closed on purpose: every behavior and sign decision is a total match
/// over this type, so a new category cannot be added without the compiler
/// pointing at every matrix that has to learn about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Balance represents value held.
    Asset,
    /// Balance represents debt owed.
    Liability,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            other => Err(EngineError::data(format!(
                "invalid account category: {other}"
            ))),
        }
    }
}

/// Snapshot of an account as seen by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountInfo {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub category: String,
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

impl TryFrom<Model> for AccountInfo {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "account")?,
            name: model.name,
            category: Category::try_from(model.category.as_str())?,
            active: model.active,
        })
    }
}
