use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Outcome, entries, movements};

use super::super::{Engine, with_tx};

impl Engine {
    /// Deletes a movement (soft delete).
    ///
    /// Flips `active` off on the movement row and on both of its entries in
    /// the same transaction; the ledger never holds a half-deleted pair.
    /// Already-inactive movements are reported as missing, and deleting a
    /// movement frees its tuple for resubmission.
    pub async fn delete_movement(&self, movement_id: Uuid) -> Outcome<()> {
        self.bounded(async {
            with_tx!(self, |db_tx| {
                let model = movements::Entity::find_by_id(movement_id.to_string())
                    .one(&db_tx)
                    .await?;
                let Some(model) = model.filter(|m| m.active) else {
                    return Err(EngineError::NotFound(format!("movement {movement_id}")));
                };

                let entry_models = entries::Entity::find()
                    .filter(entries::Column::MovementId.eq(movement_id.to_string()))
                    .all(&db_tx)
                    .await?;
                for entry_model in entry_models {
                    let entry_active = entries::ActiveModel {
                        id: ActiveValue::Set(entry_model.id),
                        active: ActiveValue::Set(false),
                        ..Default::default()
                    };
                    entry_active.update(&db_tx).await?;
                }

                let movement_active = movements::ActiveModel {
                    id: ActiveValue::Set(model.id),
                    active: ActiveValue::Set(false),
                    ..Default::default()
                };
                movement_active.update(&db_tx).await?;

                tracing::debug!(movement_id = %movement_id, "movement deleted");
                Ok(())
            })
        })
        .await
    }
}
