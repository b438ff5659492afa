use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{EngineError, LedgerEntry, Movement, Outcome, entries, movements};

use super::super::Engine;

impl Engine {
    async fn find_active_movement<C: ConnectionTrait>(
        &self,
        conn: &C,
        movement_id: Uuid,
    ) -> Outcome<Movement> {
        let model = movements::Entity::find_by_id(movement_id.to_string())
            .one(conn)
            .await?;
        match model.filter(|m| m.active) {
            Some(model) => Movement::try_from(model),
            None => Err(EngineError::NotFound(format!("movement {movement_id}"))),
        }
    }

    /// Returns an active movement by id.
    pub async fn find_movement(&self, movement_id: Uuid) -> Outcome<Movement> {
        self.bounded(self.find_active_movement(&self.database, movement_id))
            .await
    }

    /// Returns both entries of an active movement, source leg first.
    pub async fn find_movement_entries(&self, movement_id: Uuid) -> Outcome<Vec<LedgerEntry>> {
        self.bounded(async {
            // Resolve the movement first so a missing or deleted movement is
            // not reported as an empty entry list.
            self.find_active_movement(&self.database, movement_id)
                .await?;

            let models = entries::Entity::find()
                .filter(entries::Column::MovementId.eq(movement_id.to_string()))
                .order_by_desc(entries::Column::Role)
                .all(&self.database)
                .await?;

            let mut out = Vec::with_capacity(models.len());
            for model in models {
                out.push(LedgerEntry::try_from(model)?);
            }
            Ok(out)
        })
        .await
    }
}
