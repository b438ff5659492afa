use sea_orm::{DbErr, SqlErr, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, EntryRole, LedgerEntry, Movement, MovementBehavior, MovementCmd, Outcome, entries,
    movements,
};

use super::super::{Engine, with_tx};
use super::validate;

impl Engine {
    /// Executes one money movement.
    ///
    /// Validates the request, resolves both endpoints, derives the behavior
    /// and signed amounts, and persists the movement plus its two entries
    /// in a single transaction. A duplicate of an existing active movement
    /// surfaces as a business conflict, not as a storage error.
    pub async fn execute(&self, cmd: MovementCmd) -> Outcome<Movement> {
        validate(&cmd)?;

        self.bounded(async {
            with_tx!(self, |db_tx| {
                let source = self
                    .resolve_endpoint(&db_tx, cmd.source_account_id, EntryRole::Source)
                    .await?;
                let destination = self
                    .resolve_endpoint(&db_tx, cmd.destination_account_id, EntryRole::Destination)
                    .await?;

                let behavior =
                    MovementBehavior::for_categories(source.category, destination.category);
                let (movement, source_entry, destination_entry) = build_movement(&cmd, behavior);

                if let Err(err) = movements::ActiveModel::from(&movement).insert(&db_tx).await {
                    return Err(classify_insert_error(err));
                }
                entries::ActiveModel::from(&source_entry)
                    .insert(&db_tx)
                    .await?;
                entries::ActiveModel::from(&destination_entry)
                    .insert(&db_tx)
                    .await?;

                tracing::debug!(
                    movement_id = %movement.id,
                    behavior = behavior.as_str(),
                    "movement recorded"
                );
                Ok(movement)
            })
        })
        .await
    }
}

/// Builds the movement record and both of its entries.
///
/// Entry ids are generated up front so the movement row can carry its
/// back-references before anything touches storage. Pure construction.
fn build_movement(
    cmd: &MovementCmd,
    behavior: MovementBehavior,
) -> (Movement, LedgerEntry, LedgerEntry) {
    let movement_id = Uuid::new_v4();
    let (source_amount, destination_amount) = behavior.signed_amounts(cmd.amount);

    let mut source_entry = LedgerEntry::new(
        movement_id,
        cmd.source_account_id,
        source_amount,
        cmd.movement_date,
        EntryRole::Source,
    );
    let mut destination_entry = LedgerEntry::new(
        movement_id,
        cmd.destination_account_id,
        destination_amount,
        cmd.movement_date,
        EntryRole::Destination,
    );
    // Entries share the movement's lifecycle from the start.
    source_entry.active = cmd.active;
    destination_entry.active = cmd.active;

    let movement = Movement {
        id: movement_id,
        source_account_id: cmd.source_account_id,
        destination_account_id: cmd.destination_account_id,
        amount: cmd.amount,
        movement_date: cmd.movement_date,
        behavior,
        source_entry_id: source_entry.id,
        destination_entry_id: destination_entry.id,
        active: cmd.active,
    };

    (movement, source_entry, destination_entry)
}

/// Separate duplicate submissions from genuine storage failures.
///
/// The duplicate guard is a unique index over the movement tuple, so a
/// concurrent identical submission shows up here as a constraint violation
/// rather than being caught by a racy pre-check.
fn classify_insert_error(err: DbErr) -> EngineError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => EngineError::duplicate_movement(),
        _ => err.into(),
    }
}
