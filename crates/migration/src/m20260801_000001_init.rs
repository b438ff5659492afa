//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for the ledger:
//!
//! - `accounts`: movement endpoints with their accounting category
//! - `movements`: one money transfer each, always paired with two entries
//! - `entries`: the signed legs of each movement
//!
//! The duplicate guard is a partial unique index over
//! `(source_account_id, destination_account_id, movement_date, amount_minor)`
//! restricted to active movements, so the check-then-insert race cannot mint
//! duplicates and deleting a movement frees its tuple.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Name,
    Category,
    Active,
}

#[derive(Iden)]
enum Movements {
    Table,
    Id,
    SourceAccountId,
    DestinationAccountId,
    AmountMinor,
    MovementDate,
    Behavior,
    SourceEntryId,
    DestinationEntryId,
    Active,
}

#[derive(Iden)]
enum Entries {
    Table,
    Id,
    MovementId,
    AccountId,
    AmountMinor,
    EntryDate,
    Role,
    Active,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::Category).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movements::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Movements::SourceAccountId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Movements::DestinationAccountId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Movements::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Movements::MovementDate).date().not_null())
                    .col(ColumnDef::new(Movements::Behavior).string().not_null())
                    .col(ColumnDef::new(Movements::SourceEntryId).string().not_null())
                    .col(
                        ColumnDef::new(Movements::DestinationEntryId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Movements::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Movements::Table, Movements::SourceAccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Movements::Table, Movements::DestinationAccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::MovementId).string().not_null())
                    .col(ColumnDef::new(Entries::AccountId).string().not_null())
                    .col(
                        ColumnDef::new(Entries::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Entries::EntryDate).date().not_null())
                    .col(ColumnDef::new(Entries::Role).string().not_null())
                    .col(
                        ColumnDef::new(Entries::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Entries::Table, Entries::MovementId)
                            .to(Movements::Table, Movements::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Entries::Table, Entries::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entries_movement_id")
                    .table(Entries::Table)
                    .col(Entries::MovementId)
                    .to_owned(),
            )
            .await?;

        // sea-query's index builder has no partial-index support, so the
        // duplicate guard goes in as raw SQL. Inactive movements fall out of
        // the index, which frees the tuple for resubmission after a delete.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_movements_active_dedup \
                 ON movements (source_account_id, destination_account_id, movement_date, amount_minor) \
                 WHERE active = 1",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        Ok(())
    }
}
