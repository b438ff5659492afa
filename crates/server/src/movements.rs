//! Movement API endpoints.

use api_types::movement::{EntryView, MovementNew, MovementView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_behavior(behavior: engine::MovementBehavior) -> api_types::MovementBehavior {
    match behavior {
        engine::MovementBehavior::BillPayment => api_types::MovementBehavior::BillPayment,
        engine::MovementBehavior::Transfer => api_types::MovementBehavior::Transfer,
        engine::MovementBehavior::CashAdvance => api_types::MovementBehavior::CashAdvance,
        engine::MovementBehavior::BalanceTransfer => api_types::MovementBehavior::BalanceTransfer,
    }
}

fn map_role(role: engine::EntryRole) -> api_types::EntryRole {
    match role {
        engine::EntryRole::Source => api_types::EntryRole::Source,
        engine::EntryRole::Destination => api_types::EntryRole::Destination,
    }
}

fn movement_view(movement: engine::Movement) -> MovementView {
    MovementView {
        id: movement.id,
        source_account_id: movement.source_account_id,
        destination_account_id: movement.destination_account_id,
        amount: movement.amount.to_string(),
        movement_date: movement.movement_date,
        behavior: map_behavior(movement.behavior),
        source_entry_id: movement.source_entry_id,
        destination_entry_id: movement.destination_entry_id,
    }
}

fn entry_view(entry: engine::LedgerEntry) -> EntryView {
    EntryView {
        id: entry.id,
        movement_id: entry.movement_id,
        account_id: entry.account_id,
        amount: entry.amount.to_string(),
        entry_date: entry.entry_date,
        role: map_role(entry.role),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MovementNew>,
) -> Result<(StatusCode, Json<MovementView>), ServerError> {
    let amount: engine::Money = payload.amount.parse()?;
    let cmd = engine::MovementCmd::new(
        payload.source_account_id,
        payload.destination_account_id,
        amount,
        payload.movement_date,
    );

    let movement = state.engine.execute(cmd).await?;
    Ok((StatusCode::CREATED, Json(movement_view(movement))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MovementView>, ServerError> {
    let movement = state.engine.find_movement(id).await?;
    Ok(Json(movement_view(movement)))
}

pub async fn entries(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<EntryView>>, ServerError> {
    let entries = state.engine.find_movement_entries(id).await?;
    Ok(Json(entries.into_iter().map(entry_view).collect()))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_movement(id).await?;
    Ok(StatusCode::OK)
}
