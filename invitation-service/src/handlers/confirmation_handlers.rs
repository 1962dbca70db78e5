use axum::{
    extract::{Path, State},
    Json,
};
use log::debug;

use wedding_shared::api::ApiTransport;
use wedding_shared::models::GuestConfirmation;

use crate::error::{AppError, Result};
use crate::state::AppState;

// GET /confirmations
pub async fn get_confirmations<T>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<GuestConfirmation>>>
where
    T: ApiTransport + 'static,
{
    let confirmations = state.guest_store()?.confirmations();
    debug!("Listing {} session confirmations", confirmations.len());
    Ok(Json(confirmations))
}

// GET /confirmations/:id
pub async fn get_confirmation<T>(
    State(state): State<AppState<T>>,
    Path(id): Path<String>,
) -> Result<Json<GuestConfirmation>>
where
    T: ApiTransport + 'static,
{
    state
        .guest_store()?
        .find_confirmation(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Confirmation {} not found", id)))
}

// GET /weddings/:wedding_id/confirmations
pub async fn get_wedding_confirmations<T>(
    State(state): State<AppState<T>>,
    Path(wedding_id): Path<String>,
) -> Result<Json<Vec<GuestConfirmation>>>
where
    T: ApiTransport + 'static,
{
    let confirmations = state.guest_store()?.wedding_confirmations(&wedding_id).await;
    Ok(Json(confirmations))
}
