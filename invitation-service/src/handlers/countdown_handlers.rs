use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use chrono::{DateTime, Utc};
use log::{info, warn};
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};

use wedding_shared::api::ApiTransport;

use crate::countdown::{parse_target, Countdown, CountdownTicker};
use crate::error::{AppError, Result};
use crate::handlers::page_handlers::ensure_wedding;
use crate::state::AppState;

/// The loaded wedding's date. An unreadable date counts as already reached.
async fn wedding_target<T>(state: &AppState<T>) -> Result<DateTime<Utc>>
where
    T: ApiTransport + 'static,
{
    let snapshot = ensure_wedding(state).await?;
    let wedding = snapshot
        .wedding
        .ok_or_else(|| AppError::not_found("No wedding is loaded.".into()))?;

    Ok(parse_target(&wedding.date).unwrap_or_else(|e| {
        warn!(
            "Wedding {} has an unreadable date '{}': {}",
            wedding.id, wedding.date, e
        );
        Utc::now()
    }))
}

// GET /countdown
pub async fn get_countdown<T>(State(state): State<AppState<T>>) -> Result<Json<Countdown>>
where
    T: ApiTransport + 'static,
{
    let target = wedding_target(&state).await?;
    Ok(Json(Countdown::between(target, Utc::now())))
}

// GET /countdown/stream
pub async fn stream_countdown<T>(
    State(state): State<AppState<T>>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>>
where
    T: ApiTransport + 'static,
{
    let target = wedding_target(&state).await?;
    let ticker = CountdownTicker::spawn(target);
    let left = ticker.current();
    info!(
        "Countdown stream opened for {} ({}d {}h {}m {}s left)",
        target, left.days, left.hours, left.minutes, left.seconds
    );

    // The stream owns the ticker; a disconnecting client drops both
    let updates = WatchStream::new(ticker.subscribe()).map(move |countdown| {
        let _ticker = &ticker;
        Event::default().json_data(countdown)
    });

    Ok(Sse::new(updates).keep_alive(KeepAlive::default()))
}
