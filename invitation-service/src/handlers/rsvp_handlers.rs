use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use log::info;
use serde::Deserialize;

use wedding_shared::api::ApiTransport;

use crate::cover::CoverState;
use crate::error::{AppError, Result};
use crate::handlers::page_handlers::{ensure_wedding, render_page};
use crate::render::SUBMITTED_BANNER;
use crate::rsvp::{RsvpDraft, RsvpWorkflow};
use crate::state::AppState;

// POST /rsvp
pub async fn submit_rsvp<T>(
    State(state): State<AppState<T>>,
    Form(draft): Form<RsvpDraft>,
) -> Result<Response>
where
    T: ApiTransport + 'static,
{
    let weddings = state.wedding_store()?;
    let guests = state.guest_store()?;

    let snapshot = weddings.snapshot();
    let Some(wedding) = snapshot.wedding.as_ref() else {
        return Err(AppError::bad_request(
            "No wedding is loaded; open the invitation first.".into(),
        ));
    };

    // The form is only reachable past the cover
    let cover = CoverState::Hidden;
    let mut workflow = RsvpWorkflow::with_draft(draft);

    match workflow.submit(&wedding.id, Utc::now()) {
        Ok(candidate) => {
            let saved = guests.add_confirmation(candidate).await;
            info!(
                "RSVP from {} saved as {} (attending={}, guests={})",
                saved.guest_name, saved.id, saved.is_attending, saved.number_of_guests
            );
            workflow.complete(saved);

            let banner = workflow.is_submitted().then_some(SUBMITTED_BANNER);
            let page = render_page(&state, &snapshot, cover, &workflow, banner)?;
            Ok(page.into_response())
        }
        Err(e) => {
            info!("RSVP rejected for {}: {}", wedding.id, e);
            let page = render_page(&state, &snapshot, cover, &workflow, None)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ModifyRequest {
    #[serde(default)]
    pub id: String,
}

// POST /rsvp/modify
pub async fn modify_rsvp<T>(
    State(state): State<AppState<T>>,
    Form(request): Form<ModifyRequest>,
) -> Result<Response>
where
    T: ApiTransport + 'static,
{
    let guests = state.guest_store()?;
    let snapshot = ensure_wedding(&state).await?;

    // The saved confirmation stays in the store; only the form starts over
    let mut workflow = RsvpWorkflow::default();
    if let Some(previous) = guests.get_confirmation(&request.id) {
        workflow.complete(previous);
    }
    if workflow.is_submitted() {
        info!("Guest is modifying response {}", request.id);
    }
    workflow.modify();

    let page = render_page(&state, &snapshot, CoverState::Hidden, &workflow, None)?;
    Ok(page.into_response())
}
