use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;
use log::{debug, info};

use wedding_shared::api::ApiTransport;

use crate::cover::{apply_effects, CoverGate, CoverState};
use crate::error::Result;
use crate::render::PageView;
use crate::rsvp::RsvpWorkflow;
use crate::state::AppState;
use crate::storage::CookieStorage;
use crate::store::WeddingState;

/// The wedding state a view should be drawn from, fetching the configured
/// wedding first when nothing is loaded and no fetch is running.
pub(crate) async fn ensure_wedding<T>(state: &AppState<T>) -> Result<WeddingState>
where
    T: ApiTransport + 'static,
{
    let store = state.wedding_store()?;
    let current = store.snapshot();
    if current.wedding.is_some() || current.loading {
        return Ok(current);
    }

    debug!("No wedding loaded, fetching {}", state.config.wedding_id);
    store.fetch_wedding(&state.config.wedding_id).await;
    Ok(store.snapshot())
}

pub(crate) fn render_page<T>(
    state: &AppState<T>,
    snapshot: &WeddingState,
    cover: CoverState,
    rsvp: &RsvpWorkflow,
    banner: Option<&str>,
) -> Result<Html<String>> {
    let view = PageView::from_state(snapshot, cover, rsvp, banner);
    Ok(Html(state.renderer.render(&view)?))
}

// GET /
pub async fn get_invitation<T>(
    State(state): State<AppState<T>>,
    jar: CookieJar,
) -> Result<Html<String>>
where
    T: ApiTransport + 'static,
{
    let snapshot = ensure_wedding(&state).await?;
    let gate = CoverGate::init(state.config.remember_cover, &CookieStorage::new(jar));

    render_page(&state, &snapshot, gate.state(), &RsvpWorkflow::default(), None)
}

// POST /open
pub async fn open_invitation<T>(
    State(state): State<AppState<T>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)>
where
    T: ApiTransport + 'static,
{
    let snapshot = ensure_wedding(&state).await?;

    let mut storage = CookieStorage::new(jar);
    let mut gate = CoverGate::init(state.config.remember_cover, &storage);
    let effects = gate.dismiss();

    let wedding_id = snapshot
        .wedding
        .as_ref()
        .map_or(state.config.wedding_id.as_str(), |w| w.id.as_str());
    apply_effects(&effects, &mut storage, &state.on_open, wedding_id);
    info!("Cover dismissed for {} ({} effects)", wedding_id, effects.len());

    let page = render_page(&state, &snapshot, gate.state(), &RsvpWorkflow::default(), None)?;
    Ok((storage.into_jar(), page))
}
