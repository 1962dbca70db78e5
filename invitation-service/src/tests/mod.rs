use axum::Router;
use serde_json::json;
use std::sync::Arc;

use wedding_shared::services::{GuestService, InvitationService, MockSource};
use wedding_shared::test_utils::mock_transport::MockTransport;
use wedding_shared::test_utils::test_logging::init_test_logging;

use crate::config::Config;
use crate::cover::OnOpen;
use crate::routes::create_router_with_state;
use crate::state::AppState;
use crate::store::{GuestStore, WeddingStore};

mod confirmation_handlers_test;

pub(crate) const WEDDING_PATH: &str = "/api/weddings/wedding_001";

pub(crate) fn test_config() -> Config {
    Config::default()
}

/// A wedding the API would return, dated far enough ahead to count down to
pub(crate) fn remote_wedding() -> serde_json::Value {
    json!({
        "id": "wedding_001",
        "groomName": "Luis",
        "brideName": "Maria",
        "date": "2099-06-20T17:30:00-05:00",
        "coverImage": "/cover.png",
        "backgroundImage": "/bg.png",
        "events": [{
            "id": "e1",
            "name": "Ceremonia Civil",
            "dateTime": "2099-06-20T17:30:00-05:00",
            "location": "Municipalidad",
            "mapUrl": "https://maps.example/civil",
            "icon": "💍"
        }],
        "bankAccounts": [],
        "dresscode": "Formal",
        "invitedGuests": 80
    })
}

// Helper to set up the application over a mock API
pub(crate) fn create_test_app(transport: Arc<MockTransport>) -> Router {
    init_test_logging();
    let state = AppState::from_transport(test_config(), transport)
        .expect("Templates failed to compile");
    create_router_with_state(state)
}

pub(crate) fn create_test_app_with(
    transport: Arc<MockTransport>,
    config: Config,
    on_open: OnOpen,
) -> Router {
    init_test_logging();
    let state = AppState::builder(config)
        .with_wedding_store(WeddingStore::new(InvitationService::new(transport.clone())))
        .with_guest_store(GuestStore::new(GuestService::new(transport)))
        .with_on_open(on_open)
        .build()
        .expect("Templates failed to compile");
    create_router_with_state(state)
}

/// The API is down and the fallback fixture is missing
pub(crate) fn create_broken_app() -> Router {
    init_test_logging();
    let config = Config {
        mock_source: MockSource::File("/nonexistent/wedding.json".into()),
        ..test_config()
    };
    let state = AppState::from_transport(config, Arc::new(MockTransport::new()))
        .expect("Templates failed to compile");
    create_router_with_state(state)
}
