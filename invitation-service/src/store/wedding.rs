use log::{error, info, warn};
use std::sync::RwLock;

use wedding_shared::api::ApiTransport;
use wedding_shared::error::MockDataError;
use wedding_shared::models::WeddingRecord;
use wedding_shared::services::InvitationService;

use super::{read, write, InFlight, Tracked};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeddingState {
    pub wedding: Option<WeddingRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Tracked for WeddingState {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish(&mut self) {
        self.loading = false;
    }
}

/// Holds the current wedding. Fetches are not deduplicated; the last one to
/// resolve wins.
pub struct WeddingStore<T> {
    service: InvitationService<T>,
    state: RwLock<WeddingState>,
}

impl<T> WeddingStore<T>
where
    T: ApiTransport,
{
    pub fn new(service: InvitationService<T>) -> Self {
        Self {
            service,
            state: RwLock::new(WeddingState::default()),
        }
    }

    pub fn snapshot(&self) -> WeddingState {
        read(&self.state)
    }

    /// Loads the wedding, substituting the mock wedding when the API fails.
    ///
    /// Only a failure to produce the mock ends up in `error`.
    pub async fn fetch_wedding(&self, id: &str) {
        let _in_flight = InFlight::start(&self.state);

        let loaded = self.load(id).await;

        let mut state = write(&self.state);
        match loaded {
            Ok(wedding) => state.wedding = Some(wedding),
            Err(e) => {
                error!("Failed to load wedding {}: {}", id, e);
                state.error = Some(e.to_string());
            }
        }
    }

    async fn load(&self, id: &str) -> Result<WeddingRecord, MockDataError> {
        match self.service.get_wedding(id).await {
            Ok(wedding) => {
                info!("Loaded wedding {} from API", wedding.id);
                Ok(wedding)
            }
            Err(e) => {
                warn!(
                    "Failed to fetch wedding {} from API, using mock data: {}",
                    id, e
                );
                self.service.mock_wedding()
            }
        }
    }
}
