use log::{info, warn};
use std::sync::RwLock;

use wedding_shared::api::ApiTransport;
use wedding_shared::models::GuestConfirmation;
use wedding_shared::services::GuestService;

use super::{read, write, InFlight, Tracked};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestState {
    pub confirmations: Vec<GuestConfirmation>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Tracked for GuestState {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish(&mut self) {
        self.loading = false;
    }
}

/// The confirmations submitted during this session. Append-only.
pub struct GuestStore<T> {
    service: GuestService<T>,
    state: RwLock<GuestState>,
}

impl<T> GuestStore<T>
where
    T: ApiTransport,
{
    pub fn new(service: GuestService<T>) -> Self {
        Self {
            service,
            state: RwLock::new(GuestState::default()),
        }
    }

    pub fn snapshot(&self) -> GuestState {
        read(&self.state)
    }

    pub fn confirmations(&self) -> Vec<GuestConfirmation> {
        self.snapshot().confirmations
    }

    /// Persists the confirmation and appends what was stored.
    ///
    /// Never fails: when the API is down the service hands back a local copy
    /// and that copy is appended instead.
    pub async fn add_confirmation(&self, candidate: GuestConfirmation) -> GuestConfirmation {
        let _in_flight = InFlight::start(&self.state);

        let saved = match self.service.save_confirmation(&candidate).await {
            Ok(saved) => saved,
            Err(recovered) => {
                warn!(
                    "Keeping confirmation {} locally: {}",
                    recovered.value.id, recovered.cause
                );
                recovered.value
            }
        };

        let mut state = write(&self.state);
        state.confirmations.push(saved.clone());
        info!(
            "Confirmation {} added ({} this session)",
            saved.id,
            state.confirmations.len()
        );
        saved
    }

    pub fn get_confirmation(&self, id: &str) -> Option<GuestConfirmation> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .confirmations
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Local lookup first, then the API. Remote hits are not appended.
    pub async fn find_confirmation(&self, id: &str) -> Option<GuestConfirmation> {
        if let Some(local) = self.get_confirmation(id) {
            return Some(local);
        }
        match self.service.get_confirmation(id).await {
            Ok(remote) => Some(remote),
            Err(e) => {
                warn!("Confirmation {} not available from API: {}", id, e);
                None
            }
        }
    }

    /// All confirmations for a wedding according to the API, or the ones
    /// submitted here when the API can't be reached.
    pub async fn wedding_confirmations(&self, wedding_id: &str) -> Vec<GuestConfirmation> {
        match self.service.list_confirmations(wedding_id).await {
            Ok(remote) => remote,
            Err(e) => {
                warn!(
                    "Listing confirmations for {} from API failed, using session copies: {}",
                    wedding_id, e
                );
                self.confirmations()
                    .into_iter()
                    .filter(|c| c.wedding_id == wedding_id)
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wedding_shared::test_utils::mock_transport::MockTransport;
    use wedding_shared::test_utils::test_logging::init_test_logging;

    fn candidate(id: &str, name: &str) -> GuestConfirmation {
        GuestConfirmation {
            id: id.to_string(),
            wedding_id: "wedding_001".to_string(),
            guest_name: name.to_string(),
            email: "guest@x.com".to_string(),
            phone: String::new(),
            is_attending: true,
            number_of_guests: 1,
            dietary_restrictions: None,
            recommended_song: None,
            selected_gift: None,
            submitted_at: "2025-10-01T12:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_appends_exactly_one_on_failure() {
        init_test_logging();
        let store = GuestStore::new(GuestService::new(Arc::new(MockTransport::new())));

        for (i, name) in ["Ana", "Beto", "Carla"].iter().enumerate() {
            let before = store.confirmations().len();
            let saved = store
                .add_confirmation(candidate(&format!("wedding_001-{}", i), name))
                .await;
            assert_eq!(store.confirmations().len(), before + 1);
            assert_eq!(store.confirmations().last(), Some(&saved));
        }

        let state = store.snapshot();
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_add_appends_server_record_on_success() {
        init_test_logging();
        let transport = Arc::new(MockTransport::new());
        let mut stored = serde_json::to_value(candidate("wedding_001-1", "Ana")).unwrap();
        stored["id"] = serde_json::json!("srv-77");
        transport.respond("POST", "/api/confirmations", stored);
        let store = GuestStore::new(GuestService::new(transport));

        let saved = store.add_confirmation(candidate("wedding_001-1", "Ana")).await;

        assert_eq!(saved.id, "srv-77");
        assert_eq!(store.get_confirmation("srv-77"), Some(saved));
        assert_eq!(store.get_confirmation("wedding_001-1"), None);
    }

    #[tokio::test]
    async fn test_get_confirmation_by_id() {
        init_test_logging();
        let store = GuestStore::new(GuestService::new(Arc::new(MockTransport::new())));
        let first = store.add_confirmation(candidate("wedding_001-1", "Ana")).await;
        store.add_confirmation(candidate("wedding_001-2", "Beto")).await;

        assert_eq!(store.get_confirmation("wedding_001-1"), Some(first));
        assert_eq!(store.get_confirmation("never-added"), None);
    }

    #[tokio::test]
    async fn test_find_confirmation_consults_api_without_appending() {
        init_test_logging();
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            "GET",
            "/api/confirmations/remote-1",
            serde_json::to_value(candidate("remote-1", "Dario")).unwrap(),
        );
        let store = GuestStore::new(GuestService::new(transport));

        let found = store.find_confirmation("remote-1").await.unwrap();
        assert_eq!(found.guest_name, "Dario");
        assert!(store.confirmations().is_empty());
        assert!(store.find_confirmation("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_wedding_confirmations_fall_back_to_session() {
        init_test_logging();
        let store = GuestStore::new(GuestService::new(Arc::new(MockTransport::new())));
        store.add_confirmation(candidate("wedding_001-1", "Ana")).await;
        let mut other = candidate("wedding_002-1", "Eva");
        other.wedding_id = "wedding_002".to_string();
        store.add_confirmation(other).await;

        let listed = store.wedding_confirmations("wedding_001").await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].guest_name, "Ana");
    }
}
