use log::{info, warn};
use std::sync::Arc;

use crate::api::ApiTransport;
use crate::error::{Recovered, TransportResult};
use crate::models::{now_millis, now_str, GuestConfirmation};

pub struct GuestService<T> {
    transport: Arc<T>,
}

impl<T> GuestService<T>
where
    T: ApiTransport,
{
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// POST /api/confirmations
    ///
    /// When the API can't take the confirmation, a local copy is returned in
    /// the `Err` branch: same fields, `id` defaulted to the current unix millis
    /// when it was empty, and `submitted_at` restamped.
    pub async fn save_confirmation(
        &self,
        confirmation: &GuestConfirmation,
    ) -> Result<GuestConfirmation, Recovered<GuestConfirmation>> {
        let result: TransportResult<GuestConfirmation> =
            self.transport.post("/api/confirmations", confirmation).await;
        match result {
            Ok(saved) => {
                info!(
                    "Saved confirmation id={} for wedding_id={}",
                    saved.id, saved.wedding_id
                );
                Ok(saved)
            }
            Err(cause) => {
                warn!("API not available, using local confirmation: {}", cause);
                let mut local = confirmation.clone();
                if local.id.is_empty() {
                    local.id = now_millis();
                }
                local.submitted_at = now_str();
                Err(Recovered::new(local, cause))
            }
        }
    }

    // GET /api/confirmations/:id
    pub async fn get_confirmation(&self, id: &str) -> TransportResult<GuestConfirmation> {
        self.transport
            .get(&format!("/api/confirmations/{}", id))
            .await
    }

    // GET /api/weddings/:wedding_id/confirmations
    pub async fn list_confirmations(
        &self,
        wedding_id: &str,
    ) -> TransportResult<Vec<GuestConfirmation>> {
        self.transport
            .get(&format!("/api/weddings/{}/confirmations", wedding_id))
            .await
    }
}
