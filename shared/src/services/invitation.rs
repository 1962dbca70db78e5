use log::{debug, info};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::ApiTransport;
use crate::error::{MockDataError, TransportResult};
use crate::models::WeddingRecord;

const EMBEDDED_MOCK_WEDDING: &str = include_str!("mock_wedding.json");

/// Where the fallback wedding comes from when the API can't be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MockSource {
    #[default]
    Embedded,
    File(PathBuf),
}

pub struct InvitationService<T> {
    transport: Arc<T>,
    mock_source: MockSource,
}

impl<T> InvitationService<T>
where
    T: ApiTransport,
{
    pub fn new(transport: Arc<T>) -> Self {
        Self::with_mock_source(transport, MockSource::Embedded)
    }

    pub fn with_mock_source(transport: Arc<T>, mock_source: MockSource) -> Self {
        Self {
            transport,
            mock_source,
        }
    }

    // GET /api/weddings/:id
    pub async fn get_wedding(&self, id: &str) -> TransportResult<WeddingRecord> {
        debug!("Fetching wedding {}", id);
        self.transport.get(&format!("/api/weddings/{}", id)).await
    }

    // GET /api/weddings
    pub async fn get_all_weddings(&self) -> TransportResult<Vec<WeddingRecord>> {
        self.transport.get("/api/weddings").await
    }

    /// The static fallback wedding. Its content does not depend on any id.
    pub fn mock_wedding(&self) -> Result<WeddingRecord, MockDataError> {
        match &self.mock_source {
            MockSource::Embedded => Ok(serde_json::from_str(EMBEDDED_MOCK_WEDDING)?),
            MockSource::File(path) => {
                info!("Loading mock wedding fixture from {}", path.display());
                let content = fs::read_to_string(path).map_err(|source| MockDataError::Read {
                    path: path.clone(),
                    source,
                })?;
                Ok(serde_json::from_str(&content)?)
            }
        }
    }
}
