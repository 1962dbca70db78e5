use log::info;
use std::sync::Arc;

use wedding_shared::api::ApiTransport;
use wedding_shared::error::StateError;
use wedding_shared::services::{GuestService, InvitationService};

use crate::config::Config;
use crate::cover::{log_open, OnOpen};
use crate::render::Renderer;
use crate::store::{GuestStore, WeddingStore};

/// Everything a handler can reach. Stores are optional so that a router
/// assembled without one fails loudly instead of silently.
pub struct AppState<T> {
    pub config: Arc<Config>,
    pub renderer: Arc<Renderer>,
    pub on_open: OnOpen,
    wedding: Option<Arc<WeddingStore<T>>>,
    guests: Option<Arc<GuestStore<T>>>,
}

// Derive would require T: Clone
impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            renderer: self.renderer.clone(),
            on_open: self.on_open.clone(),
            wedding: self.wedding.clone(),
            guests: self.guests.clone(),
        }
    }
}

impl<T> AppState<T>
where
    T: ApiTransport + 'static,
{
    pub fn builder(config: Config) -> AppStateBuilder<T> {
        AppStateBuilder {
            config,
            wedding: None,
            guests: None,
            on_open: None,
        }
    }

    /// Both stores over one transport, with the default open hook
    pub fn from_transport(config: Config, transport: Arc<T>) -> tera::Result<Self> {
        let invitations =
            InvitationService::with_mock_source(transport.clone(), config.mock_source.clone());
        let guests = GuestService::new(transport);

        Self::builder(config)
            .with_wedding_store(WeddingStore::new(invitations))
            .with_guest_store(GuestStore::new(guests))
            .with_on_open(log_open())
            .build()
    }

    pub fn wedding_store(&self) -> Result<&WeddingStore<T>, StateError> {
        self.wedding
            .as_deref()
            .ok_or(StateError::MissingProvider {
                consumer: "wedding store",
                provider: "a wedding provider",
            })
    }

    pub fn guest_store(&self) -> Result<&GuestStore<T>, StateError> {
        self.guests.as_deref().ok_or(StateError::MissingProvider {
            consumer: "guest store",
            provider: "a guest provider",
        })
    }
}

pub struct AppStateBuilder<T> {
    config: Config,
    wedding: Option<WeddingStore<T>>,
    guests: Option<GuestStore<T>>,
    on_open: Option<OnOpen>,
}

impl<T> AppStateBuilder<T>
where
    T: ApiTransport + 'static,
{
    pub fn with_wedding_store(mut self, store: WeddingStore<T>) -> Self {
        self.wedding = Some(store);
        self
    }

    pub fn with_guest_store(mut self, store: GuestStore<T>) -> Self {
        self.guests = Some(store);
        self
    }

    pub fn with_on_open(mut self, on_open: OnOpen) -> Self {
        self.on_open = Some(on_open);
        self
    }

    /// Fails only if the page templates don't compile
    pub fn build(self) -> tera::Result<AppState<T>> {
        let renderer = Renderer::new()?;
        info!(
            "App state built: wedding store={}, guest store={}",
            self.wedding.is_some(),
            self.guests.is_some()
        );

        Ok(AppState {
            config: Arc::new(self.config),
            renderer: Arc::new(renderer),
            on_open: self.on_open.unwrap_or_else(log_open),
            wedding: self.wedding.map(Arc::new),
            guests: self.guests.map(Arc::new),
        })
    }
}
