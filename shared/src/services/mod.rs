//! Remote operations on top of [`ApiTransport`](crate::api::ApiTransport).

pub mod guest;
pub mod invitation;

pub use guest::GuestService;
pub use invitation::{InvitationService, MockSource};
