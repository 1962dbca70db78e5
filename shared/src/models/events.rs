use serde::{Deserialize, Serialize};

pub const INVITATION_OPENED: &str = "invitation_opened";

/// Raised when a visitor dismisses the cover gate
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct InvitationOpenedEvent {
    pub event_type: String,
    pub wedding_id: String,
    #[serde(default)]
    pub remembered: bool,
    pub timestamp: String,
}

impl InvitationOpenedEvent {
    pub fn new(wedding_id: &str, remembered: bool) -> Self {
        Self {
            event_type: INVITATION_OPENED.to_string(),
            wedding_id: wedding_id.to_string(),
            remembered,
            timestamp: super::now_str(),
        }
    }
}
