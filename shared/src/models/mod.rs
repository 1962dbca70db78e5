use chrono::Utc;
use serde::{Deserialize, Serialize};

pub mod events;

/// A scheduled part of the wedding day (ceremony, reception, ...).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    pub date_time: String,
    pub location: String,
    pub map_url: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub bank: String,
    pub account_number: String,
    pub cci: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yape: Option<String>,
}

/// The wedding an invitation page is built from. Replaced wholesale, never patched.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeddingRecord {
    pub id: String,
    pub groom_name: String,
    pub bride_name: String,
    pub date: String,
    pub cover_image: String,
    pub background_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image_mobile: Option<String>,
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub bank_accounts: Vec<BankAccount>,
    pub dresscode: String,
    pub invited_guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WeddingRecord {
    /// "Groom & Bride", as shown on the cover and in the footer.
    pub fn couple_title(&self) -> String {
        format!("{} & {}", self.groom_name, self.bride_name)
    }
}

fn default_guests() -> u32 {
    1
}

/// A guest's RSVP. An empty `id` means "not assigned yet".
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuestConfirmation {
    #[serde(default)]
    pub id: String,
    pub wedding_id: String,
    pub guest_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub is_attending: bool,
    #[serde(default = "default_guests")]
    pub number_of_guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_song: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_gift: Option<String>,
    pub submitted_at: String,
}

/// Current time as an RFC 3339 string
pub fn now_str() -> String {
    Utc::now().to_rfc3339()
}

/// Current time as unix milliseconds, the client-side id stamp
pub fn now_millis() -> String {
    Utc::now().timestamp_millis().to_string()
}
