use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use wedding_shared::models::GuestConfirmation;

fn default_attending() -> String {
    "true".to_string()
}

fn default_guest_count() -> String {
    "1".to_string()
}

/// The RSVP form fields as typed by the guest
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RsvpDraft {
    #[serde(default)]
    pub guest_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_attending")]
    pub is_attending: String,
    #[serde(default = "default_guest_count")]
    pub number_of_guests: String,
    #[serde(default)]
    pub dietary_restrictions: String,
    #[serde(default)]
    pub recommended_song: String,
    #[serde(default)]
    pub selected_gift: String,
}

impl Default for RsvpDraft {
    fn default() -> Self {
        Self {
            guest_name: String::new(),
            email: String::new(),
            phone: String::new(),
            is_attending: default_attending(),
            number_of_guests: default_guest_count(),
            dietary_restrictions: String::new(),
            recommended_song: String::new(),
            selected_gift: String::new(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Por favor ingresa tu nombre")]
    MissingGuestName,

    #[error("Por favor ingresa tu email")]
    MissingEmail,

    #[error("El número de personas debe ser un entero positivo")]
    InvalidGuestCount(String),

    #[error("Por favor indica si asistirás")]
    InvalidAttendance(String),
}

/// The typed values behind a draft that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedDraft {
    pub is_attending: bool,
    pub number_of_guests: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsvpError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("A confirmation is only accepted while the form is being edited")]
    NotEditing,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl RsvpDraft {
    /// Presence and type checks only; formats are left to the browser inputs.
    pub fn validate(&self) -> Result<CheckedDraft, ValidationError> {
        if self.guest_name.trim().is_empty() {
            return Err(ValidationError::MissingGuestName);
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }

        let is_attending = match self.is_attending.trim() {
            "" | "true" => true,
            "false" => false,
            other => return Err(ValidationError::InvalidAttendance(other.to_string())),
        };

        let count = self.number_of_guests.trim();
        let number_of_guests = if count.is_empty() {
            1
        } else {
            match count.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ValidationError::InvalidGuestCount(count.to_string())),
            }
        };

        Ok(CheckedDraft {
            is_attending,
            number_of_guests,
        })
    }

    /// The confirmation to submit, identified as `{wedding_id}-{unix millis}`
    pub fn to_confirmation(
        &self,
        wedding_id: &str,
        now: DateTime<Utc>,
    ) -> Result<GuestConfirmation, ValidationError> {
        let checked = self.validate()?;

        Ok(GuestConfirmation {
            id: format!("{}-{}", wedding_id, now.timestamp_millis()),
            wedding_id: wedding_id.to_string(),
            guest_name: self.guest_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            is_attending: checked.is_attending,
            number_of_guests: checked.number_of_guests,
            dietary_restrictions: non_blank(&self.dietary_restrictions),
            recommended_song: non_blank(&self.recommended_song),
            selected_gift: non_blank(&self.selected_gift),
            submitted_at: now.to_rfc3339(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RsvpPhase {
    Editing {
        draft: RsvpDraft,
        error: Option<String>,
    },
    Submitting {
        draft: RsvpDraft,
    },
    Submitted {
        confirmation: GuestConfirmation,
    },
}

impl Default for RsvpPhase {
    fn default() -> Self {
        RsvpPhase::Editing {
            draft: RsvpDraft::default(),
            error: None,
        }
    }
}

/// Editing -> Submitting -> Submitted; `modify` starts over from an empty form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RsvpWorkflow {
    phase: RsvpPhase,
}

impl RsvpWorkflow {
    pub fn with_draft(draft: RsvpDraft) -> Self {
        Self {
            phase: RsvpPhase::Editing { draft, error: None },
        }
    }

    pub fn phase(&self) -> &RsvpPhase {
        &self.phase
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, RsvpPhase::Submitted { .. })
    }

    /// Validates the draft and moves to `Submitting`. A rejected draft stays
    /// in `Editing` with the message attached.
    pub fn submit(
        &mut self,
        wedding_id: &str,
        now: DateTime<Utc>,
    ) -> Result<GuestConfirmation, RsvpError> {
        let RsvpPhase::Editing { draft, .. } = &self.phase else {
            return Err(RsvpError::NotEditing);
        };

        match draft.to_confirmation(wedding_id, now) {
            Ok(candidate) => {
                debug!("RSVP submitting as {}", candidate.id);
                self.phase = RsvpPhase::Submitting {
                    draft: draft.clone(),
                };
                Ok(candidate)
            }
            Err(invalid) => {
                let draft = draft.clone();
                self.phase = RsvpPhase::Editing {
                    draft,
                    error: Some(invalid.to_string()),
                };
                Err(invalid.into())
            }
        }
    }

    /// The save resolved; the form gives way to the thank-you view.
    pub fn complete(&mut self, confirmation: GuestConfirmation) {
        self.phase = RsvpPhase::Submitted { confirmation };
    }

    /// "Modify response": back to an empty form
    pub fn modify(&mut self) {
        self.phase = RsvpPhase::default();
    }
}
