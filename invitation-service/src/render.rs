use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use tera::{Context, Tera};

use wedding_shared::models::{BankAccount, WeddingRecord};

use crate::countdown::{compute_countdown, Countdown};
use crate::cover::CoverState;
use crate::rsvp::{RsvpDraft, RsvpPhase, RsvpWorkflow};
use crate::store::WeddingState;

const TEMPLATES: [(&str, &str); 5] = [
    ("loading.html", include_str!("../templates/loading.html")),
    ("error.html", include_str!("../templates/error.html")),
    ("cover.html", include_str!("../templates/cover.html")),
    ("rsvp.html", include_str!("../templates/rsvp.html")),
    ("invitation.html", include_str!("../templates/invitation.html")),
];

pub const SUBMITTED_BANNER: &str = "¡Confirmación guardada correctamente!";

/// Which of the three screens a wedding state maps to
pub enum PageView<'a> {
    Loading,
    Failed,
    Ready(ReadyPage<'a>),
}

pub struct ReadyPage<'a> {
    pub wedding: &'a WeddingRecord,
    pub cover: CoverState,
    pub rsvp: &'a RsvpWorkflow,
    pub banner: Option<&'a str>,
    pub now: DateTime<Utc>,
}

impl<'a> PageView<'a> {
    pub fn from_state(
        state: &'a WeddingState,
        cover: CoverState,
        rsvp: &'a RsvpWorkflow,
        banner: Option<&'a str>,
    ) -> Self {
        if state.loading {
            return PageView::Loading;
        }
        match (&state.wedding, &state.error) {
            (Some(wedding), None) => PageView::Ready(ReadyPage {
                wedding,
                cover,
                rsvp,
                banner,
                now: Utc::now(),
            }),
            _ => PageView::Failed,
        }
    }
}

#[derive(Serialize)]
struct CountdownDigits {
    days: String,
    hours: String,
    minutes: String,
    seconds: String,
}

impl From<Countdown> for CountdownDigits {
    fn from(c: Countdown) -> Self {
        Self {
            days: format!("{:02}", c.days),
            hours: format!("{:02}", c.hours),
            minutes: format!("{:02}", c.minutes),
            seconds: format!("{:02}", c.seconds),
        }
    }
}

#[derive(Serialize)]
struct LocationCard<'a> {
    name: &'a str,
    time: String,
    venue: &'a str,
    map_url: &'a str,
    icon: &'a str,
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct RsvpSection<'a> {
    submitted: bool,
    submitting: bool,
    error: Option<&'a str>,
    draft: Option<&'a RsvpDraft>,
    guest_name: Option<&'a str>,
    confirmation_id: Option<&'a str>,
}

/// "HH:MM" in the event's own offset
fn event_time(date_time: &str) -> String {
    match DateTime::parse_from_rfc3339(date_time) {
        Ok(at) => at.format("%H:%M").to_string(),
        Err(_) => date_time.to_string(),
    }
}

fn rsvp_section(workflow: &RsvpWorkflow) -> RsvpSection<'_> {
    match workflow.phase() {
        RsvpPhase::Editing { draft, error } => RsvpSection {
            submitted: false,
            submitting: false,
            error: error.as_deref(),
            draft: Some(draft),
            guest_name: None,
            confirmation_id: None,
        },
        RsvpPhase::Submitting { draft } => RsvpSection {
            submitted: false,
            submitting: true,
            error: None,
            draft: Some(draft),
            guest_name: None,
            confirmation_id: None,
        },
        RsvpPhase::Submitted { confirmation } => RsvpSection {
            submitted: true,
            submitting: false,
            error: None,
            draft: None,
            guest_name: Some(&confirmation.guest_name),
            confirmation_id: Some(&confirmation.id),
        },
    }
}

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    pub fn render(&self, view: &PageView<'_>) -> tera::Result<String> {
        match view {
            PageView::Loading => self.tera.render("loading.html", &Context::new()),
            PageView::Failed => self.tera.render("error.html", &Context::new()),
            PageView::Ready(page) => self.render_ready(page),
        }
    }

    fn render_ready(&self, page: &ReadyPage<'_>) -> tera::Result<String> {
        let wedding = page.wedding;

        let countdown = compute_countdown(&wedding.date, page.now).unwrap_or_else(|e| {
            warn!("Wedding {} has an unreadable date '{}': {}", wedding.id, wedding.date, e);
            Countdown::default()
        });

        let events: Vec<LocationCard<'_>> = wedding
            .events
            .iter()
            .map(|event| LocationCard {
                name: &event.name,
                time: event_time(&event.date_time),
                venue: &event.location,
                map_url: &event.map_url,
                icon: &event.icon,
                description: event.description.as_deref(),
            })
            .collect();
        let bank_accounts: &[BankAccount] = &wedding.bank_accounts;

        let mut context = Context::new();
        context.insert("wedding_id", &wedding.id);
        context.insert("title", &wedding.couple_title());
        context.insert("groom", &wedding.groom_name);
        context.insert("bride", &wedding.bride_name);
        context.insert("message", &wedding.message);
        context.insert("dresscode", &wedding.dresscode);
        context.insert("cover_image", &wedding.cover_image);
        context.insert("background_image", &wedding.background_image);
        context.insert("background_image_mobile", &wedding.background_image_mobile);
        context.insert("show_cover", &(page.cover == CoverState::Shown));
        context.insert("countdown", &CountdownDigits::from(countdown));
        context.insert("events", &events);
        context.insert("bank_accounts", bank_accounts);
        context.insert("rsvp", &rsvp_section(page.rsvp));
        context.insert("banner", &page.banner);

        self.tera.render("invitation.html", &context)
    }
}
