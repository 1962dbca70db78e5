pub mod confirmation_handlers;
pub mod countdown_handlers;
pub mod page_handlers;
pub mod rsvp_handlers;
