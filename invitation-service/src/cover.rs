//! The cover gate: a splash that hides the invitation until the visitor opens it.
//!
//! Transitions are pure. What a dismissal should cause is returned as a list
//! of [`CoverEffect`]s and carried out by [`apply_effects`].

use log::{debug, info};
use std::sync::Arc;

use wedding_shared::models::events::InvitationOpenedEvent;

use crate::storage::{FlagStorage, INVITATION_OPENED_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverState {
    Shown,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverEffect {
    /// Record the dismissal flag in visitor storage
    PersistOpened,
    /// Tell the surrounding page the invitation was opened
    NotifyOpen,
}

/// Hook invoked once per dismissal (music autoplay, analytics, ...)
pub type OnOpen = Arc<dyn Fn(&InvitationOpenedEvent) + Send + Sync>;

/// Default hook: log the event
pub fn log_open() -> OnOpen {
    Arc::new(|event: &InvitationOpenedEvent| {
        info!(
            "Invitation opened: wedding_id={}, remembered={}, at={}",
            event.wedding_id, event.remembered, event.timestamp
        );
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverGate {
    state: CoverState,
    remember: bool,
}

impl CoverGate {
    /// Starts `Hidden` only when remembering is on and the flag was recorded before.
    pub fn init<S>(remember: bool, storage: &S) -> Self
    where
        S: FlagStorage + ?Sized,
    {
        let opened_before = remember
            && storage
                .get_item(INVITATION_OPENED_KEY)
                .is_some_and(|value| value == "true");

        let state = if opened_before {
            CoverState::Hidden
        } else {
            CoverState::Shown
        };
        debug!("Cover gate initialized: remember={}, state={:?}", remember, state);

        Self { state, remember }
    }

    pub fn state(&self) -> CoverState {
        self.state
    }

    /// `Shown -> Hidden`. There is no way back; dismissing a hidden gate does nothing.
    pub fn dismiss(&mut self) -> Vec<CoverEffect> {
        if self.state == CoverState::Hidden {
            return Vec::new();
        }

        self.state = CoverState::Hidden;
        let mut effects = Vec::with_capacity(2);
        if self.remember {
            effects.push(CoverEffect::PersistOpened);
        }
        effects.push(CoverEffect::NotifyOpen);
        effects
    }
}

pub fn apply_effects<S>(
    effects: &[CoverEffect],
    storage: &mut S,
    on_open: &OnOpen,
    wedding_id: &str,
) where
    S: FlagStorage + ?Sized,
{
    let remembered = effects.contains(&CoverEffect::PersistOpened);
    for effect in effects {
        match effect {
            CoverEffect::PersistOpened => storage.set_item(INVITATION_OPENED_KEY, "true"),
            CoverEffect::NotifyOpen => on_open(&InvitationOpenedEvent::new(wedding_id, remembered)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_hook() -> (OnOpen, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let hook: OnOpen = Arc::new(move |_event: &InvitationOpenedEvent| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (hook, count)
    }

    #[test]
    fn test_starts_shown_without_flag() {
        let storage = MemoryStorage::default();
        assert_eq!(CoverGate::init(true, &storage).state(), CoverState::Shown);
        assert_eq!(CoverGate::init(false, &storage).state(), CoverState::Shown);
    }

    #[test]
    fn test_flag_ignored_when_not_remembering() {
        let mut storage = MemoryStorage::default();
        storage.set_item(INVITATION_OPENED_KEY, "true");

        assert_eq!(CoverGate::init(false, &storage).state(), CoverState::Shown);
        assert_eq!(CoverGate::init(true, &storage).state(), CoverState::Hidden);
    }

    #[test]
    fn test_dismiss_with_remember_persists_for_next_load() {
        let mut storage = MemoryStorage::default();
        let (hook, count) = counting_hook();

        let mut gate = CoverGate::init(true, &storage);
        let effects = gate.dismiss();
        assert_eq!(effects, vec![CoverEffect::PersistOpened, CoverEffect::NotifyOpen]);
        assert_eq!(gate.state(), CoverState::Hidden);

        apply_effects(&effects, &mut storage, &hook, "wedding_001");
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(storage.get_item(INVITATION_OPENED_KEY).as_deref(), Some("true"));

        // Simulated reload
        assert_eq!(CoverGate::init(true, &storage).state(), CoverState::Hidden);
    }

    #[test]
    fn test_dismiss_without_remember_only_notifies() {
        let mut storage = MemoryStorage::default();
        let (hook, count) = counting_hook();

        let mut gate = CoverGate::init(false, &storage);
        let effects = gate.dismiss();
        assert_eq!(effects, vec![CoverEffect::NotifyOpen]);

        apply_effects(&effects, &mut storage, &hook, "wedding_001");
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(storage.get_item(INVITATION_OPENED_KEY), None);
        assert_eq!(CoverGate::init(false, &storage).state(), CoverState::Shown);
    }

    #[test]
    fn test_second_dismiss_is_a_no_op() {
        let storage = MemoryStorage::default();
        let mut gate = CoverGate::init(true, &storage);

        assert!(!gate.dismiss().is_empty());
        assert!(gate.dismiss().is_empty());
        assert_eq!(gate.state(), CoverState::Hidden);
    }
}
