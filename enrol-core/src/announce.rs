//! Collaborators the store talks to: a status-message channel and a yes/no
//! gate for destructive actions.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const DEFAULT_CLEAR_AFTER: Duration = Duration::from_millis(1000);

/// Receives short human-readable status messages.
pub trait Announcer {
    fn announce(&mut self, message: &str);
}

/// Asked before a record is removed. `false` aborts with no state change.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Announcer for Silent {
    fn announce(&mut self, _message: &str) {}
}

/// Latest status message, readable until the clear delay has passed.
///
/// Clones share the same slot, so one handle can be given to the store while
/// the view keeps another. Expiry is checked on read.
#[derive(Debug, Clone)]
pub struct LiveRegion {
    slot: Rc<RefCell<Option<(String, Instant)>>>,
    clear_after: Duration,
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAR_AFTER)
    }
}

impl LiveRegion {
    pub fn new(clear_after: Duration) -> Self {
        LiveRegion {
            slot: Rc::new(RefCell::new(None)),
            clear_after,
        }
    }

    pub fn current(&self) -> Option<String> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<String> {
        self.slot
            .borrow()
            .as_ref()
            .filter(|(_, posted)| now.saturating_duration_since(*posted) < self.clear_after)
            .map(|(msg, _)| msg.clone())
    }

    /// Most recent message, even once the region has cleared it.
    pub fn last(&self) -> Option<String> {
        self.slot.borrow().as_ref().map(|(msg, _)| msg.clone())
    }

    pub fn post_at(&self, message: &str, now: Instant) {
        *self.slot.borrow_mut() = Some((message.to_string(), now));
    }
}

impl Announcer for LiveRegion {
    fn announce(&mut self, message: &str) {
        self.post_at(message, Instant::now());
    }
}
