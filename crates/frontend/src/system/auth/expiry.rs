//! Session expiry: the first 401 on an authenticated call clears the stored
//! session and sends the user to the login page. Further 401s from calls that
//! were already in flight are ignored until the next login.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::storage;
use crate::shared::config::config;

pub struct ExpiryLatch {
    tripped: AtomicBool,
}

impl ExpiryLatch {
    pub const fn new() -> Self {
        Self {
            tripped: AtomicBool::new(false),
        }
    }

    /// True only for the first call after construction or `rearm`.
    pub fn trip(&self) -> bool {
        !self.tripped.swap(true, Ordering::SeqCst)
    }

    pub fn rearm(&self) {
        self.tripped.store(false, Ordering::SeqCst);
    }
}

impl Default for ExpiryLatch {
    fn default() -> Self {
        Self::new()
    }
}

static LATCH: ExpiryLatch = ExpiryLatch::new();

thread_local! {
    static ON_EXPIRED: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Installed by the auth provider: resets auth state and navigates to login.
pub fn set_expired_handler(handler: impl Fn() + 'static) {
    ON_EXPIRED.with(|h| *h.borrow_mut() = Some(Rc::new(handler)));
}

/// Re-enable expiry handling after a successful login.
pub fn rearm() {
    LATCH.rearm();
}

pub fn session_expired() {
    if !LATCH.trip() {
        log::debug!("Session expiry already handled, ignoring 401");
        return;
    }
    log::warn!("Session expired or unauthorized, signing out");
    storage::clear_session();

    let handler = ON_EXPIRED.with(|h| h.borrow().clone());
    match handler {
        Some(handler) => handler(),
        None => hard_redirect_to_login(),
    }
}

fn hard_redirect_to_login() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let login = &config().routes.login;
    let location = window.location();
    if location.pathname().ok().as_deref() != Some(login.as_str()) {
        let _ = location.set_href(login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_trips_once() {
        let latch = ExpiryLatch::new();
        assert!(latch.trip());
        assert!(!latch.trip());
        assert!(!latch.trip());
    }

    #[test]
    fn test_latch_rearm_after_login() {
        let latch = ExpiryLatch::new();
        assert!(latch.trip());
        latch.rearm();
        assert!(latch.trip());
        assert!(!latch.trip());
    }
}
