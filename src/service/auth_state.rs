use tokio::sync::watch;
use tracing::info;

use crate::model::AuthUser;

/// Source of sign-in state handed to the quote form.
///
/// A subscriber receives the current user (or `None`) immediately and is
/// woken on every later change. Dropping the receiver unsubscribes.
pub trait AuthStateProvider: Send + Sync {
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;
}

/// Auth state held in a `watch` channel and changed through
/// [`sign_in`](Self::sign_in) / [`sign_out`](Self::sign_out).
#[derive(Debug)]
pub struct WatchAuthProvider {
    tx: watch::Sender<Option<AuthUser>>,
}

impl WatchAuthProvider {
    pub fn new(initial: Option<AuthUser>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        WatchAuthProvider { tx }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn sign_in(&self, user: AuthUser) {
        info!(uid = %user.uid, "User signed in");
        self.tx.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        info!("User signed out");
        self.tx.send_replace(None);
    }

    pub fn current(&self) -> Option<AuthUser> {
        self.tx.borrow().clone()
    }
}

impl Default for WatchAuthProvider {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl AuthStateProvider for WatchAuthProvider {
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.tx.subscribe()
    }
}
