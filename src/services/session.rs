// src/services/session.rs
//
// Session context
//
// Holds the identity handed over by the identity provider and lets views
// observe changes. Cloned into every view; all clones share one channel.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{validate_user, CurrentUser};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, UserSignedIn, UserSignedOut};

#[derive(Clone)]
pub struct SessionContext {
    sender: Arc<watch::Sender<Option<CurrentUser>>>,
    event_bus: Arc<EventBus>,
}

impl SessionContext {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
            event_bus,
        }
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.sender.borrow().clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.sender.borrow().as_ref().map(|user| user.uid.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Replace the current identity
    pub fn sign_in(&self, user: CurrentUser) -> AppResult<()> {
        validate_user(&user).map_err(AppError::Domain)?;

        let uid = user.uid.clone();
        let previous = self.sender.send_replace(Some(user));

        if let Some(previous) = previous.filter(|p| p.uid != uid) {
            self.event_bus.emit(UserSignedOut::new(previous.uid));
        }

        log::info!("User signed in: {}", uid);
        self.event_bus.emit(UserSignedIn::new(uid));
        Ok(())
    }

    pub fn sign_out(&self) {
        if let Some(previous) = self.sender.send_replace(None) {
            log::info!("User signed out: {}", previous.uid);
            self.event_bus.emit(UserSignedOut::new(previous.uid));
        }
    }

    /// Receiver that wakes on every sign-in and sign-out
    pub fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.sender.subscribe()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("user_id", &self.user_id())
            .finish()
    }
}
