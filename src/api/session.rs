//! In-process identity provider.

use std::sync::RwLock;

use super::SessionProvider;
use crate::models::session::Identity;

/// Holds the current identity; sign-in screens update it, drops read it.
#[derive(Debug, Default)]
pub struct SharedSession {
    current: RwLock<Option<Identity>>,
}

impl SharedSession {
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            current: RwLock::new(identity),
        }
    }

    pub fn sign_in(&self, identity: Identity) {
        log::info!("Session signed in: uid={}", identity.uid);
        match self.current.write() {
            Ok(mut guard) => *guard = Some(identity),
            Err(poisoned) => *poisoned.into_inner() = Some(identity),
        }
    }

    pub fn sign_out(&self) {
        log::info!("Session signed out");
        match self.current.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

impl SessionProvider for SharedSession {
    fn current_identity(&self) -> Option<Identity> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_signed_out_by_default() {
        let session = SharedSession::default();
        assert!(session.current_identity().is_none());
    }

    #[test]
    fn sign_in_then_out() {
        let session = SharedSession::new(None);
        session.sign_in(Identity::new("u1"));
        assert_eq!(session.current_identity(), Some(Identity::new("u1")));
        session.sign_out();
        assert!(session.current_identity().is_none());
    }
}
