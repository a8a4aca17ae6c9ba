//! Session service.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::info;

use crate::identity::{Identity, User};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("email cannot be empty")]
    EmptyEmail,
}

/// Current visitor identity, shared by every store of one browsing session.
///
/// Authentication itself happens elsewhere; the session only records the
/// outcome and tells subscribers when it changes.
#[derive(Debug, Clone)]
pub struct Session {
    admin_emails: Arc<[String]>,
    identity: Arc<watch::Sender<Identity>>,
}

impl Session {
    /// Create a guest session. Users whose e-mail appears in `admin_emails`
    /// are flagged as administrators when they sign in.
    pub fn new<I, S>(admin_emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let admin_emails = admin_emails
            .into_iter()
            .map(|email| email.as_ref().trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();

        Self {
            admin_emails,
            identity: Arc::new(watch::Sender::new(Identity::Guest)),
        }
    }

    /// Record a successful sign-in. The e-mail is trimmed and lowercased, so
    /// it keys the same saved cart however it was typed.
    ///
    /// # Errors
    ///
    /// Returns an error if `email` is blank.
    pub fn sign_in(&self, email: &str) -> Result<Identity, SessionError> {
        let email = email.trim().to_lowercase();

        if email.is_empty() {
            return Err(SessionError::EmptyEmail);
        }

        let is_admin = self.is_admin_email(&email);

        info!(email = email.as_str(), admin = is_admin, "signed in");

        let identity = Identity::Authenticated(User { email, is_admin });

        self.replace(identity.clone());

        Ok(identity)
    }

    /// Return to a guest session.
    pub fn sign_out(&self) {
        if let Some(email) = self.current().email() {
            info!(email, "signed out");
        }

        self.replace(Identity::Guest);
    }

    /// The identity right now.
    pub fn current(&self) -> Identity {
        self.identity.borrow().clone()
    }

    /// Receive every identity change from now on.
    pub fn subscribe(&self) -> watch::Receiver<Identity> {
        self.identity.subscribe()
    }

    fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|admin| admin == email)
    }

    fn replace(&self, identity: Identity) {
        self.identity.send_if_modified(|current| {
            if *current == identity {
                return false;
            }

            *current = identity;

            true
        });
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new::<[&str; 0], &str>([])
    }
}
