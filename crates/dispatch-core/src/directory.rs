//! User directory trait for emergency-contact lookup.

use async_trait::async_trait;
use thiserror::Error;

use crate::responder::EmergencyContact;

/// Errors from the external user directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No user with the given id.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The directory could not be reached.
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of a reporting user's registered emergency contacts.
///
/// Registration, authentication, and profile management live in the external
/// user service; this engine only reads contacts at trigger time.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// The emergency contacts registered for `user_id`, primary first.
    async fn emergency_contacts(
        &self,
        user_id: &str,
    ) -> Result<Vec<EmergencyContact>, DirectoryError>;
}
