//! Session identity: Who is talking, in which conversation.
//!
//! These are process-wide values owned by the caller and injected into
//! each session, never global state inside the core.

use crate::{Error, Result};
use uuid::Uuid;

/// Longest identifier the server accepts, in characters.
pub const MAX_ID_CHARS: usize = 255;

/// Prefix of user ids derived from a dialog id.
const USER_PREFIX: &str = "user-";

/// Characters of the dialog id kept in a derived user id.
const USER_SUFFIX_CHARS: usize = 8;

/// The `user_id` / `dialog_id` pair sent with every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionIdentity {
    user_id: String,
    dialog_id: String,
}

impl SessionIdentity {
    /// Build an identity from explicit values.
    pub fn new(user_id: impl Into<String>, dialog_id: impl Into<String>) -> Result<Self> {
        let user_id = user_id.into();
        let dialog_id = dialog_id.into();
        validate("user_id", &user_id)?;
        validate("dialog_id", &dialog_id)?;
        Ok(Self { user_id, dialog_id })
    }

    /// Build an identity for a dialog, deriving the user id from it.
    pub fn for_dialog(dialog_id: impl Into<String>) -> Result<Self> {
        let dialog_id = dialog_id.into();
        let user_id = derive_user_id(&dialog_id);
        Self::new(user_id, dialog_id)
    }

    /// A fresh random dialog with its derived user id.
    pub fn generate() -> Self {
        let dialog_id = Uuid::new_v4().to_string();
        Self {
            user_id: derive_user_id(&dialog_id),
            dialog_id,
        }
    }

    /// The user id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The dialog id.
    pub fn dialog_id(&self) -> &str {
        &self.dialog_id
    }
}

fn derive_user_id(dialog_id: &str) -> String {
    let suffix: String = dialog_id.chars().take(USER_SUFFIX_CHARS).collect();
    format!("{USER_PREFIX}{suffix}")
}

fn validate(field: &'static str, value: &str) -> Result<()> {
    let len = value.chars().count();
    if len == 0 || len > MAX_ID_CHARS {
        return Err(Error::InvalidIdentity {
            field,
            len,
            max: MAX_ID_CHARS,
        });
    }
    Ok(())
}
