use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::model::{db::user::User, mongodb::Id};

/// An account that can hold an authentication token, having defined rights.
pub trait Account {
    /// The rights of this account type.
    const RIGHTS: Rights;
    /// Get the account's ID, if it has one in the database.
    fn id(&self) -> Option<Id>;
}

/// Different privilege levels.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Rights {
    User = 0,
    Admin = 1,
}

/// The survey administrator. There is a single shared admin identity,
/// unlocked by the configured admin password.
#[derive(Debug, Clone, Copy)]
pub struct Admin;

impl Account for User {
    const RIGHTS: Rights = Rights::User;

    fn id(&self) -> Option<Id> {
        Some(self.id)
    }
}

impl Account for Admin {
    const RIGHTS: Rights = Rights::Admin;

    fn id(&self) -> Option<Id> {
        None
    }
}
