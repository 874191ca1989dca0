use std::ops::Deref;

use argon2::{Config, Error as Argon2Error};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{api::auth::Registration, mongodb::Id};

/// Core user account data, as stored in the database.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCore {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl UserCore {
    /// Create a new user from a registration by hashing the password.
    pub fn new(registration: Registration) -> Result<Self, Argon2Error> {
        // 16 bytes is recommended for password hashing:
        //  https://en.wikipedia.org/wiki/Argon2
        let mut salt = [0_u8; 16];
        rand::thread_rng().fill(&mut salt);
        let password_hash = argon2::hash_encoded(
            registration.password.as_bytes(),
            &salt,
            &Config::default(),
        )?;
        Ok(Self {
            name: registration.name,
            email: registration.email,
            password_hash,
        })
    }

    /// Check whether the given password is correct.
    pub fn verify_password<T: AsRef<[u8]>>(&self, password: T) -> Result<bool, Argon2Error> {
        argon2::verify_encoded(&self.password_hash, password.as_ref())
    }
}

/// A user without an ID.
pub type NewUser = UserCore;

/// A user from the database, with its unique ID.
#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub user: UserCore,
}

impl Deref for User {
    type Target = UserCore;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let user = NewUser::new(Registration::example()).unwrap();
        assert_eq!(user.name, Registration::example().name);
        assert_eq!(user.email, Registration::example().email);
        assert_ne!(user.password_hash, Registration::example().password);
        assert!(user
            .verify_password(Registration::example().password)
            .unwrap());
        assert!(!user.verify_password("not the password").unwrap());
    }

    #[test]
    fn salted() {
        let first = NewUser::new(Registration::example()).unwrap();
        let second = NewUser::new(Registration::example()).unwrap();
        assert_ne!(first.password_hash, second.password_hash);
    }
}
