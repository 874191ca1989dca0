use serde::{Deserialize, Serialize};

use crate::model::{api::id::ApiId, db::user::User};

/// A user's public details: everything except the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: ApiId,
    pub name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            name: user.user.name,
            email: user.user.email,
        }
    }
}

/// Body of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserSummary,
}

impl LoginResponse {
    pub fn new(user: User) -> Self {
        Self {
            message: "Login successful".to_string(),
            user: user.into(),
        }
    }
}
