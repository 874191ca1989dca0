use std::ops::Deref;

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::model::{common::answer::Answers, mongodb::Id};

/// Recorded in place of a user ID when nobody was signed in.
pub const ANONYMOUS: &str = "anonymous";

/// Core response data, as stored in the database. Responses are never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCore {
    /// Hex ID of the submitting user, or [`ANONYMOUS`].
    pub user_id: String,
    /// When the response was received.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub submitted_at: DateTime<Utc>,
    /// The answers exactly as submitted.
    pub answers: Answers,
}

impl ResponseCore {
    /// Record a response submitted now.
    pub fn new(user_id: Option<Id>, answers: Answers) -> Self {
        Self {
            user_id: user_id.map_or_else(|| ANONYMOUS.to_string(), |id| id.to_string()),
            submitted_at: Utc::now(),
            answers,
        }
    }
}

/// A response without an ID.
pub type NewResponse = ResponseCore;

/// A response from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub response: ResponseCore,
}

impl Deref for Response {
    type Target = ResponseCore;

    fn deref(&self) -> &Self::Target {
        &self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribution() {
        assert_eq!(NewResponse::new(None, Answers::new()).user_id, ANONYMOUS);

        let id = Id::new();
        assert_eq!(
            NewResponse::new(Some(id), Answers::new()).user_id,
            id.to_string()
        );
    }
}
