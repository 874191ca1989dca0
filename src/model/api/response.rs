use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{api::id::ApiId, common::answer::Answers, db::response::Response};

/// A set of answers submitted by a respondent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSubmission {
    #[serde(default)]
    pub answers: Answers,
}

/// A stored response, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDescription {
    pub id: ApiId,
    pub user_id: String,
    pub submitted_at: DateTime<Utc>,
    pub answers: Answers,
}

impl From<Response> for ResponseDescription {
    fn from(response: Response) -> Self {
        let core = response.response;
        Self {
            id: response.id.into(),
            user_id: core.user_id,
            submitted_at: core.submitted_at,
            answers: core.answers,
        }
    }
}
