use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, ReturnDocument, UpdateOptions},
};
use rocket::http::Status;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{db::question::Question, mongodb::Coll};

/// ID of the counter that hands out question display positions.
pub const QUESTION_ORDER_COUNTER_ID: &str = "question_order";

/// A counter object used to implement auto-increment fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename = "_id")]
    pub id: String,
    pub next: u32,
}

impl Counter {
    /// Atomically retrieve the next value of the counter with the given ID.
    pub async fn next(counters: &Coll<Counter>, id: &str) -> Result<u32> {
        let update = doc! {
            "$inc": { "next": 1 }
        };
        let options: FindOneAndUpdateOptions = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::Before)
            .build();
        let counter = counters
            .find_one_and_update(doc! { "_id": id }, update, options)
            .await?
            .ok_or_else(|| {
                Error::Status(
                    Status::InternalServerError,
                    format!("Failed to find counter with ID {}", id),
                )
            })?;
        Ok(counter.next)
    }
}

/// Ensure the question order counter exists, starting it just past the questions
/// already stored so that existing display positions are never reused.
///
/// This operation is idempotent.
pub async fn ensure_question_order_counter_exists(
    counters: &Coll<Counter>,
    questions: &Coll<Question>,
) -> Result<()> {
    let existing = questions.count_documents(None, None).await?;
    let start = i64::try_from(existing).unwrap_or(i64::MAX) + 1;
    let filter = doc! {
        "_id": QUESTION_ORDER_COUNTER_ID,
    };
    let update = doc! {
        "$setOnInsert": { "next": start }
    };
    let options = UpdateOptions::builder().upsert(true).build();
    counters.update_one(filter, update, options).await?;
    Ok(())
}
