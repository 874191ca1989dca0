use mongodb::{bson::doc, options::FindOptions};
use rocket::{futures::TryStreamExt, http::Status, serde::json::Json, Route};

use crate::{
    error::{Error, Result},
    model::{
        api::{
            auth::{Admin, AuthToken},
            question::{QuestionDescription, QuestionSpec, VisibilityRequest},
        },
        common::visibility::visible_questions,
        db::question::{NewQuestion, Question},
        mongodb::{Coll, Counter, Id, QUESTION_ORDER_COUNTER_ID},
    },
};

pub fn routes() -> Vec<Route> {
    routes![
        get_questions,
        get_visible_questions,
        create_question,
        create_question_fallback,
    ]
}

/// All questions, in display order.
async fn ordered_questions(questions: &Coll<Question>) -> Result<Vec<Question>> {
    let options = FindOptions::builder()
        .sort(doc! { "order": 1, "_id": 1 })
        .build();
    let ordered = questions.find(None, options).await?.try_collect().await?;
    Ok(ordered)
}

#[get("/questions")]
pub async fn get_questions(questions: Coll<Question>) -> Result<Json<Vec<QuestionDescription>>> {
    let ordered = ordered_questions(&questions).await?;
    Ok(Json(ordered.into_iter().map(Into::into).collect()))
}

#[post("/questions/visible", data = "<request>", format = "json")]
pub async fn get_visible_questions(
    request: Json<VisibilityRequest>,
    questions: Coll<Question>,
) -> Result<Json<Vec<QuestionDescription>>> {
    let ordered = ordered_questions(&questions).await?;
    let visible = visible_questions(&ordered, &request.answers)
        .into_iter()
        .cloned()
        .map(Into::into)
        .collect();
    Ok(Json(visible))
}

/// Append a question to the end of the survey.
///
/// The display position is taken from the order counter before inserting, so a
/// failed insert leaves a gap in `order`. Readers only rely on relative order.
#[post("/questions", data = "<spec>", format = "json")]
pub async fn create_question(
    _token: AuthToken<Admin>,
    spec: Json<QuestionSpec>,
    questions: Coll<Question>,
    new_questions: Coll<NewQuestion>,
    counters: Coll<Counter>,
) -> Result<(Status, Json<QuestionDescription>)> {
    let spec = spec.0.normalize()?;

    // Check the rule can actually be triggered.
    if let Some(rule) = &spec.conditional_on {
        let dependency = match rule.question_id.parse::<Id>() {
            Ok(id) => questions.find_one(id.as_doc(), None).await?,
            Err(_) => None,
        };
        spec.check_dependency(dependency.as_ref())?;
    }

    // Append at the end of the survey.
    let order = Counter::next(&counters, QUESTION_ORDER_COUNTER_ID).await?;
    let new_id: Id = new_questions
        .insert_one(spec.into_question(order), None)
        .await?
        .inserted_id
        .as_object_id()
        .unwrap() // Valid because the ID comes directly from the DB
        .into();
    info!("Created question {new_id} at position {order}");

    let question = questions
        .find_one(new_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Question {}", new_id)))?;
    Ok((Status::Created, Json(question.into())))
}

/// Reached when `create_question` forwards: no admin is signed in, or the body is not JSON.
#[post("/questions", rank = 2)]
pub fn create_question_fallback(token: Option<AuthToken<Admin>>) -> Error {
    match token {
        Some(_) => Error::Status(
            Status::UnsupportedMediaType,
            "Questions must be sent as JSON".to_string(),
        ),
        None => Error::unauthorized("Admin login required"),
    }
}
