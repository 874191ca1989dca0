use mongodb::{bson::doc, options::FindOptions};
use rocket::{futures::TryStreamExt, http::Status, serde::json::Json, Route};

use crate::{
    error::{Error, Result},
    model::{
        api::{
            auth::{Admin, AuthToken},
            pagination::{Paginated, PaginationRequest},
            response::{ResponseDescription, ResponseSubmission},
        },
        db::{
            response::{NewResponse, Response},
            user::User,
        },
        mongodb::{Coll, Id},
    },
};

pub fn routes() -> Vec<Route> {
    routes![
        submit_response,
        get_responses,
        get_response,
        get_responses_fallback,
        get_response_fallback,
    ]
}

/// Store a response. Answers are kept exactly as submitted; which questions were
/// visible is the client's concern.
#[post("/responses", data = "<submission>", format = "json")]
pub async fn submit_response(
    token: Option<AuthToken<User>>,
    submission: Json<ResponseSubmission>,
    responses: Coll<Response>,
    new_responses: Coll<NewResponse>,
) -> Result<(Status, Json<ResponseDescription>)> {
    let user_id = token.and_then(|token| token.id);
    let response = NewResponse::new(user_id, submission.0.answers);
    let new_id: Id = new_responses
        .insert_one(&response, None)
        .await?
        .inserted_id
        .as_object_id()
        .unwrap() // Valid because the ID comes directly from the DB
        .into();
    info!("Recorded response {new_id} from {}", response.user_id);

    let stored = responses
        .find_one(new_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Response {}", new_id)))?;
    Ok((Status::Created, Json(stored.into())))
}

#[get("/responses?<pagination..>")]
pub async fn get_responses(
    _token: AuthToken<Admin>,
    pagination: PaginationRequest,
    responses: Coll<Response>,
) -> Result<Json<Paginated<ResponseDescription>>> {
    let options = FindOptions::builder()
        .sort(doc! { "submittedAt": 1, "_id": 1 })
        .skip(pagination.skip())
        .limit(i64::from(pagination.page_size()))
        .build();
    let page: Vec<ResponseDescription> = responses
        .find(None, options)
        .await?
        .map_ok(Into::into)
        .try_collect()
        .await?;
    let total = responses.count_documents(None, None).await?;
    Ok(Json(pagination.to_paginated(total, page)))
}

#[get("/responses/<response_id>")]
pub async fn get_response(
    _token: AuthToken<Admin>,
    response_id: Id,
    responses: Coll<Response>,
) -> Result<Json<ResponseDescription>> {
    let response = responses
        .find_one(response_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Response {}", response_id)))?;
    Ok(Json(response.into()))
}

/// Reached when `get_responses` forwards: no admin is signed in, or the page is invalid.
#[get("/responses", rank = 2)]
pub fn get_responses_fallback(token: Option<AuthToken<Admin>>) -> Error {
    match token {
        Some(_) => Error::Status(
            Status::UnprocessableEntity,
            "Page number and size must be positive".to_string(),
        ),
        None => Error::unauthorized("Admin login required"),
    }
}

/// Reached when `get_response` forwards: no admin is signed in, or the ID is malformed.
#[get("/responses/<response_id>", rank = 2)]
pub fn get_response_fallback(token: Option<AuthToken<Admin>>, response_id: &str) -> Error {
    match token {
        Some(_) => Error::not_found(format!("Response {response_id}")),
        None => Error::unauthorized("Admin login required"),
    }
}

#[cfg(test)]
mod tests {
    use mongodb::Database;
    use rocket::{
        http::ContentType,
        local::asynchronous::Client,
        serde::json::serde_json::{self, json},
    };

    use crate::model::{
        api::auth::{LoginRequest, Registration},
        common::answer::{AnswerValue, Answers},
        db::response::ANONYMOUS,
    };

    use super::*;

    async fn submit(client: &Client, submission: &ResponseSubmission) -> ResponseDescription {
        let response = client
            .post(uri!(submit_response))
            .header(ContentType::JSON)
            .body(json!(submission).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Created, response.status());
        serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
    }

    async fn get_page(client: &Client, page_num: u32, page_size: u32) -> Paginated<ResponseDescription> {
        let response = client
            .get(format!("/responses?page_num={page_num}&page_size={page_size}"))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
    }

    fn example_submission() -> ResponseSubmission {
        ResponseSubmission::example(&Id::new().to_string(), &Id::new().to_string())
    }

    #[backend_test]
    async fn submit_anonymous(client: Client, responses: Coll<Response>) {
        let submission = example_submission();
        let created = submit(&client, &submission).await;
        assert_eq!(created.user_id, ANONYMOUS);
        assert_eq!(created.answers, submission.answers);

        // Persisted exactly as passed in.
        let stored = responses
            .find_one(created.id.as_doc(), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.answers, submission.answers);
        assert_eq!(stored.user_id, ANONYMOUS);
        assert_eq!(ResponseDescription::from(stored), created);
    }

    #[backend_test]
    async fn submit_keeps_unknown_and_hidden_answers(client: Client, responses: Coll<Response>) {
        // Nothing checks the answers against the questions.
        let answers = Answers::from([
            ("no-such-question".to_string(), AnswerValue::from("anything")),
            ("empty".to_string(), AnswerValue::from(Vec::<&str>::new())),
            ("blank".to_string(), AnswerValue::from("")),
        ]);
        let created = submit(&client, &ResponseSubmission { answers: answers.clone() }).await;
        let stored = responses
            .find_one(created.id.as_doc(), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.answers, answers);
    }

    #[backend_test(user)]
    async fn submit_as_user(client: Client, db: Database) {
        let created = submit(&client, &example_submission()).await;
        let user = Coll::<User>::from_db(&db)
            .find_one(doc! { "email": LoginRequest::example().email }, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.user_id, user.id.to_string());
        assert_eq!(user.name, Registration::example().name);
    }

    #[backend_test(admin)]
    async fn list_responses_paginated(client: Client) {
        let mut submitted = Vec::new();
        for _ in 0..5 {
            submitted.push(submit(&client, &example_submission()).await);
        }

        let first = get_page(&client, 1, 2).await;
        assert_eq!(first.pagination.total, 5);
        assert_eq!(first.items.len(), 2);

        let last = get_page(&client, 3, 2).await;
        assert_eq!(last.items.len(), 1);

        let everything = get_page(&client, 1, 50).await;
        let mut listed: Vec<_> = everything.items.into_iter().map(|r| r.id).collect();
        let mut expected: Vec<_> = submitted.iter().map(|r| r.id).collect();
        listed.sort();
        expected.sort();
        assert_eq!(listed, expected);

        // A single response.
        let response = client
            .get(uri!(get_response(*submitted[2].id)))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        let single: ResponseDescription =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(single, submitted[2]);

        // A missing one.
        let response = client.get(uri!(get_response(Id::new()))).dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }

    #[backend_test(admin)]
    async fn malformed_admin_requests(responses: Coll<Response>, client: Client) {
        let response = client.get("/responses/not-an-id").dispatch().await;
        assert_eq!(Status::NotFound, response.status());

        let response = client
            .get("/responses?page_num=0&page_size=10")
            .dispatch()
            .await;
        assert_eq!(Status::UnprocessableEntity, response.status());

        let count = responses.count_documents(None, None).await.unwrap();
        assert_eq!(count, 0);
    }

    #[backend_test]
    async fn listing_requires_admin(client: Client) {
        let created = submit(&client, &example_submission()).await;

        let response = client.get("/responses").dispatch().await;
        assert_eq!(Status::Unauthorized, response.status());

        let response = client
            .get(uri!(get_response(*created.id)))
            .dispatch()
            .await;
        assert_eq!(Status::Unauthorized, response.status());
    }
}
