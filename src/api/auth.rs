use mongodb::{bson::doc, options::FindOneOptions};
use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Route, State,
};

use crate::{
    error::{Error, Result},
    model::{
        api::{
            auth::{
                Admin, AdminLoginRequest, AuthToken, LoginRequest, LoginResponse, Registration,
                RegistrationRequest, AUTH_TOKEN_COOKIE,
            },
            message::Message,
        },
        db::user::{NewUser, User},
        mongodb::{email_collation, is_duplicate_key_error, Coll, Id},
    },
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![register, login, authenticate_admin, logout]
}

const EMAIL_TAKEN: &str = "Email already registered";

/// Find the user with the given email, ignoring case.
async fn find_by_email(users: &Coll<User>, email: &str) -> Result<Option<User>> {
    let with_email = doc! {
        "email": email,
    };
    let options = FindOneOptions::builder()
        .collation(email_collation())
        .build();
    Ok(users.find_one(with_email, options).await?)
}

/// Insert a new user. A clash on the unique email index means the email is taken.
async fn insert_user(new_users: &Coll<NewUser>, user: &NewUser) -> Result<Id> {
    match new_users.insert_one(user, None).await {
        Ok(result) => Ok(result
            .inserted_id
            .as_object_id()
            .unwrap() // Valid because the ID comes directly from the DB
            .into()),
        Err(e) if is_duplicate_key_error(&e) => Err(Error::bad_request(EMAIL_TAKEN)),
        Err(e) => Err(e.into()),
    }
}

#[post("/Register", data = "<request>", format = "json")]
pub async fn register(
    request: Json<RegistrationRequest>,
    users: Coll<User>,
    new_users: Coll<NewUser>,
) -> Result<(Status, Json<Message>)> {
    let registration = Registration::try_from(request.0)?;

    // Check email uniqueness.
    if find_by_email(&users, &registration.email).await?.is_some() {
        return Err(Error::bad_request(EMAIL_TAKEN));
    }

    // A concurrent registration may still win the race; the unique index catches it.
    let user = NewUser::new(registration)?;
    let new_id = insert_user(&new_users, &user).await?;
    info!("Registered user {new_id}");

    Ok((
        Status::Created,
        Json(Message::new("User registered successfully")),
    ))
}

#[post("/login", data = "<credentials>", format = "json")]
pub async fn login(
    credentials: Json<LoginRequest>,
    cookies: &CookieJar<'_>,
    users: Coll<User>,
    config: &State<Config>,
) -> Result<Json<LoginResponse>> {
    let user = find_by_email(&users, &credentials.email)
        .await?
        .ok_or_else(|| Error::unauthorized("User not found"))?;

    if !user.verify_password(&credentials.password)? {
        return Err(Error::unauthorized("Invalid password"));
    }

    let token = AuthToken::new(&user);
    cookies.add(token.into_cookie(config));

    Ok(Json(LoginResponse::new(user)))
}

#[post("/auth/admin", data = "<credentials>", format = "json")]
pub async fn authenticate_admin(
    credentials: Json<AdminLoginRequest>,
    cookies: &CookieJar<'_>,
    config: &State<Config>,
) -> Result<()> {
    if credentials.password != config.admin_password() {
        return Err(Error::unauthorized(
            "Incorrect password. Please try again.",
        ));
    }

    let token = AuthToken::new(&Admin);
    cookies.add(token.into_cookie(config));

    Ok(())
}

#[delete("/auth")]
pub fn logout(cookies: &CookieJar) -> Status {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    Status::Ok
}
