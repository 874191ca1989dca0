use rocket::Route;

pub(crate) mod auth;
pub(crate) mod questions;
pub(crate) mod responses;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(auth::routes());
    routes.extend(questions::routes());
    routes.extend(responses::routes());
    routes
}
