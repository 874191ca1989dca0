mod account;
mod request;
mod response;
mod token;

pub use account::{Account, Admin, Rights};
pub use request::{AdminLoginRequest, LoginRequest, Registration, RegistrationRequest};
pub use response::{LoginResponse, UserSummary};
pub use token::{AuthToken, AUTH_TOKEN_COOKIE};
