use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A registration request as received. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A registration with every field present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl TryFrom<RegistrationRequest> for Registration {
    type Error = Error;

    fn try_from(request: RegistrationRequest) -> Result<Self> {
        let non_empty = |field: Option<String>| field.filter(|value| !value.is_empty());
        match (
            non_empty(request.name),
            non_empty(request.email),
            non_empty(request.password),
        ) {
            (Some(name), Some(email), Some(password)) => Ok(Self {
                name,
                email,
                password,
            }),
            _ => Err(Error::bad_request("All fields are required")),
        }
    }
}

/// User login credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin login credentials: there is only a password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Registration {
        pub fn example() -> Self {
            Self {
                name: "Pardeep Narwal".to_string(),
                email: "pardeep@example.com".to_string(),
                password: "dubki-king".to_string(),
            }
        }

        pub fn example2() -> Self {
            Self {
                name: "Fazel Atrachali".to_string(),
                email: "fazel@example.com".to_string(),
                password: "ankle-hold".to_string(),
            }
        }
    }

    impl RegistrationRequest {
        pub fn example() -> Self {
            Registration::example().into()
        }

        pub fn example2() -> Self {
            Registration::example2().into()
        }
    }

    impl From<Registration> for RegistrationRequest {
        fn from(registration: Registration) -> Self {
            Self {
                name: Some(registration.name),
                email: Some(registration.email),
                password: Some(registration.password),
            }
        }
    }

    impl LoginRequest {
        pub fn example() -> Self {
            let registration = Registration::example();
            Self {
                email: registration.email,
                password: registration.password,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_registration() {
        let registration = Registration::try_from(RegistrationRequest::example()).unwrap();
        assert_eq!(registration, Registration::example());
    }

    #[test]
    fn missing_or_empty_fields() {
        let mut missing_name = RegistrationRequest::example();
        missing_name.name = None;
        let mut empty_email = RegistrationRequest::example();
        empty_email.email = Some(String::new());
        let mut missing_password = RegistrationRequest::example();
        missing_password.password = None;

        for request in [
            missing_name,
            empty_email,
            missing_password,
            RegistrationRequest::default(),
        ] {
            let err = Registration::try_from(request).unwrap_err();
            assert_eq!(err.to_string(), "All fields are required");
        }
    }
}
