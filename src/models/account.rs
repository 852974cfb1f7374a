use serde::Deserialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

/// `POST /` form body. Which submit button was pressed decides the action,
/// so every field is optional here and validated by the handler.
#[derive(Debug, Default, Deserialize)]
pub struct AuthForm {
    pub signup: Option<String>,
    pub login: Option<String>,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
