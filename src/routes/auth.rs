use crate::{
    db::accounts as db_accounts,
    error::{AppError, StoreError},
    middleware::flash::{flash_cookie, Flash},
    models::account::*,
    routes::{extract::FormBody, pages::redirect_with_cookies, AppState},
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, response::Response};
use sqlx::SqlitePool;

/// `POST /`: the login/signup page posts both forms here; the name of the submit
/// button tells them apart.
pub async fn login_signup(
    State(state): State<AppState>,
    FormBody(form): FormBody<AuthForm>,
) -> Result<Response, AppError> {
    if form.signup.is_some() {
        signup(&state, form.try_into()?).await
    } else if form.login.is_some() {
        login(&state, form.try_into()?).await
    } else {
        Err(AppError::BadRequest("Unknown form action".to_string()))
    }
}

async fn signup(state: &AppState, req: SignupRequest) -> Result<Response, AppError> {
    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    let account_id = uuid::Uuid::now_v7().to_string();
    let flash = match insert_account(&state.pool, &account_id, &req, &password_hash).await {
        Ok(()) => {
            tracing::info!(account_id = %account_id, email = %req.email, "Account created");
            Flash::SignupOk
        }
        Err(e) if e.is_constraint() => {
            tracing::info!(email = %req.email, "Signup rejected, email already registered");
            Flash::SignupDuplicate
        }
        Err(e) => {
            tracing::error!(error = %e, "Signup failed");
            Flash::SignupFailed
        }
    };

    Ok(redirect_with_cookies(
        "/",
        vec![flash_cookie(flash, state.session.secure())],
    ))
}

/// Dropping the transaction without commit rolls it back.
async fn insert_account(
    pool: &SqlitePool,
    account_id: &str,
    req: &SignupRequest,
    password_hash: &str,
) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;
    db_accounts::create_account(&mut *tx, account_id, &req.full_name, &req.email, password_hash)
        .await?;
    tx.commit().await?;
    Ok(())
}

async fn login(state: &AppState, req: LoginRequest) -> Result<Response, AppError> {
    let secure = state.session.secure();
    let rejected = || {
        redirect_with_cookies("/", vec![flash_cookie(Flash::InvalidCredentials, secure)])
    };

    let Some(account) = db_accounts::find_by_email(&state.pool, &req.email).await? else {
        tracing::info!(email = %req.email, "Login for unknown email");
        return Ok(rejected());
    };

    // Verify password
    let parsed_hash = PasswordHash::new(&account.password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    if Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::info!(account_id = %account.id, "Login with wrong password");
        return Ok(rejected());
    }

    let token = state
        .session
        .issue(&account)
        .map_err(|e| AppError::Internal(format!("Session token generation failed: {}", e)))?;

    tracing::info!(account_id = %account.id, "Logged in");
    Ok(redirect_with_cookies(
        "/load_flashcards",
        vec![
            state.session.session_cookie(token),
            flash_cookie(Flash::LoginOk, secure),
        ],
    ))
}

/// `GET /logout`: clears the session cookie.
pub async fn logout(State(state): State<AppState>) -> Response {
    redirect_with_cookies(
        "/",
        vec![
            state.session.clear_session_cookie(),
            flash_cookie(Flash::LoggedOut, state.session.secure()),
        ],
    )
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))
}

fn required_email(value: Option<String>) -> Result<String, AppError> {
    let email = required(value, "email")?;
    if !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    Ok(email)
}

// Passwords are taken as typed; only emptiness is rejected.
fn required_password(value: Option<String>) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest("password is required".to_string()))
}

impl TryFrom<AuthForm> for SignupRequest {
    type Error = AppError;

    fn try_from(form: AuthForm) -> Result<Self, Self::Error> {
        Ok(Self {
            full_name: required(form.fullname, "fullname")?,
            email: required_email(form.email)?,
            password: required_password(form.password)?,
        })
    }
}

impl TryFrom<AuthForm> for LoginRequest {
    type Error = AppError;

    fn try_from(form: AuthForm) -> Result<Self, Self::Error> {
        Ok(Self {
            email: required_email(form.email)?,
            password: required_password(form.password)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fullname: Option<&str>, email: Option<&str>, password: Option<&str>) -> AuthForm {
        AuthForm {
            signup: Some("Sign up".into()),
            login: None,
            fullname: fullname.map(Into::into),
            email: email.map(Into::into),
            password: password.map(Into::into),
        }
    }

    #[test]
    fn signup_form_requires_every_field() {
        let ok = SignupRequest::try_from(form(Some(" Anna "), Some("anna@example.com "), Some("pw")))
            .unwrap();
        assert_eq!(ok.full_name, "Anna");
        assert_eq!(ok.email, "anna@example.com");

        assert!(SignupRequest::try_from(form(None, Some("anna@example.com"), Some("pw"))).is_err());
        assert!(SignupRequest::try_from(form(Some("Anna"), Some(""), Some("pw"))).is_err());
        assert!(SignupRequest::try_from(form(Some("Anna"), Some("anna@example.com"), None)).is_err());
    }

    #[test]
    fn login_form_rejects_malformed_email() {
        assert!(matches!(
            LoginRequest::try_from(form(None, Some("anna"), Some("pw"))),
            Err(AppError::BadRequest(_))
        ));
    }
}
