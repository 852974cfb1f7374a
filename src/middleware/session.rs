use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
};
use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::{error::AppError, models::account::Account, routes::AppState};

pub const SESSION_COOKIE: &str = "session";
/// 세션 유효 시간 상한 (1년). 이보다 크면 만료 시각 계산이 넘칩니다.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // account id
    pub name: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Identity carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAccount {
    pub account_id: String,
    pub full_name: String,
    pub email: String,
}

impl From<Claims> for SessionAccount {
    fn from(claims: Claims) -> Self {
        Self {
            account_id: claims.sub,
            full_name: claims.name,
            email: claims.email,
        }
    }
}

/// Signing settings for session cookies.
#[derive(Clone)]
pub struct SessionKeys {
    secret: String,
    ttl: Duration,
    secure: bool,
}

impl SessionKeys {
    pub fn new(secret: impl Into<String>, ttl_hours: i64, secure: bool) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::hours(ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS)),
            secure,
        }
    }

    pub fn issue(&self, account: &Account) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: account.id.clone(),
            name: account.full_name.clone(),
            email: account.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn verify(&self, token: &str) -> Option<SessionAccount> {
        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(data) => Some(data.claims.into()),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                None
            }
        }
    }

    /// `Set-Cookie` value establishing a browser-session cookie.
    pub fn session_cookie(&self, token: String) -> String {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
            .to_string()
    }

    pub fn clear_session_cookie(&self) -> String {
        removal_cookie(SESSION_COOKIE, self.secure)
    }

    pub fn secure(&self) -> bool {
        self.secure
    }
}

pub fn removal_cookie(name: &'static str, secure: bool) -> String {
    let mut cookie = Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build();
    cookie.make_removal();
    cookie.to_string()
}

/// Value of the named request cookie, if present.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

/// Session that may or may not be present. Never rejects; pages use it to decide
/// between rendering and redirecting.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<SessionAccount>);

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let account = read_cookie(&parts.headers, SESSION_COOKIE)
            .and_then(|token| state.session.verify(&token));
        Ok(MaybeSession(account))
    }
}

/// Required session. Rejects with 401 before the handler runs, so the store is never
/// touched for anonymous requests.
impl FromRequestParts<AppState> for SessionAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        read_cookie(&parts.headers, SESSION_COOKIE)
            .and_then(|token| state.session.verify(&token))
            .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))
    }
}
