//! # 일회성 알림(flash) 쿠키
//!
//! 리다이렉트 직후 페이지에 한 번만 보여줄 알림을 쿠키로 전달합니다.
//! 쿠키에는 정해진 알림 코드만 담기므로 사용자 입력이 페이지에 그대로 출력되지 않습니다.
//!
//! 흐름:
//! 1. 핸들러가 리다이렉트 응답에 `flash_cookie(...)`를 붙임
//! 2. 다음 페이지 요청에서 `PendingFlash` 추출기가 쿠키를 읽음
//! 3. 페이지가 알림을 출력하고 `removal_cookie`로 쿠키를 지움

use axum::{extract::FromRequestParts, http::request::Parts};
use cookie::{Cookie, SameSite};
use std::convert::Infallible;

use super::session::read_cookie;

pub const FLASH_COOKIE: &str = "flash";

/// 페이지에 표시할 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    SignupOk,
    SignupDuplicate,
    SignupFailed,
    LoginOk,
    InvalidCredentials,
    LoginRequired,
    LoggedOut,
}

impl Flash {
    const ALL: [Flash; 7] = [
        Flash::SignupOk,
        Flash::SignupDuplicate,
        Flash::SignupFailed,
        Flash::LoginOk,
        Flash::InvalidCredentials,
        Flash::LoginRequired,
        Flash::LoggedOut,
    ];

    /// 쿠키에 저장되는 코드
    pub fn code(self) -> &'static str {
        match self {
            Flash::SignupOk => "signup_ok",
            Flash::SignupDuplicate => "signup_duplicate",
            Flash::SignupFailed => "signup_failed",
            Flash::LoginOk => "login_ok",
            Flash::InvalidCredentials => "invalid_credentials",
            Flash::LoginRequired => "login_required",
            Flash::LoggedOut => "logged_out",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::SignupOk => "Signup successful! Please log in.",
            Flash::SignupDuplicate => "Signup failed: that email is already registered.",
            Flash::SignupFailed => "Signup failed. Please try again.",
            Flash::LoginOk => "Login successful!",
            // 존재하지 않는 이메일과 틀린 비밀번호를 구분하지 않습니다
            Flash::InvalidCredentials => "Invalid credentials.",
            Flash::LoginRequired => "Please log in.",
            Flash::LoggedOut => "Logged out.",
        }
    }

    /// CSS 클래스에 쓰는 분류 (success / error / info)
    pub fn category(self) -> &'static str {
        match self {
            Flash::SignupOk | Flash::LoginOk => "success",
            Flash::LoggedOut => "info",
            _ => "error",
        }
    }
}

/// `Set-Cookie` 값: 다음 페이지에서 보여줄 알림
pub fn flash_cookie(flash: Flash, secure: bool) -> String {
    Cookie::build((FLASH_COOKIE, flash.code()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
        .to_string()
}

/// 요청에 실려 온 알림. 쿠키가 없거나 코드를 알 수 없으면 `None`
#[derive(Debug, Clone, Copy)]
pub struct PendingFlash(pub Option<Flash>);

impl PendingFlash {
    /// 쿠키가 실려 왔는지 여부 (지워야 하는지 판단용)
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PendingFlash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flash =
            read_cookie(&parts.headers, FLASH_COOKIE).and_then(|code| Flash::from_code(&code));
        Ok(PendingFlash(flash))
    }
}
