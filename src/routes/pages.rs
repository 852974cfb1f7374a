//! # HTML 페이지 핸들러
//!
//! - `GET /` → 로그인/가입 폼
//! - `GET /load_flashcards` → 트레이너 화면 (로그인 필요, 아니면 `/`로 리다이렉트)
//!
//! 템플릿은 `templates/` 폴더의 HTML을 컴파일 타임에 포함(`include_str!`)하고,
//! `{{ flash }}` 같은 자리표시자만 치환합니다.

use axum::{
    extract::State,
    http::header::{HeaderName, SET_COOKIE},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};

use crate::{
    middleware::{
        flash::{flash_cookie, Flash, PendingFlash, FLASH_COOKIE},
        session::{removal_cookie, MaybeSession},
    },
    routes::AppState,
};

const LOGIN_TEMPLATE: &str = include_str!("../../templates/login_signup.html");
const TRAINER_TEMPLATE: &str = include_str!("../../templates/flashcards.html");

/// `GET /`: 로그인/가입 폼을 보여줍니다.
pub async fn login_page(State(state): State<AppState>, flash: PendingFlash) -> Response {
    let body = LOGIN_TEMPLATE.replace("{{ flash }}", &render_flash(flash.0));
    with_flash_cleared(&state, flash, Html(body))
}

/// `GET /load_flashcards`: 로그인한 사용자에게 트레이너 화면을 보여줍니다.
pub async fn load_flashcards(
    State(state): State<AppState>,
    MaybeSession(account): MaybeSession,
    flash: PendingFlash,
) -> Response {
    let Some(account) = account else {
        return redirect_with_cookies(
            "/",
            vec![flash_cookie(Flash::LoginRequired, state.session.secure())],
        );
    };

    let body = TRAINER_TEMPLATE
        .replace("{{ flash }}", &render_flash(flash.0))
        .replace(
            "{{ full_name }}",
            &html_escape::encode_text(&account.full_name),
        );
    with_flash_cleared(&state, flash, Html(body))
}

/// 리다이렉트 응답에 `Set-Cookie` 헤더들을 붙입니다.
pub fn redirect_with_cookies(to: &str, cookies: Vec<String>) -> Response {
    let headers: Vec<(HeaderName, String)> =
        cookies.into_iter().map(|cookie| (SET_COOKIE, cookie)).collect();
    (AppendHeaders(headers), Redirect::to(to)).into_response()
}

/// 알림을 보여준 페이지는 flash 쿠키를 지웁니다.
fn with_flash_cleared(state: &AppState, flash: PendingFlash, page: Html<String>) -> Response {
    if flash.is_present() {
        let clear = removal_cookie(FLASH_COOKIE, state.session.secure());
        (AppendHeaders([(SET_COOKIE, clear)]), page).into_response()
    } else {
        page.into_response()
    }
}

fn render_flash(flash: Option<Flash>) -> String {
    match flash {
        Some(flash) => format!(
            r#"<div class="flash flash-{}">{}</div>"#,
            flash.category(),
            flash.message()
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_carry_placeholders() {
        assert!(LOGIN_TEMPLATE.contains("{{ flash }}"));
        assert!(TRAINER_TEMPLATE.contains("{{ flash }}"));
        assert!(TRAINER_TEMPLATE.contains("{{ full_name }}"));
    }

    #[test]
    fn flash_renders_with_category_class() {
        assert_eq!(
            render_flash(Some(Flash::LoggedOut)),
            r#"<div class="flash flash-info">Logged out.</div>"#
        );
        assert_eq!(render_flash(None), "");
    }
}
