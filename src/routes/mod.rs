//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `pages`: 로그인/가입 페이지, 트레이너 페이지 (HTML)
//! - `auth`: 가입, 로그인, 로그아웃
//! - `flashcards`: 단어 생성, 힌트, 채점 (JSON)
//! - `history`: 점수 저장과 최근 기록 조회 (JSON)
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `extract`: 에러 본문 형식을 지키는 요청 본문 추출기

pub mod auth;
pub mod extract;
pub mod flashcards;
pub mod health;
pub mod history;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use chrono_tz::Tz;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{middleware::session::SessionKeys, services::Trainer};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 라운드 상태는 여기에 두지 않습니다. 요청마다 필요한 값은 클라이언트가 보냅니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (계정, 점수 기록)
    pub pool: SqlitePool,
    /// 플래시카드 라운드 컨트롤러 (생성 서비스 핸들을 품고 있음)
    pub trainer: Arc<Trainer>,
    /// 세션 쿠키 서명 설정
    pub session: SessionKeys,
    /// 점수 기록 표시용 시간대
    pub display_timezone: Tz,
}

/// 전체 라우터를 구성합니다.
///
/// `static_path`의 파일들은 `/static` 아래에서 서빙됩니다.
pub fn router(state: AppState, static_path: &str) -> Router {
    Router::new()
        // 페이지와 계정
        .route("/", get(pages::login_page).post(auth::login_signup))
        .route("/logout", get(auth::logout))
        .route("/load_flashcards", get(pages::load_flashcards))
        // 플래시카드 라운드
        .route("/generate_flashcard", get(flashcards::generate_flashcard))
        .route("/get_hint", post(flashcards::get_hint))
        .route("/verify_answer", post(flashcards::verify_answer))
        // 점수 기록
        .route("/save_history", post(history::save_history))
        .route("/view_history", get(history::view_history))
        .route("/health", get(health::health_check))
        .nest_service("/static", ServeDir::new(static_path))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
