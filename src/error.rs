//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `StoreError`: 저장소(SQLite) 에러를 종류별로 분류 (제약 조건 위반 / 연결 불가 / 쿼리 실패)
//! - `AppError`: 핸들러가 반환하는 모든 에러를 하나로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 응답 본문 형식: `{ "error": { "code": "...", "message": "..." } }`

use axum::{
    extract::rejection::{FormRejection, JsonRejection}, // 본문 추출 실패 (타입 불일치, 문법 오류 등)
    http::StatusCode,                                   // HTTP 상태 코드
    response::{IntoResponse, Response},                 // Axum의 응답 변환 트레이트
    Json,                                               // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로
use thiserror::Error; // #[error("...")]로 Display를 자동 생성하는 derive 매크로

use crate::services::completion::CompletionError; // 텍스트 생성 서버 호출 에러

/// 저장소 작업 실패의 종류
///
/// `sqlx::Error`를 그대로 올려보내면 호출하는 쪽에서
/// "이메일 중복"과 "DB 연결 끊김"을 구분할 수 없습니다.
/// `From<sqlx::Error>` 구현이 에러를 세 가지로 분류합니다.
#[derive(Debug, Error)]
pub enum StoreError {
    /// UNIQUE 등 제약 조건 위반 (예: 이미 가입된 이메일)
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// 풀 타임아웃, 연결 종료, I/O 실패 등 저장소에 닿지 못한 경우
    #[error("store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// 그 밖의 쿼리/디코딩 실패
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Constraint(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_) => StoreError::Unavailable(err),
            other => StoreError::Query(other),
        }
    }
}

impl StoreError {
    pub fn is_constraint(&self) -> bool {
        matches!(self, StoreError::Constraint(_))
    }
}

/// 핸들러에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 필수 필드 누락 등 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 로그인이 필요하거나 인증에 실패함 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 저장소 오류 (HTTP 409 또는 500)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// 텍스트 생성 서버 호출 실패 (HTTP 502)
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

// sqlx 함수에 바로 `?`를 쓸 수 있도록 StoreError를 거쳐 변환합니다.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Store(err.into())
    }
}

// 요청 본문 추출기(`routes::extract`)의 거부 사유를 400으로 바꿉니다.
// axum 기본값(평문 400/415/422) 대신 공통 JSON 에러 본문으로 응답하기 위함입니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(저장소, 생성 서버, Internal)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        // (상태 코드, 에러 코드, 클라이언트에 보낼 메시지)
        // 400/401은 사용자가 고칠 수 있는 문제이므로 메시지를 그대로 보냅니다.
        let (status, code, message) = match self {
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Store(StoreError::Constraint(ref detail)) => {
                tracing::warn!("Constraint violation: {}", detail);
                (
                    StatusCode::CONFLICT,
                    "conflict",
                    "The record already exists".to_string(),
                )
            }
            AppError::Store(StoreError::Unavailable(ref e)) => {
                tracing::error!("Database unavailable: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_unavailable",
                    "The database is currently unavailable".to_string(),
                )
            }
            AppError::Store(StoreError::Query(ref e)) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Completion(ref e) => {
                tracing::error!("Completion error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "completion_failed",
                    "The language model could not be reached".to_string(),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // 모든 에러 응답은 같은 모양: { "error": { "code": "...", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
