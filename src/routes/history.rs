//! # 점수 기록 핸들러
//!
//! - `POST /save_history` + `{ "score_percentage": 80.0 }` → `{ "message": "Saved." }`
//! - `GET /view_history` → `{ "history": [{ "timestamp": "2024-01-15 10:30:05", "score": 80.0 }] }`
//!
//! 두 엔드포인트 모두 로그인이 필요합니다. `SessionAccount` 추출기가
//! 핸들러 실행 전에 401을 반환하므로, 로그인하지 않은 요청은 DB에 닿지 않습니다.

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    db::history as db_history,
    error::AppError,
    middleware::session::SessionAccount,
    models::history::*,
    routes::{extract::JsonBody, AppState},
};

/// `POST /save_history`: 완료한 라운드의 점수를 저장합니다.
///
/// 점수는 0~100 사이의 유한한 숫자여야 합니다. 숫자가 아닌 값(예: `"80"`)도 400입니다.
/// 저장에 실패하면 트랜잭션을 롤백하고 500을 반환합니다 (재시도 없음).
pub async fn save_history(
    State(state): State<AppState>,
    account: SessionAccount,
    JsonBody(req): JsonBody<SaveHistoryRequest>,
) -> Result<Json<Value>, AppError> {
    let score = req
        .score_percentage
        .ok_or_else(|| AppError::BadRequest("Missing info.".to_string()))?;
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(AppError::BadRequest(
            "score_percentage must be between 0 and 100".to_string(),
        ));
    }

    let mut tx = state.pool.begin().await?;
    let entry = db_history::record_score(&mut *tx, &account.email, score, Utc::now()).await?;
    tx.commit().await?;

    tracing::info!(entry_id = %entry.id, email = %account.email, score, "Score saved");
    Ok(Json(json!({ "message": "Saved." })))
}

/// `GET /view_history`: 최근 10개의 점수 기록을 최신순으로 반환합니다.
///
/// 기록이 없으면 빈 배열을 반환합니다.
pub async fn view_history(
    State(state): State<AppState>,
    account: SessionAccount,
) -> Result<Json<HistoryResponse>, AppError> {
    let entries = db_history::recent_history(&state.pool, &account.email).await?;
    let history = entries
        .iter()
        .map(|entry| entry.to_item(state.display_timezone))
        .collect();

    Ok(Json(HistoryResponse { history }))
}
