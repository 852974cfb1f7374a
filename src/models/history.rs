//! # 점수 기록 모델 정의
//!
//! 라운드가 끝날 때마다 클라이언트가 저장하는 점수 기록입니다.
//! 기록은 추가만 되고 수정/삭제되지 않습니다.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// DB 저장용 타임스탬프 형식 (UTC, 밀리초까지)
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
/// 응답에 표시할 타임스탬프 형식
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 점수 기록 엔티티. DB의 `score_history` 테이블 한 행에 대응합니다.
///
/// `email`은 계정을 가리키지만 외래키는 아닙니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScoreEntry {
    pub id: String,
    pub email: String,
    /// UTC 기록 시각 (`STORED_TIMESTAMP_FORMAT`)
    pub recorded_at: String,
    /// 정답률 (퍼센트)
    pub score: f64,
}

/// `POST /save_history`의 요청 본문
#[derive(Debug, Deserialize)]
pub struct SaveHistoryRequest {
    pub score_percentage: Option<f64>,
}

/// `GET /view_history` 응답의 항목 하나
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItem {
    /// 표시용 시간대로 변환된 시각 (`YYYY-MM-DD HH:MM:SS`)
    pub timestamp: String,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryItem>,
}

/// DB에 저장할 형식으로 시각을 변환합니다.
pub fn format_stored(at: DateTime<Utc>) -> String {
    at.format(STORED_TIMESTAMP_FORMAT).to_string()
}

impl ScoreEntry {
    /// 저장된 UTC 시각을 `tz` 기준 표시 문자열로 바꿉니다.
    ///
    /// 형식이 깨진 행은 원래 문자열을 그대로 보여줍니다.
    pub fn to_item(&self, tz: Tz) -> HistoryItem {
        let timestamp = match DateTime::parse_from_rfc3339(&self.recorded_at) {
            Ok(at) => at.with_timezone(&tz).format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
            Err(e) => {
                tracing::warn!(id = %self.id, error = %e, "Unparseable history timestamp");
                self.recorded_at.clone()
            }
        };

        HistoryItem {
            timestamp,
            score: self.score,
        }
    }
}
