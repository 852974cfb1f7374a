//! # 점수 기록 데이터베이스 쿼리 모듈
//!
//! 점수 기록은 추가(append)와 최근 기록 조회만 지원합니다.
//!
//! 정렬 기준은 `recorded_at DESC`이고, 같은 시각에 저장된 기록은
//! SQLite의 `rowid`(삽입 순서)로 나중 것이 먼저 오게 합니다.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::StoreError;
use crate::models::history::{format_stored, ScoreEntry};

/// 한 번에 돌려주는 최근 기록 개수
pub const RECENT_HISTORY_LIMIT: i64 = 10;

/// 점수 기록 한 건을 추가합니다.
///
/// 트랜잭션 안에서 호출할 수 있도록 `&mut SqliteConnection`을 받습니다.
/// (`&mut *tx`로 트랜잭션을 넘길 수 있습니다)
pub async fn record_score(
    conn: &mut SqliteConnection,
    email: &str,
    score: f64,
    recorded_at: DateTime<Utc>,
) -> Result<ScoreEntry, StoreError> {
    let entry = ScoreEntry {
        id: uuid::Uuid::now_v7().to_string(),
        email: email.to_string(),
        recorded_at: format_stored(recorded_at),
        score,
    };

    sqlx::query(
        r#"
        INSERT INTO score_history (id, email, recorded_at, score)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&entry.id)
    .bind(&entry.email)
    .bind(&entry.recorded_at)
    .bind(entry.score)
    .execute(conn)
    .await?;

    Ok(entry)
}

/// 특정 이메일의 최근 기록을 최신순으로 최대 `RECENT_HISTORY_LIMIT`개 조회합니다.
///
/// 기록이 없으면 빈 Vec을 반환합니다 (에러가 아님).
pub async fn recent_history(pool: &SqlitePool, email: &str) -> Result<Vec<ScoreEntry>, StoreError> {
    let entries = sqlx::query_as::<_, ScoreEntry>(
        r#"
        SELECT id, email, recorded_at, score
        FROM score_history
        WHERE email = ?
        ORDER BY recorded_at DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(email)
    .bind(RECENT_HISTORY_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
