//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /health` → `{ "status": "ok" }`
//!
//! 데이터베이스나 생성 서버는 확인하지 않습니다. 프로세스가 요청을 받을 수 있는지만 봅니다.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health`: 서버 상태를 확인합니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
