//! # 플래시카드 라운드 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 요청 본문 | 응답 |
//! |--------|------|-----------|------|
//! | GET | /generate_flashcard | - | `{ "question": "Hund" }` |
//! | POST | /get_hint | `{ "question" }` | `{ "hint": "..." }` |
//! | POST | /verify_answer | `{ "question", "user_answer", "correct_answer"? }` | `{ "correct": true, "response": "..." }` |
//!
//! ## 라운드 흐름
//! ```text
//! 1. GET  /generate_flashcard  → 단어 표시
//! 2. POST /get_hint            → (선택) 힌트 표시
//! 3. POST /verify_answer       → 정답 여부 표시
//! ```
//! 서버는 라운드를 기억하지 않으므로, 2·3단계에서 클라이언트가 단어를 다시 보냅니다.
//! 생성 서버 호출이 실패하면 502 에러 본문을 반환합니다.

use axum::{extract::State, Json};

use crate::{
    error::AppError,
    models::flashcard::*,
    routes::{extract::JsonBody, AppState},
};

/// `GET /generate_flashcard`: 새 단어를 생성합니다.
pub async fn generate_flashcard(
    State(state): State<AppState>,
) -> Result<Json<FlashcardResponse>, AppError> {
    let question = state.trainer.generate_word().await?;
    Ok(Json(FlashcardResponse { question }))
}

/// `POST /get_hint`: 단어에 대한 힌트를 생성합니다.
///
/// `question`이 없거나 비어 있으면 생성 서버를 호출하지 않고 400을 반환합니다.
pub async fn get_hint(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<HintRequest>,
) -> Result<Json<HintResponse>, AppError> {
    let word = required_word(req.question)?;
    let hint = state.trainer.hint(&word).await?;
    Ok(Json(HintResponse { hint }))
}

/// `POST /verify_answer`: 사용자의 답을 채점합니다.
///
/// `correct_answer`가 없으면 `question`을 정답으로 사용합니다.
/// 정답은 클라이언트가 보낸 값을 그대로 믿습니다.
pub async fn verify_answer(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    let word = required_word(req.question)?;
    let user_answer = req
        .user_answer
        .ok_or_else(|| AppError::BadRequest("user_answer is required".to_string()))?;

    let verdict = state
        .trainer
        .verify(&word, user_answer.trim(), req.correct_answer.as_deref())
        .await?;

    Ok(Json(VerifyResponse {
        correct: verdict.correct,
        response: verdict.raw,
    }))
}

fn required_word(question: Option<String>) -> Result<String, AppError> {
    question
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("question is required".to_string()))
}
