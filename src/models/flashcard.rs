//! # 플래시카드 요청/응답 모델
//!
//! 필드 이름은 브라우저 클라이언트가 보내는 JSON 키를 그대로 따릅니다
//! (`question` = 제시된 독일어 단어).
//! 필수 필드도 `Option`으로 받아서, 빠졌을 때 핸들러가 400 에러 본문을 만들게 합니다.

use serde::{Deserialize, Serialize};

/// `GET /generate_flashcard` 응답
#[derive(Debug, Serialize)]
pub struct FlashcardResponse {
    pub question: String,
}

/// `POST /get_hint` 요청 본문
#[derive(Debug, Deserialize)]
pub struct HintRequest {
    pub question: Option<String>,
}

/// `POST /get_hint` 응답
#[derive(Debug, Serialize)]
pub struct HintResponse {
    pub hint: String,
}

/// `POST /verify_answer` 요청 본문
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub question: Option<String>,
    pub user_answer: Option<String>,
    /// 없으면 `question`을 정답으로 사용합니다
    pub correct_answer: Option<String>,
}

/// `POST /verify_answer` 응답
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub correct: bool,
    /// 모델의 원문 응답
    pub response: String,
}
