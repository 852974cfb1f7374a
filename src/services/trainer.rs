//! # 플래시카드 라운드 컨트롤러
//!
//! 한 라운드(단어 생성 → 힌트 → 채점)의 각 단계를 처리합니다.
//! 서버는 라운드 상태를 저장하지 않습니다. 단어와 답은 매 요청마다
//! 클라이언트가 다시 보내 줍니다.
//!
//! 각 단계는 같은 흐름을 따릅니다:
//! 1. `prompts`로 프롬프트 생성
//! 2. `TextCompletion`으로 생성 요청
//! 3. `Extraction`으로 결과에서 값 추출

use std::sync::Arc;

use super::{
    completion::{CompletionError, TextCompletion},
    extraction::{CueSplit, Extraction},
    prompts,
};

/// 단어 생성 시 최대 토큰 수 (단어 하나면 충분)
pub const WORD_TOKEN_BUDGET: u32 = 10;
/// 힌트 생성 시 최대 토큰 수
pub const HINT_TOKEN_BUDGET: u32 = 50;
/// 채점 시 최대 토큰 수
pub const VERIFY_TOKEN_BUDGET: u32 = 50;

/// 채점 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    /// 모델이 생성한 원문 (앞뒤 공백 제거)
    pub raw: String,
}

/// 라운드 컨트롤러
///
/// 생성 서비스 핸들은 `main`에서 한 번 만들어 주입합니다.
pub struct Trainer {
    completion: Arc<dyn TextCompletion>,
    extraction: Arc<dyn Extraction>,
}

impl Trainer {
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self::with_extraction(completion, Arc::new(CueSplit))
    }

    pub fn with_extraction(
        completion: Arc<dyn TextCompletion>,
        extraction: Arc<dyn Extraction>,
    ) -> Self {
        Self {
            completion,
            extraction,
        }
    }

    /// 새 독일어 단어를 하나 생성합니다.
    pub async fn generate_word(&self) -> Result<String, CompletionError> {
        let prompt = prompts::build_word_prompt();
        let raw = self.completion.complete(&prompt, WORD_TOKEN_BUDGET).await?;
        let word = self.extraction.word(&raw);

        if word.is_empty() {
            tracing::warn!(raw = %raw, "Completion produced no word");
        } else {
            tracing::info!(word = %word, "Generated flashcard word");
        }
        Ok(word)
    }

    /// 단어에 대한 힌트를 생성합니다. 빈 단어 검사는 호출하는 쪽의 몫입니다.
    pub async fn hint(&self, word: &str) -> Result<String, CompletionError> {
        let prompt = prompts::build_hint_prompt(word);
        let raw = self.completion.complete(&prompt, HINT_TOKEN_BUDGET).await?;
        Ok(self.extraction.hint(&raw))
    }

    /// 사용자의 답을 채점합니다.
    ///
    /// `correct_answer`가 없으면 제시된 단어 자체를 정답으로 사용합니다.
    /// 정답은 클라이언트가 알려 주는 값이며, 서버가 따로 확인하지 않습니다.
    pub async fn verify(
        &self,
        word: &str,
        user_answer: &str,
        correct_answer: Option<&str>,
    ) -> Result<Verdict, CompletionError> {
        let correct_answer = correct_answer.unwrap_or(word);
        let prompt = prompts::build_verify_prompt(word, user_answer, correct_answer);
        let raw = self.completion.complete(&prompt, VERIFY_TOKEN_BUDGET).await?;
        let correct = self.extraction.verdict(&raw);

        tracing::info!(word = %word, correct, "Answer verified");
        Ok(Verdict {
            correct,
            raw: raw.trim().to_string(),
        })
    }
}
