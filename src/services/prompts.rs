//! # 프롬프트 템플릿
//!
//! 언어 모델에 보낼 few-shot 프롬프트 세 가지를 만드는 순수 함수들입니다.
//! 각 프롬프트는 예시 두 개 뒤에 끝나지 않은 신호어(cue)로 끝나므로,
//! 모델은 그 신호어 바로 뒤를 이어서 답만 생성하게 됩니다.
//!
//! | 함수 | 마지막 신호어 |
//! |------|---------------|
//! | `build_word_prompt` | `German:` |
//! | `build_hint_prompt` | `Hint:` |
//! | `build_verify_prompt` | `Result:` |
//!
//! 이 함수들은 생성 서비스를 직접 호출하지 않습니다.

pub const WORD_CUE: &str = "German:";
pub const HINT_CUE: &str = "Hint:";
pub const RESULT_CUE: &str = "Result:";

/// 독일어 명사 하나만 내놓도록 유도하는 프롬프트
pub fn build_word_prompt() -> String {
    format!(
        "You are a German-English vocabulary tutor. Give one German word only. Do not explain or translate.\n\n\
         Example 1:\n{WORD_CUE} Hund\n\n\
         Example 2:\n{WORD_CUE} Apfel\n\n\
         Now give another German word:\n{WORD_CUE}"
    )
}

/// 단어에 대한 한 줄짜리 영어 힌트를 유도하는 프롬프트
///
/// `word`가 빈 문자열이어도 마지막 두 줄은 항상 `Word: {word}\nHint:`입니다.
pub fn build_hint_prompt(word: &str) -> String {
    format!(
        "You are helping learners understand German vocabulary. Give short English hints.\n\n\
         Example:\nWord: Hund\n{HINT_CUE} A common pet that barks.\n\n\
         Word: Apfel\n{HINT_CUE} A sweet red or green fruit.\n\n\
         Word: {word}\n{HINT_CUE}"
    )
}

/// 관사 누락과 사소한 철자 실수를 허용하는 채점 프롬프트
pub fn build_verify_prompt(word: &str, user_answer: &str, correct_answer: &str) -> String {
    format!(
        "You are a vocabulary tutor. Accept small spelling mistakes and missing articles.\n\n\
         Example:\nWord: Hund\nUser: dog\nCorrect: dog\n{RESULT_CUE} Yes\n\n\
         Word: Apfel\nUser: a apple\nCorrect: apple\n{RESULT_CUE} Yes\n\n\
         Word: {word}\nUser: {user_answer}\nCorrect: {correct_answer}\n{RESULT_CUE}"
    )
}
