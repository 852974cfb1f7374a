//! # 모델 출력에서 값 추출
//!
//! 언어 모델은 구조 없는 평문을 돌려주고, 서버 설정에 따라 프롬프트를
//! 앞에 그대로 붙여서 돌려주기도 합니다. `CueSplit`은 프롬프트의 신호어(cue)로
//! 잘라서 마지막 신호어 뒤의 내용만 사용합니다.
//!
//! 추출은 실패하지 않습니다. 신호어가 없으면 응답 전체(앞뒤 공백 제거)를 씁니다.

use super::prompts::{HINT_CUE, WORD_CUE};

/// 생성 결과 원문을 라운드에 필요한 값으로 바꿉니다.
pub trait Extraction: Send + Sync {
    fn word(&self, raw: &str) -> String;
    fn hint(&self, raw: &str) -> String;
    /// 모델이 답을 맞다고 판정했으면 `true`
    fn verdict(&self, raw: &str) -> bool;
}

/// 신호어로 자르고, 판정은 긍정 단어가 있는지로 봅니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct CueSplit;

impl Extraction for CueSplit {
    fn word(&self, raw: &str) -> String {
        after_last_cue(raw, WORD_CUE)
            .split('\n')
            .next()
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    fn hint(&self, raw: &str) -> String {
        after_last_cue(raw, HINT_CUE).to_string()
    }

    // 어디에든 "yes"가 있으면 통과. "yesterday" 같은 단어도 통과로 봅니다.
    fn verdict(&self, raw: &str) -> bool {
        raw.to_lowercase().contains("yes")
    }
}

fn after_last_cue<'a>(raw: &'a str, cue: &str) -> &'a str {
    raw.trim().rsplit(cue).next().unwrap_or_default().trim()
}
