//! # 서비스 계층
//!
//! 라우트 핸들러가 사용하는 비즈니스 로직 모듈입니다.
//! - `completion`: 언어 모델(텍스트 생성 서버) 호출
//! - `prompts`: few-shot 프롬프트 템플릿
//! - `extraction`: 모델 출력에서 단어/힌트/판정 추출
//! - `trainer`: 플래시카드 라운드 컨트롤러

pub mod completion;
pub mod extraction;
pub mod prompts;
pub mod trainer;

pub use trainer::{Trainer, Verdict};
