//! # 데이터 모델 모듈
//!
//! - `account`: 계정과 로그인/가입 폼
//! - `flashcard`: 단어 생성, 힌트, 채점 요청/응답
//! - `history`: 점수 기록

pub mod account;
pub mod flashcard;
pub mod history;

pub use account::*;
pub use flashcard::*;
pub use history::*;
