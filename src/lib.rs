//! # Wortschatz
//!
//! 언어 모델이 출제하는 독일어 단어 플래시카드 트레이너 서버입니다.
//!
//! 한 라운드는 단어 생성 → (선택) 힌트 → 채점으로 이루어지며,
//! 라운드 상태는 브라우저가 들고 있습니다. 서버가 저장하는 것은
//! 계정과 점수 기록뿐입니다.
//!
//! 모듈 구성:
//! - `config`: 환경변수 설정
//! - `db`: SQLite 쿼리 (계정, 점수 기록)
//! - `error`: 에러 타입과 HTTP 응답 변환
//! - `middleware`: 세션 쿠키, 일회성 알림 쿠키
//! - `models`: 요청/응답, DB 행 구조체
//! - `routes`: HTTP 핸들러와 라우터
//! - `services`: 프롬프트, 생성 서비스, 결과 추출, 라운드 컨트롤러

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
