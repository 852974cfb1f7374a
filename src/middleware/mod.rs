//! # 미들웨어 / 추출기(Extractor)
//!
//! - `session`: 서명된 세션 쿠키 발급과 검증, 로그인 사용자 추출기
//! - `flash`: 리다이렉트 뒤에 한 번만 보여주는 알림 쿠키

pub mod flash;
pub mod session;
