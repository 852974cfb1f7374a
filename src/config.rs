//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `SESSION_SECRET`: 세션 쿠키 서명 비밀키 (필수)
//! - `SESSION_TTL_HOURS`: 세션 토큰 유효 시간
//! - `SECURE_COOKIES`: 쿠키에 Secure 속성을 붙일지 여부
//! - `COMPLETION_URL`: 텍스트 생성 서버의 엔드포인트
//! - `COMPLETION_API_TOKEN`: 텍스트 생성 서버 인증 토큰 (선택)
//! - `COMPLETION_TIMEOUT_SECS`: 생성 요청 타임아웃
//! - `COMPLETION_MAX_CONCURRENCY`: 동시에 진행할 수 있는 생성 요청 수
//! - `COMPLETION_RETURN_FULL_TEXT`: 생성 결과에 프롬프트를 포함할지 여부
//! - `DISPLAY_TIMEZONE`: 점수 기록을 보여줄 시간대
//! - `STATIC_PATH`: 정적 파일(JS, CSS) 디렉토리
//! - `HOST`, `PORT`: 서버 바인딩 주소

use chrono_tz::Tz;
use std::env;
use thiserror::Error;

use crate::middleware::session::MAX_SESSION_TTL_HOURS;

/// 설정 로딩 실패
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 필수 환경변수가 없음
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// 시간대 이름을 해석할 수 없음 (예: "Europe/Berln")
    #[error("invalid DISPLAY_TIMEZONE {0:?}")]
    InvalidTimezone(String),
}

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/wortschatz.db")
    pub database_url: String,
    /// 세션 쿠키 서명/검증에 사용하는 비밀키
    pub session_secret: String,
    /// 세션 토큰 유효 시간 (시간 단위, 기본값: 12, 1~8760으로 제한)
    pub session_ttl_hours: i64,
    /// true이면 쿠키에 Secure 속성을 붙입니다 (HTTPS 뒤에서 운영할 때)
    pub secure_cookies: bool,
    /// 텍스트 생성 엔드포인트 (text-generation-inference의 `/generate` 형식)
    pub completion_url: String,
    /// 텍스트 생성 서버에 보낼 Bearer 토큰
    pub completion_api_token: Option<String>,
    /// 생성 요청 한 건의 최대 대기 시간 (초)
    pub completion_timeout_secs: u64,
    /// 동시에 진행할 수 있는 생성 요청 수 (기본값 1: 모델 하나를 순서대로 사용)
    pub completion_max_concurrency: usize,
    /// 생성 결과에 프롬프트까지 포함해서 돌려받을지 여부
    pub completion_return_full_text: bool,
    /// 점수 기록 타임스탬프를 표시할 시간대
    pub display_timezone: Tz,
    /// 정적 파일 디렉토리
    pub static_path: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `SESSION_SECRET`은 필수입니다.
    /// `DISPLAY_TIMEZONE`이 올바른 IANA 시간대 이름이 아니면 에러를 반환합니다.
    /// 나머지 설정은 값이 없거나 잘못되면 기본값을 사용합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        let display_timezone = env::var("DISPLAY_TIMEZONE")
            .unwrap_or_else(|_| "Europe/Berlin".to_string());

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            session_secret: required("SESSION_SECRET")?,
            session_ttl_hours: parse_or::<i64>("SESSION_TTL_HOURS", 12)
                .clamp(1, MAX_SESSION_TTL_HOURS),
            secure_cookies: parse_flag(env::var("SECURE_COOKIES").ok().as_deref()),
            completion_url: env::var("COMPLETION_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080/generate".to_string()),
            // 빈 문자열은 "토큰 없음"으로 취급합니다
            completion_api_token: env::var("COMPLETION_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            completion_timeout_secs: parse_or("COMPLETION_TIMEOUT_SECS", 120),
            // 0개의 허가(permit)로는 아무 요청도 처리할 수 없으므로 최소 1
            completion_max_concurrency: parse_or::<usize>("COMPLETION_MAX_CONCURRENCY", 1).max(1),
            completion_return_full_text: parse_flag(
                env::var("COMPLETION_RETURN_FULL_TEXT").ok().as_deref(),
            ),
            display_timezone: parse_timezone(&display_timezone)?,
            static_path: env::var("STATIC_PATH").unwrap_or_else(|_| "static".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

/// 환경변수를 읽어 T로 파싱합니다. 없거나 파싱에 실패하면 `default`를 반환합니다.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// "1", "true", "yes", "on" (대소문자 무시)만 참으로 봅니다.
fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::InvalidTimezone(name.to_string()))
}
