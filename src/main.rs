//! # Wortschatz 웹 서버 진입점
//!
//! 이 파일은 Wortschatz 서버의 **시작점(entry point)**입니다.
//! 모듈 본체는 `lib.rs` 쪽에 있고, 여기서는 설정을 읽어 조립만 합니다.
//! (라이브러리로 분리한 덕분에 `tests/`의 통합 테스트도 같은 라우터를 사용합니다.)
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 + 마이그레이션
//! 4. 텍스트 생성 서비스 핸들 생성
//! 5. 라우터 설정
//! 6. HTTP 서버 시작

// ── 외부 크레이트 및 모듈에서 필요한 항목 가져오기 ──
use anyhow::Result; // 어떤 에러 타입이든 담을 수 있는 범용 Result (main 전용)
use std::{
    sync::Arc,          // 여러 요청이 공유하는 참조 카운트 포인터
    time::Duration,     // 생성 요청 타임아웃
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // .with(), .init()
use wortschatz::{
    config::Config,                    // 환경변수 설정
    db,                                // SQLite 연결 + 마이그레이션
    middleware::session::SessionKeys,  // 세션 쿠키 서명 설정
    routes::{self, AppState},          // 라우터와 공유 상태
    services::{
        completion::{HttpCompletion, Sampling}, // 텍스트 생성 서버 클라이언트
        Trainer,                                // 플래시카드 라운드 컨트롤러
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅 초기화 ──
    // RUST_LOG 환경변수가 있으면 그 값을, 없으면 아래 기본값을 사용합니다.
    // 예: RUST_LOG=wortschatz=info,tower_http=warn
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wortschatz=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    // 필수 값(DATABASE_URL, SESSION_SECRET)이 없거나 시간대가 잘못되면 여기서 종료됩니다.
    let config = Config::from_env()?;
    tracing::info!("Starting Wortschatz server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 + 마이그레이션 ──
    tracing::info!("Connecting to database and running migrations...");
    // 최대 5개의 연결을 재사용합니다. 쓰기는 요청마다 트랜잭션으로 묶입니다.
    let pool = db::connect(&config.database_url, 5).await?;

    // ── 5단계: 텍스트 생성 서비스 ──
    // 핸들은 여기서 한 번만 만들고, 서버가 살아 있는 동안 모든 요청이 공유합니다.
    let completion = HttpCompletion::new(
        config.completion_url.clone(),
        config.completion_api_token.clone(),
        Duration::from_secs(config.completion_timeout_secs),
        config.completion_max_concurrency,
        Sampling {
            return_full_text: config.completion_return_full_text,
            ..Sampling::default()
        },
    )?;
    tracing::info!(
        endpoint = %config.completion_url,
        max_concurrency = config.completion_max_concurrency,
        "Completion service configured"
    );

    // ── 6단계: 애플리케이션 상태(State) 생성 ──
    // AppState는 Clone되어 각 핸들러로 전달됩니다. 무거운 값은 Arc나 풀 핸들이라
    // 복제 비용이 거의 없습니다.
    let state = AppState {
        pool,
        trainer: Arc::new(Trainer::new(Arc::new(completion))),
        session: SessionKeys::new(
            config.session_secret.clone(),
            config.session_ttl_hours,
            config.secure_cookies,
        ),
        display_timezone: config.display_timezone,
    };

    // ── 7단계: 라우터 설정 ──
    let app = routes::router(state, &config.static_path);

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    // TCP 리스너: 지정된 주소에서 들어오는 연결을 대기합니다
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // 서버 시작 (Ctrl+C로 종료할 때까지 계속 실행)
    axum::serve(listener, app).await?;

    Ok(())
}
