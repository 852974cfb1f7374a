//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `accounts`: 계정 생성/조회 (자격 증명 저장소)
//! - `history`: 점수 기록 추가/조회

pub mod accounts;
pub mod history;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// SQLite 연결 풀을 만들고 마이그레이션을 실행합니다.
///
/// 데이터베이스 파일이 없으면 새로 만듭니다.
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 테스트에서는
/// `max_connections`를 1로 지정해야 합니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    // ./migrations 폴더의 SQL 파일들을 컴파일 타임에 포함시켜 실행합니다
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
