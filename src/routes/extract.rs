//! # 요청 본문 추출기
//!
//! axum의 `Json`/`Form` 추출기를 감싸서, 본문을 읽지 못했을 때도
//! `AppError::BadRequest`의 JSON 에러 본문(`{ "error": { ... } }`)으로 응답하게 합니다.
//!
//! axum 기본 추출기는 타입이 맞지 않는 본문에 평문 422를 돌려주기 때문에,
//! 브라우저 쪽 스크립트가 에러 메시지를 읽을 수 없습니다.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON 요청 본문. 역직렬화에 실패하면 400
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `application/x-www-form-urlencoded` 요청 본문. 해석에 실패하면 400
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct FormBody<T>(pub T);
