//! # 텍스트 생성(Completion) 서비스
//!
//! 언어 모델에 프롬프트를 보내고 생성된 텍스트를 받아오는 모듈입니다.
//! 모델 자체는 외부 서버(text-generation-inference 형식의 `/generate`)가 실행하며,
//! 이 서버는 "프롬프트 하나 → 텍스트 하나"의 단일 호출만 사용합니다.
//!
//! - `TextCompletion`: 생성 서비스를 추상화한 트레이트. 핸들러는 이 트레이트만 알고,
//!   테스트에서는 정해진 응답을 돌려주는 구현으로 바꿔 끼웁니다.
//! - `HttpCompletion`: reqwest로 실제 생성 서버를 호출하는 구현
//!
//! 재시도는 하지 않습니다. 실패하면 그 요청은 그대로 실패합니다.

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;

/// 생성 호출 실패
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request timed out")]
    Timeout,

    #[error("completion transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("completion server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),

    /// 동시 실행 제한(semaphore)이 닫혀 더 이상 요청을 받을 수 없음
    #[error("completion service is shutting down")]
    Closed,
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CompletionError::Timeout
        } else {
            CompletionError::Transport(err)
        }
    }
}

/// 프롬프트를 받아 생성된 텍스트를 돌려주는 서비스
///
/// 트레이트 객체(`Arc<dyn TextCompletion>`)로 주입되므로
/// `async fn` 대신 `BoxFuture`를 반환합니다.
pub trait TextCompletion: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        max_new_tokens: u32,
    ) -> BoxFuture<'a, Result<String, CompletionError>>;
}

/// 샘플링 파라미터
#[derive(Debug, Clone, Copy)]
pub struct Sampling {
    pub temperature: f32,
    pub top_p: f32,
    /// true이면 생성 서버가 프롬프트 + 생성문 전체를 돌려줍니다
    pub return_full_text: bool,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.95,
            return_full_text: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    do_sample: bool,
    temperature: f32,
    top_p: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

/// `/generate`는 객체 하나를, 호스팅 추론 API는 배열을 돌려주므로 둘 다 받습니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Single(Generation),
    Batch(Vec<Generation>),
}

impl GenerateResponse {
    fn into_text(self) -> Result<String, CompletionError> {
        match self {
            GenerateResponse::Single(generation) => Ok(generation.generated_text),
            GenerateResponse::Batch(generations) => generations
                .into_iter()
                .next()
                .map(|generation| generation.generated_text)
                .ok_or_else(|| CompletionError::Malformed("empty generation list".to_string())),
        }
    }
}

/// HTTP로 생성 서버를 호출하는 `TextCompletion` 구현
///
/// 모델 하나를 프로세스 전체가 공유하는 구조를 그대로 따르기 위해
/// `Semaphore`로 동시 호출 수를 제한합니다 (기본 1 = 한 번에 하나씩).
/// 대기 중인 요청은 허가(permit)를 얻을 때까지 기다립니다.
pub struct HttpCompletion {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
    sampling: Sampling,
    gate: Semaphore,
}

impl HttpCompletion {
    pub fn new(
        endpoint: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
        max_concurrency: usize,
        sampling: Sampling,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_token,
            sampling,
            gate: Semaphore::new(max_concurrency.max(1)),
        })
    }

    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, CompletionError> {
        let _permit = self.gate.acquire().await.map_err(|_| CompletionError::Closed)?;

        let body = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens,
                do_sample: true,
                temperature: self.sampling.temperature,
                top_p: self.sampling.top_p,
                return_full_text: self.sampling.return_full_text,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(max_new_tokens, prompt_len = prompt.len(), "Requesting completion");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?
            .into_text()?;

        tracing::debug!(completion_len = text.len(), "Completion received");
        Ok(text)
    }
}

impl TextCompletion for HttpCompletion {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        max_new_tokens: u32,
    ) -> BoxFuture<'a, Result<String, CompletionError>> {
        Box::pin(self.generate(prompt, max_new_tokens))
    }
}
