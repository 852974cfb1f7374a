#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use futures_util::future::BoxFuture;
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use wortschatz::{
    db,
    middleware::session::SessionKeys,
    routes::{router, AppState},
    services::{
        completion::{CompletionError, TextCompletion},
        Trainer,
    },
};

/// Completion service that replies with a fixed text (or fails) and records prompts.
#[derive(Default)]
pub struct ScriptedCompletion {
    reply: Mutex<Option<String>>,
    prompts: Mutex<Vec<(String, u32)>>,
}

impl ScriptedCompletion {
    pub fn reply_with(&self, text: &str) {
        *self.reply.lock().unwrap() = Some(text.to_string());
    }

    pub fn fail(&self) {
        *self.reply.lock().unwrap() = None;
    }

    pub fn prompts(&self) -> Vec<(String, u32)> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextCompletion for ScriptedCompletion {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        max_new_tokens: u32,
    ) -> BoxFuture<'a, Result<String, CompletionError>> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), max_new_tokens));
        let reply = self
            .reply
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CompletionError::Status {
                status: 503,
                body: "model offline".to_string(),
            });
        Box::pin(async move { reply })
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub completion: Arc<ScriptedCompletion>,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::connect("sqlite::memory:", 1).await.unwrap();
        let completion = Arc::new(ScriptedCompletion::default());

        let state = AppState {
            pool: pool.clone(),
            trainer: Arc::new(Trainer::new(completion.clone())),
            session: SessionKeys::new("test-secret", 1, false),
            display_timezone: chrono_tz::Europe::Berlin,
        };

        Self {
            router: router(state, "static"),
            pool,
            completion,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, path: &str, body: Value, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn post_raw(
        &self,
        path: &str,
        content_type: &str,
        body: &str,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Posts the login/signup form. Values must not need URL encoding.
    pub async fn post_form(&self, body: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn signup(&self, full_name: &str, email: &str, password: &str) -> Response<Body> {
        self.post_form(&format!(
            "signup=signup&fullname={full_name}&email={email}&password={password}"
        ))
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Response<Body> {
        self.post_form(&format!("login=login&email={email}&password={password}"))
            .await
    }

    /// Signs up and logs in, returning the `Cookie` header value for the session.
    pub async fn logged_in(&self, email: &str) -> String {
        self.signup("Anna", email, "hunter2").await;
        let response = self.login(email, "hunter2").await;
        session_cookie(&response).expect("login should set a session cookie")
    }

    pub async fn account_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn history_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM score_history")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// `name=value` of a non-empty cookie set by the response.
pub fn cookie_set(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response).into_iter().find_map(|cookie| {
        let pair = cookie.split(';').next()?.trim().to_string();
        let (cookie_name, value) = pair.split_once('=')?;
        (cookie_name == name && !value.is_empty()).then_some(pair)
    })
}

pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    cookie_set(response, "session")
}

/// Whether the response expires the named cookie.
pub fn cookie_cleared(response: &Response<Body>, name: &str) -> bool {
    set_cookies(response)
        .iter()
        .any(|cookie| cookie.starts_with(&format!("{name}=;")) && cookie.contains("Max-Age=0"))
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
