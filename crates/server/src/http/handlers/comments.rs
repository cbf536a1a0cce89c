use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::pipeline;
use crate::state::AppState;
use domain::{Rejection, SubmissionInput, TrekSlug, UNKNOWN_ADDR};

type ApiError = (StatusCode, Json<Value>);

fn bad_request(msg: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg.into() })))
}

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub name: String,
    pub email: String,
    pub comment: String,
    #[serde(default)]
    pub honeypot: Option<String>,
    #[serde(default, rename = "recaptchaToken")]
    pub recaptcha_token: Option<String>,
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let slug = TrekSlug::new(slug).map_err(bad_request)?;

    let comments = state.store.fetch_visible(&slug).await.map_err(|e| {
        tracing::error!("Error fetching comments: {e:#}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch comments", "details": e.to_string() })),
        )
    })?;

    Ok(Json(json!({ "comments": comments, "count": comments.len() })))
}

pub async fn post_comment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let slug = TrekSlug::new(slug).map_err(bad_request)?;
    let client_addr = client_addr(&headers);

    let input = SubmissionInput {
        name: payload.name,
        email: payload.email,
        body: payload.comment,
        honeypot: payload.honeypot,
    };

    let message = pipeline::submit(
        state.store.as_ref(),
        state.recaptcha.as_deref(),
        &slug,
        &input,
        payload.recaptcha_token.as_deref(),
        &client_addr,
    )
    .await
    .map_err(rejection_into_response)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": message })),
    ))
}

// 校验/策略类 400，限流 429，存储失败 500
fn rejection_into_response(r: Rejection) -> ApiError {
    let status = match r {
        Rejection::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        Rejection::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": r.to_string() })))
}

/// x-forwarded-for 首项优先，其次 x-real-ip，最后退回哨兵值
fn client_addr(headers: &HeaderMap) -> String {
    if let Some(xff) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = xff.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(real) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real = real.trim();
        if !real.is_empty() {
            return real.to_string();
        }
    }
    UNKNOWN_ADDR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarded_for_takes_the_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            "203.0.113.7, 10.0.0.1, 172.16.0.9".parse().unwrap(),
        );
        headers.insert("x-real-ip", "198.51.100.1".parse().unwrap());
        assert_eq!(client_addr(&headers), "203.0.113.7");
    }

    #[test]
    fn real_ip_is_the_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "198.51.100.1".parse().unwrap());
        assert_eq!(client_addr(&headers), "198.51.100.1");
    }

    #[test]
    fn no_address_headers_yields_the_sentinel() {
        assert_eq!(client_addr(&HeaderMap::new()), UNKNOWN_ADDR);
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "   ".parse().unwrap());
        assert_eq!(client_addr(&headers), UNKNOWN_ADDR);
    }

    #[test]
    fn rejections_map_to_the_documented_statuses() {
        assert_eq!(
            rejection_into_response(Rejection::RateLimited).0,
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            rejection_into_response(Rejection::Storage).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            rejection_into_response(Rejection::Honeypot).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            rejection_into_response(Rejection::SpamContent).0,
            StatusCode::BAD_REQUEST
        );
    }
}
