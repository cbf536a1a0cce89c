use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

const VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";
const MIN_SCORE: f64 = 0.5;
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// 第三方 bot 置信分校验。仅在配置了密钥时构建；
/// 请求里没带 token 的提交由调用方直接跳过本环节。
pub struct RecaptchaVerifier {
    secret: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    score: Option<f64>,
}

// v3 带置信分；v2 响应无 score 字段，仅看 success
fn passes(resp: &VerifyResponse) -> bool {
    resp.success && resp.score.unwrap_or(1.0) >= MIN_SCORE
}

impl RecaptchaVerifier {
    pub fn new(secret: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("Failed to build reCAPTCHA HTTP client")?;
        Ok(Self { secret, http })
    }

    pub async fn verify(&self, token: &str) -> Result<bool> {
        let resp = self
            .http
            .post(VERIFY_URL)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .context("reCAPTCHA verify request failed")?;

        let data: VerifyResponse = resp.json().await.context("Invalid reCAPTCHA response")?;
        Ok(passes(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_threshold_is_half_inclusive() {
        assert!(passes(&VerifyResponse {
            success: true,
            score: Some(0.9)
        }));
        assert!(passes(&VerifyResponse {
            success: true,
            score: Some(0.5)
        }));
        assert!(!passes(&VerifyResponse {
            success: true,
            score: Some(0.3)
        }));
        assert!(!passes(&VerifyResponse {
            success: false,
            score: Some(0.9)
        }));
    }

    #[test]
    fn missing_score_only_checks_success() {
        assert!(passes(&VerifyResponse {
            success: true,
            score: None
        }));
        assert!(!passes(&VerifyResponse {
            success: false,
            score: None
        }));
    }

    #[test]
    fn decodes_siteverify_payload() {
        let data: VerifyResponse =
            serde_json::from_str(r#"{"success": true, "score": 0.7, "action": "comment"}"#)
                .unwrap();
        assert!(data.success);
        assert_eq!(data.score, Some(0.7));
    }
}
