use adapter::{CommentStore, StoreMode};
use chrono::{Duration, Utc};
use domain::{identity_token, NewComment, Rejection, SubmissionInput, TrekSlug};
use tracing::{error, warn};

use crate::recaptcha::RecaptchaVerifier;

/// 同一身份 30 分钟内只收一条
const RATE_LIMIT_WINDOW_MINS: i64 = 30;

pub const MSG_PUBLISHED: &str =
    "Thank you for your feedback! Your comment has been posted successfully.";
pub const MSG_PENDING: &str =
    "Thank you for your feedback! Your comment has been submitted and is pending review.";

/// 提交流水线，固定顺序、首败即返：
/// 蜜罐 → 必填/长度/格式 → 可选 bot 校验 → 垃圾模式 → 链接数 → 限流 → 落库。
/// 任何一步失败都不会触达存储；成功时恰好写入一条。
pub async fn submit(
    store: &dyn CommentStore,
    verifier: Option<&RecaptchaVerifier>,
    trek_slug: &TrekSlug,
    input: &SubmissionInput,
    recaptcha_token: Option<&str>,
    client_addr: &str,
) -> Result<&'static str, Rejection> {
    let valid = domain::validate(input)?;

    // 配置了密钥且请求带 token 才启用；未配置视为环节不存在
    if let (Some(verifier), Some(token)) = (
        verifier,
        recaptcha_token.filter(|t| !t.trim().is_empty()),
    ) {
        match verifier.verify(token).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("reCAPTCHA verification failed");
                return Err(Rejection::BotCheckFailed);
            }
            Err(e) => {
                // 已配置的校验环节不可静默放行，服务异常按拒绝处理
                warn!("reCAPTCHA service error: {e:#}");
                return Err(Rejection::BotCheckFailed);
            }
        }
    }

    if domain::is_spam(&valid.body) {
        warn!(trek = %trek_slug, "Spam pattern detected in comment");
        return Err(Rejection::SpamContent);
    }
    if domain::has_excessive_links(&valid.body) {
        return Err(Rejection::TooManyLinks);
    }

    let identity_hash = identity_token(client_addr);
    if !rate_limit_allows(store, &identity_hash).await {
        return Err(Rejection::RateLimited);
    }

    let new_comment = NewComment {
        trek_slug: trek_slug.clone(),
        name: valid.name,
        email: valid.email,
        body: valid.body,
        identity_hash,
    };
    if let Err(e) = store.create(&new_comment).await {
        // 后端细节不外泄，对外只给通用失败文案
        error!("Failed to persist comment: {e:#}");
        return Err(Rejection::Storage);
    }

    Ok(match store.mode() {
        StoreMode::AutoApprove => MSG_PUBLISHED,
        StoreMode::Moderated => MSG_PENDING,
    })
}

/// 窗口内有任何记录即拒绝；存储查询失败按放行处理（fail-open），
/// 可用性优先于严格限流
async fn rate_limit_allows(store: &dyn CommentStore, identity_hash: &str) -> bool {
    let since = Utc::now() - Duration::minutes(RATE_LIMIT_WINDOW_MINS);
    match store.count_recent(identity_hash, since).await {
        Ok(n) => n == 0,
        Err(e) => {
            warn!("Rate limit check failed, allowing submission: {e:#}");
            true
        }
    }
}
