use crate::mail::Mailer;
use crate::recaptcha::RecaptchaVerifier;
use adapter::CommentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CommentStore>,
    // 未配置密钥时为 None，流水线跳过 bot 校验环节
    pub recaptcha: Option<Arc<RecaptchaVerifier>>,
    // 未配置凭据时为 None，询价接口直接报未配置
    pub mailer: Option<Arc<Mailer>>,
}
