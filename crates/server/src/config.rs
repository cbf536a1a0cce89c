use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub security: SecuritySettings,
    pub mail: MailSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

/// 评论存储后端，配置期二选一
#[derive(Deserialize, Clone)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum StoreSettings {
    Sqlite {
        url: String,
    },
    Airtable {
        api_key: String,
        base_id: String,
        #[serde(default = "default_table")]
        table: String,
    },
}

fn default_table() -> String {
    "Comments".to_string()
}

#[derive(Deserialize, Clone)]
pub struct SecuritySettings {
    // 为空即关闭 reCAPTCHA 校验环节
    pub recaptcha_secret: String,
}

#[derive(Deserialize, Clone)]
pub struct MailSettings {
    // 为空即邮件服务未配置，询价接口返回 500
    pub api_key: String,
    pub contact_email: String,
    pub from_address: String,
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars();

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("store.mode", "sqlite")?
            .set_default("store.url", "sqlite://data/comments.db")?
            .set_default("security.recaptcha_secret", "")?
            .set_default("mail.api_key", "")?
            .set_default("mail.contact_email", "")?
            .set_default(
                "mail.from_address",
                "Wander Warriors <onboarding@resend.dev>",
            )?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map)
                    .expect("Environment variables should serialize to JSON"),
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("TREKSITE_"))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches("TREKSITE_")
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
