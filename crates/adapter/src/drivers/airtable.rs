use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Comment, CommentStatus, NewComment, TrekSlug};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::traits::{CommentStore, StoreMode};

const API_BASE: &str = "https://api.airtable.com/v0";
// 源侧未定义超时；所有出站调用统一有界超时，避免请求悬挂
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct AirtableConfig {
    pub api_key: String,
    pub base_id: String,
    pub table: String,
}

/// 托管审核后端：新评论以 pending 入库，审核动作在外部管理台完成
pub struct AirtableStore {
    config: AirtableConfig,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct RecordList {
    records: Vec<Record>,
}

#[derive(Deserialize)]
struct Record {
    id: String,
    #[serde(rename = "createdTime")]
    created_time: DateTime<Utc>,
    fields: RecordFields,
}

#[derive(Deserialize)]
struct RecordFields {
    #[serde(default)]
    trek_slug: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    comment: String,
    status: Option<CommentStatus>,
    ip_hash: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

fn record_into_comment(r: Record) -> Comment {
    Comment {
        id: r.id,
        trek_slug: TrekSlug::new_unchecked(r.fields.trek_slug),
        name: r.fields.name,
        email: r.fields.email,
        body: r.fields.comment,
        status: r.fields.status.unwrap_or(CommentStatus::Approved),
        identity_hash: r.fields.ip_hash,
        created_at: r.fields.created_at.unwrap_or(r.created_time),
    }
}

// 过滤公式的取值只接受校验过的槽位：
// slug 经过 TrekSlug 字符集检查，identity 哈希是 base36，均无引号注入面
fn visible_formula(trek_slug: &TrekSlug) -> String {
    format!("AND({{trek_slug}}='{}', {{status}}='approved')", trek_slug)
}

fn recent_formula(identity_hash: &str, since: DateTime<Utc>) -> String {
    format!(
        "AND({{ip_hash}}='{}', IS_AFTER({{created_at}}, '{}'))",
        identity_hash,
        since.to_rfc3339()
    )
}

impl AirtableStore {
    pub fn new(config: AirtableConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("Failed to build Airtable HTTP client")?;
        Ok(Self { config, http })
    }

    fn configured(&self) -> bool {
        !self.config.api_key.is_empty() && !self.config.base_id.is_empty()
    }

    fn table_url(&self) -> String {
        format!("{}/{}/{}", API_BASE, self.config.base_id, self.config.table)
    }
}

#[async_trait]
impl CommentStore for AirtableStore {
    fn mode(&self) -> StoreMode {
        StoreMode::Moderated
    }

    async fn create(&self, c: &NewComment) -> Result<()> {
        if !self.configured() {
            return Err(anyhow!("Comment store is not configured"));
        }

        let body = serde_json::json!({
            "records": [{
                "fields": {
                    "trek_slug": c.trek_slug.as_str(),
                    "name": c.name,
                    "email": c.email,
                    "comment": c.body,
                    // 新记录一律 pending，可见性由审核翻转
                    "status": "pending",
                    "ip_hash": c.identity_hash,
                    "created_at": Utc::now().to_rfc3339(),
                }
            }]
        });

        let resp = self
            .http
            .post(self.table_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("Airtable create request failed")?;

        if !resp.status().is_success() {
            return Err(anyhow!("Airtable API error: {}", resp.status()));
        }
        Ok(())
    }

    async fn fetch_visible(&self, trek_slug: &TrekSlug) -> Result<Vec<Comment>> {
        if !self.configured() {
            warn!("Airtable credentials not configured, returning no comments");
            return Ok(Vec::new());
        }

        let resp = self
            .http
            .get(self.table_url())
            .bearer_auth(&self.config.api_key)
            .query(&[
                ("filterByFormula", visible_formula(trek_slug).as_str()),
                ("sort[0][field]", "created_at"),
                ("sort[0][direction]", "desc"),
            ])
            .send()
            .await
            .context("Airtable list request failed")?;

        if !resp.status().is_success() {
            return Err(anyhow!("Airtable API error: {}", resp.status()));
        }

        let data: RecordList = resp
            .json()
            .await
            .context("Invalid Airtable list response")?;
        Ok(data.records.into_iter().map(record_into_comment).collect())
    }

    async fn count_recent(&self, identity_hash: &str, since: DateTime<Utc>) -> Result<i64> {
        if !self.configured() {
            // 报错交给上游，限流按 fail-open 处理
            return Err(anyhow!("Comment store is not configured"));
        }

        let resp = self
            .http
            .get(self.table_url())
            .bearer_auth(&self.config.api_key)
            .query(&[
                (
                    "filterByFormula",
                    recent_formula(identity_hash, since).as_str(),
                ),
                ("maxRecords", "1"),
            ])
            .send()
            .await
            .context("Airtable rate limit query failed")?;

        if !resp.status().is_success() {
            return Err(anyhow!("Airtable API error: {}", resp.status()));
        }

        let data: RecordList = resp
            .json()
            .await
            .context("Invalid Airtable list response")?;
        Ok(data.records.len() as i64)
    }
}
