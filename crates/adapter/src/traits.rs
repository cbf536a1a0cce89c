use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Comment, NewComment, TrekSlug};

/// 后端可见性模式：决定提交成功后的确认话术
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// 写入即公开可见
    AutoApprove,
    /// 写入后进入待审队列
    Moderated,
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    fn mode(&self) -> StoreMode;

    /// 持久化一条评论；id 与 created_at 由后端分配
    async fn create(&self, comment: &NewComment) -> Result<()>;

    /// 公开可见的评论集合，按 created_at 倒序
    async fn fetch_visible(&self, trek_slug: &TrekSlug) -> Result<Vec<Comment>>;

    /// 限流查询：该 identity_hash 自 since 起的提交条数
    async fn count_recent(&self, identity_hash: &str, since: DateTime<Utc>) -> Result<i64>;
}
