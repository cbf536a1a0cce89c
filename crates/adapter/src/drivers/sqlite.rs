use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Comment, NewComment, TrekSlug};
use storage::Db;

use crate::traits::{CommentStore, StoreMode};

/// 本地 SQLite 后端：即发即显，无审核环节
pub struct SqliteStore {
    db: Db,
}

impl SqliteStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentStore for SqliteStore {
    fn mode(&self) -> StoreMode {
        StoreMode::AutoApprove
    }

    async fn create(&self, comment: &NewComment) -> Result<()> {
        self.db.insert_comment(comment).await
    }

    async fn fetch_visible(&self, trek_slug: &TrekSlug) -> Result<Vec<Comment>> {
        self.db.list_for_trek(trek_slug.as_str()).await
    }

    async fn count_recent(&self, identity_hash: &str, since: DateTime<Utc>) -> Result<i64> {
        self.db.count_recent_by_identity(identity_hash, since).await
    }
}
