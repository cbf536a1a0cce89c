use crate::{models::SqlComment, Db};
use chrono::{DateTime, Utc};
use domain::{Comment, NewComment};

impl Db {
    // 写入评论；created_at 在此处分配，之后不再变更
    pub async fn insert_comment(&self, c: &NewComment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (trek_slug, name, email, body, identity_hash, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(c.trek_slug.as_str())
        .bind(&c.name)
        .bind(&c.email)
        .bind(&c.body)
        .bind(&c.identity_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_for_trek(&self, trek_slug: &str) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT id, trek_slug, name, email, body, identity_hash, created_at
            FROM comments
            WHERE trek_slug = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(trek_slug)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    // 限流窗口查询：同一 identity_hash 在 since 之后的条数
    pub async fn count_recent_by_identity(
        &self,
        identity_hash: &str,
        since: DateTime<Utc>,
    ) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM comments
            WHERE identity_hash = ? AND created_at >= ?
            "#,
        )
        .bind(identity_hash)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
