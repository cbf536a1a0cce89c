use chrono::{DateTime, Utc};
use domain::{Comment, CommentStatus, TrekSlug};
use sqlx::FromRow;

#[derive(FromRow)]
pub(crate) struct SqlComment {
    pub id: i64,
    pub trek_slug: String,
    pub name: String,
    pub email: String,
    pub body: String,
    pub identity_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        Comment {
            id: sql.id.to_string(),
            trek_slug: TrekSlug::new_unchecked(sql.trek_slug),
            name: sql.name,
            email: sql.email,
            body: sql.body,
            // 本地库即发即显，读出即 approved
            status: CommentStatus::Approved,
            identity_hash: sql.identity_hash,
            created_at: sql.created_at,
        }
    }
}
