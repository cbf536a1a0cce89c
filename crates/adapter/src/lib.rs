mod drivers;
mod traits;

pub use drivers::airtable::AirtableConfig;
pub use traits::{CommentStore, StoreMode};

use anyhow::Result;
use drivers::{airtable::AirtableStore, sqlite::SqliteStore};
use std::sync::Arc;
use storage::Db;
use tracing::info;

/// 配置期二选一的评论存储后端
#[derive(Clone)]
pub enum StoreConfig {
    Sqlite { url: String },
    Airtable(AirtableConfig),
}

/// 进程启动时调用一次；构建失败直接上抛（报告一次），
/// 绝不在每次请求里静默重建客户端
pub async fn connect(config: StoreConfig) -> Result<Arc<dyn CommentStore>> {
    match config {
        StoreConfig::Sqlite { url } => {
            info!("Initializing comment store in SQLITE (auto-approve) mode...");
            let db = Db::new(&url).await?;
            Ok(Arc::new(SqliteStore::new(db)))
        }
        StoreConfig::Airtable(conf) => {
            info!("Initializing comment store in AIRTABLE (moderated) mode...");
            Ok(Arc::new(AirtableStore::new(conf)?))
        }
    }
}
