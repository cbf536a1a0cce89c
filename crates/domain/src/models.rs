use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrekSlug(String);

impl TrekSlug {
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.is_empty() {
            return Err("Trek slug is required".to_string());
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
        {
            return Err("Trek slug contains invalid characters.".to_string());
        }
        if s.len() > 64 {
            return Err("Trek slug is too long (max 64 chars).".to_string());
        }
        Ok(Self(s))
    }

    pub fn new_unchecked(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrekSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Pending,
    Approved,
    Spam,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub trek_slug: TrekSlug,
    pub name: String,
    // 仅存储，公开接口绝不下发
    #[serde(skip_serializing, default)]
    pub email: String,
    #[serde(rename = "comment")]
    pub body: String,
    pub status: CommentStatus,
    #[serde(skip_serializing, default)]
    pub identity_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 写入请求：id 与 created_at 由后端分配
#[derive(Debug, Clone)]
pub struct NewComment {
    pub trek_slug: TrekSlug,
    pub name: String,
    pub email: String,
    pub body: String,
    pub identity_hash: String,
}
