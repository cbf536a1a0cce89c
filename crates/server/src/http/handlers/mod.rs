pub mod comments;
pub mod contact;
