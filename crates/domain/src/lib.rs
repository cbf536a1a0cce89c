mod filter;
mod identity;
mod models;
mod submission;

pub use filter::{has_excessive_links, is_spam, link_token_count};
pub use identity::{identity_token, UNKNOWN_ADDR};
pub use models::{Comment, CommentStatus, NewComment, TrekSlug};
pub use submission::{is_valid_email, validate, Rejection, SubmissionInput, ValidComment};
