use thiserror::Error;

/// 提交被拒的完整分类。Display 即面向用户的文案：
/// 用户可修正的错误给出具体提示，反滥用类错误刻意含糊。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Invalid submission")]
    Honeypot,
    #[error("Name is required")]
    MissingName,
    #[error("Email is required")]
    MissingEmail,
    #[error("Comment is required")]
    MissingBody,
    #[error("Name must be less than 50 characters")]
    NameTooLong,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Comment must be at least 10 characters")]
    BodyTooShort,
    #[error("Comment must be less than 500 characters")]
    BodyTooLong,
    #[error("reCAPTCHA verification failed. Please try again.")]
    BotCheckFailed,
    #[error("Comment contains prohibited content. Please review and try again.")]
    SpamContent,
    #[error("Too many links in comment. Maximum 2 links allowed.")]
    TooManyLinks,
    #[error("You can only submit one comment every 30 minutes. Please try again later.")]
    RateLimited,
    #[error("Failed to submit comment. Please try again.")]
    Storage,
}

/// 表单原始输入，未经裁剪
#[derive(Debug, Clone, Default)]
pub struct SubmissionInput {
    pub name: String,
    pub email: String,
    pub body: String,
    pub honeypot: Option<String>,
}

/// 通过基础校验后的裁剪结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidComment {
    pub name: String,
    pub email: String,
    pub body: String,
}

const NAME_MAX: usize = 50;
const BODY_MIN: usize = 10;
const BODY_MAX: usize = 500;

/// 固定顺序的基础校验（蜜罐 → 必填 → 长度/格式），首错即返
pub fn validate(input: &SubmissionInput) -> Result<ValidComment, Rejection> {
    if let Some(trap) = &input.honeypot {
        if !trap.trim().is_empty() {
            return Err(Rejection::Honeypot);
        }
    }

    let name = input.name.trim();
    let email = input.email.trim();
    let body = input.body.trim();

    if name.is_empty() {
        return Err(Rejection::MissingName);
    }
    if email.is_empty() {
        return Err(Rejection::MissingEmail);
    }
    if body.is_empty() {
        return Err(Rejection::MissingBody);
    }

    if name.chars().count() > NAME_MAX {
        return Err(Rejection::NameTooLong);
    }
    if !is_valid_email(email) {
        return Err(Rejection::InvalidEmail);
    }

    let body_len = body.chars().count();
    if body_len < BODY_MIN {
        return Err(Rejection::BodyTooShort);
    }
    if body_len > BODY_MAX {
        return Err(Rejection::BodyTooLong);
    }

    Ok(ValidComment {
        name: name.to_string(),
        email: email.to_string(),
        body: body.to_string(),
    })
}

/// `local@host.tld` 形状检查：无空白、恰好一个 @、
/// 主机部分含一个非首非尾的点
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, host)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || host.contains('@') {
        return false;
    }
    host.char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < host.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, body: &str) -> SubmissionInput {
        SubmissionInput {
            name: name.to_string(),
            email: email.to_string(),
            body: body.to_string(),
            honeypot: None,
        }
    }

    #[test]
    fn accepts_and_trims_a_valid_submission() {
        let got = validate(&input(
            "  Alex  ",
            " alex@example.com ",
            "  Amazing trek, highly recommend the guides!  ",
        ))
        .unwrap();
        assert_eq!(got.name, "Alex");
        assert_eq!(got.email, "alex@example.com");
        assert_eq!(got.body, "Amazing trek, highly recommend the guides!");
    }

    #[test]
    fn honeypot_wins_over_everything_else() {
        let mut i = input("Alex", "alex@example.com", "Amazing trek, highly recommend!");
        i.honeypot = Some("gotcha".to_string());
        assert_eq!(validate(&i), Err(Rejection::Honeypot));

        // 纯空白的蜜罐视同为空
        i.honeypot = Some("   ".to_string());
        assert!(validate(&i).is_ok());
    }

    #[test]
    fn required_fields_after_trim() {
        assert_eq!(
            validate(&input("   ", "a@b.c", "long enough body")),
            Err(Rejection::MissingName)
        );
        assert_eq!(
            validate(&input("Alex", "  ", "long enough body")),
            Err(Rejection::MissingEmail)
        );
        assert_eq!(
            validate(&input("Alex", "a@b.c", "\t\n")),
            Err(Rejection::MissingBody)
        );
    }

    #[test]
    fn name_length_bound() {
        let long = "x".repeat(51);
        assert_eq!(
            validate(&input(&long, "a@b.c", "long enough body")),
            Err(Rejection::NameTooLong)
        );
        let max = "x".repeat(50);
        assert!(validate(&input(&max, "a@b.c", "long enough body")).is_ok());
    }

    #[test]
    fn body_length_bounds() {
        assert_eq!(
            validate(&input("Alex", "a@b.c", "too short")),
            Err(Rejection::BodyTooShort)
        );
        // 恰好 10 个字符可通过
        assert!(validate(&input("Alex", "a@b.c", "10 chars ok")).is_ok());
        let long = "y".repeat(501);
        assert_eq!(
            validate(&input("Alex", "a@b.c", &long)),
            Err(Rejection::BodyTooLong)
        );
        let max = "y".repeat(500);
        assert!(validate(&input("Alex", "a@b.c", &max)).is_ok());
    }

    #[test]
    fn email_shapes() {
        for good in [
            "alex@example.com",
            "a@b.c",
            "first.last@mail.example.org",
            "x@sub.domain.io",
        ] {
            assert!(is_valid_email(good), "{good} should be valid");
        }
        for bad in [
            "",
            "plain",
            "no-at.example.com",
            "two@@at.com",
            "a@b@c.d",
            "spaces in@mail.com",
            "a@nodot",
            "a@tld.",
            "a@.tld",
            "@example.com",
        ] {
            assert!(!is_valid_email(bad), "{bad} should be invalid");
        }
    }
}
