//! 评论正文的无状态内容过滤：垃圾模式匹配与链接计数。

/// 药品/博彩/中奖类关键词，大小写不敏感，按词边界匹配
const SPAM_KEYWORDS: &[&str] = &[
    "viagra", "cialis", "casino", "poker", "lottery", "winner", "prize",
];

/// 推销话术短语
const SPAM_PHRASES: &[&str] = &["click here", "buy now", "limited offer", "act now"];

/// URL 尾部非空白字符达到该长度即视为垃圾
const LONG_URL_TAIL: usize = 30;
/// 连续数字达到该长度（且处于词边界上）即视为垃圾
const DIGIT_RUN: usize = 10;
/// 同一字符连续重复达到该次数即视为垃圾
const REPEAT_RUN: usize = 10;

/// 五类垃圾模式，命中任意一类即拒绝；类间顺序无意义
pub fn is_spam(body: &str) -> bool {
    let lower = body.to_lowercase();
    SPAM_KEYWORDS.iter().any(|w| contains_word(&lower, w))
        || SPAM_PHRASES.iter().any(|p| contains_word(&lower, p))
        || has_long_url(&lower)
        || has_digit_run(body)
        || has_repeat_run(body)
}

/// 统计 `http` 与 `www.` 子串的非重叠出现次数，从左到右扫描。
/// 刻意不去重：`https` 计一次（其 `http` 前缀），同一 URL 同时含
/// `http` 与 `www.` 时计两次。阈值语义依赖这一点，不要"修复"。
pub fn link_token_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    let bytes = lower.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"http") || bytes[i..].starts_with(b"www.") {
            count += 1;
            i += 4;
        } else {
            i += 1;
        }
    }
    count
}

/// 超过 2 个链接记号即拒绝
pub fn has_excessive_links(text: &str) -> bool {
    link_token_count(text) > 2
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `needle` 以词边界形式出现于 `haystack`（两者均已小写）
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let at = start + pos;
        let end = at + needle.len();
        let before_ok = haystack[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }
        start = at + 1;
    }
    false
}

/// `http://` 或 `https://` 后跟 30+ 个非空白字符
fn has_long_url(lower: &str) -> bool {
    let bytes = lower.as_bytes();
    let mut i = 0;
    while let Some(pos) = lower[i..].find("http") {
        let mut j = i + pos + 4;
        if bytes.get(j) == Some(&b's') {
            j += 1;
        }
        if lower[j..].starts_with("://") {
            let tail = lower[j + 3..]
                .chars()
                .take_while(|c| !c.is_whitespace())
                .count();
            if tail >= LONG_URL_TAIL {
                return true;
            }
        }
        i += pos + 4;
    }
    false
}

/// 词边界上的 10+ 位连续数字（嵌在字母数字词内的不算）
fn has_digit_run(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let before_ok = start == 0 || !is_word_char(chars[start - 1]);
            let after_ok = i == chars.len() || !is_word_char(chars[i]);
            if i - start >= DIGIT_RUN && before_ok && after_ok {
                return true;
            }
        } else {
            i += 1;
        }
    }
    false
}

fn has_repeat_run(text: &str) -> bool {
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run >= REPEAT_RUN {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_bodies_pass() {
        assert!(!is_spam("Amazing trek, highly recommend the guides!"));
        assert!(!is_spam("We walked 123456789 steps in 21 days."));
        assert!(!is_spam("Sunrise from Poon Hill was unforgettable."));
        assert!(!is_spam("Tea houses at www.example.com were lovely."));
    }

    #[test]
    fn keywords_match_case_insensitively_on_word_boundaries() {
        assert!(is_spam("Best CASINO in town"));
        assert!(is_spam("you are a winner!"));
        assert!(is_spam("cheap viagra here"));
        // 词内出现不命中
        assert!(!is_spam("the winners were announced"));
        assert!(!is_spam("casinos are not my thing"));
    }

    #[test]
    fn promo_phrases_are_rejected() {
        assert!(is_spam("Click HERE for a great deal"));
        assert!(is_spam("buy now while stocks last"));
        assert!(is_spam("this is a limited offer"));
        assert!(is_spam("ACT NOW or miss out"));
        assert!(!is_spam("the clicking sound of crampons here"));
    }

    #[test]
    fn long_url_tails_are_rejected() {
        let long = format!("see http://spam.example/{}", "abc".repeat(12));
        assert!(is_spam(&long));
        let long_s = format!("see https://{}", "ab.c/".repeat(6));
        assert!(is_spam(&long_s));
        // 短 URL 不触发本规则
        assert!(!is_spam("see http://ex.am/short for photos of the pass"));
    }

    #[test]
    fn digit_runs_need_ten_and_word_boundaries() {
        assert!(is_spam("call 1234567890 for deals"));
        assert!(is_spam("12345678901"));
        assert!(!is_spam("only 123456789 here, nine digits"));
        // 嵌在词里的数字串不在边界上
        assert!(!is_spam("ref a1234567890 is our booking code"));
    }

    #[test]
    fn repeated_characters_are_rejected_at_ten() {
        assert!(is_spam(&"a".repeat(10)));
        assert!(is_spam("wow!!!!!!!!!! such trek"));
        assert!(!is_spam(&format!("{} fine", "a".repeat(9))));
    }

    #[test]
    fn link_tokens_count_without_dedup() {
        assert_eq!(link_token_count("no links at all"), 0);
        // https 只按其 http 前缀计一次
        assert_eq!(link_token_count("https://a.example"), 1);
        // 同一 URL 同时含 http 与 www. 计两次
        assert_eq!(link_token_count("http://www.example.com"), 2);
        assert_eq!(
            link_token_count("www.a.com and www.b.com and www.c.com"),
            3
        );
        assert_eq!(link_token_count("WWW.UPPER.COM and HTTP://x.y"), 2);
    }

    #[test]
    fn more_than_two_link_tokens_is_excessive() {
        assert!(!has_excessive_links("http://a.example and www.b.example"));
        // 单个 URL 双计 + 再一个即超限
        assert!(has_excessive_links(
            "http://www.example.com plus www.other.com"
        ));
        assert!(has_excessive_links(
            "www.a.com www.b.com www.c.com"
        ));
    }
}
