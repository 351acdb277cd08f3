//! 由标题和正文派生的字段

use super::constant::{EXCERPT_LENGTH, WORDS_PER_MINUTE};

/// 由标题生成slug：小写，非字母数字字符序列折叠为单个`-`，首尾不含`-`
///
/// 对已生成的slug再次调用结果不变。
pub fn slug_of(title: &str) -> String {
    slug::slugify(title)
}

pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// 预计阅读时间（分钟），至少为1
pub fn read_time(body: &str) -> u32 {
    let minutes = word_count(body).div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// 从正文截取摘要
pub fn excerpt(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= EXCERPT_LENGTH {
        return body.to_string();
    }
    let head: String = body.chars().take(EXCERPT_LENGTH).collect();
    format!("{}...", head.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_of_title() {
        assert_eq!(slug_of("Hello, World!"), "hello-world");
        assert_eq!(slug_of("  Annual   Sports Day 2024 "), "annual-sports-day-2024");
        assert_eq!(slug_of("--Science__Fair--"), "science-fair");
        assert_eq!(slug_of("!!!"), "");
    }

    #[test]
    fn test_slug_is_idempotent() {
        for title in ["Hello, World!", "Admissions Open: 2025/26", "C++ & Rust"] {
            let slug = slug_of(title);
            assert_eq!(slug_of(&slug), slug);
        }
    }

    #[test]
    fn test_read_time() {
        assert_eq!(read_time(""), 1);
        assert_eq!(read_time("one two three"), 1);
        assert_eq!(read_time(&"word ".repeat(200)), 1);
        assert_eq!(read_time(&"word ".repeat(201)), 2);
        assert_eq!(read_time(&"word\n\t".repeat(1000)), 5);
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("  short body "), "short body");

        let long = "a".repeat(200);
        let result = excerpt(&long);
        assert_eq!(result.chars().count(), EXCERPT_LENGTH + 3);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let long = "é".repeat(151);
        let result = excerpt(&long);
        assert!(result.starts_with(&"é".repeat(150)));
        assert!(result.ends_with("..."));
    }
}
