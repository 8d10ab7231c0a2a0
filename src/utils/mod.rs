pub mod ip;
pub mod url_validator;
pub mod user_agent;

/// URL-safe 别名字母表（64 字符，与 nanoid 默认字母表一致）
const ALIAS_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// 生成指定长度的随机别名
///
/// 64^21 的空间下碰撞概率可以忽略，分配路径不做存在性预检，
/// 极小概率的撞车由存储唯一约束兜底。
pub fn generate_random_alias(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| ALIAS_CHARS[rand::random_range(0..ALIAS_CHARS.len())] as char)
        .take(length)
        .collect()
}

/// 校验自定义别名格式（字母数字和 _ -，1..=64 位）
pub fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty()
        && alias.len() <= 64
        && alias
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// 组合对外短链接路径：`<base_url>/shorten/<alias>`
///
/// 路径段 `shorten` 是外部稳定契约，客户端会持久化这些链接。
pub fn short_url_path(base_url: &str, alias: &str) -> String {
    format!("{}/shorten/{}", base_url.trim_end_matches('/'), alias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_random_alias_length() {
        assert_eq!(generate_random_alias(21).len(), 21);
        assert_eq!(generate_random_alias(8).len(), 8);
        assert_eq!(generate_random_alias(0).len(), 0);
    }

    #[test]
    fn test_generate_random_alias_charset() {
        let alias = generate_random_alias(256);
        assert!(alias.bytes().all(|b| ALIAS_CHARS.contains(&b)));
    }

    #[test]
    fn test_generate_random_alias_no_short_range_collisions() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_random_alias(21)));
        }
    }

    #[test]
    fn test_is_valid_alias() {
        assert!(is_valid_alias("abc123"));
        assert!(is_valid_alias("a"));
        assert!(is_valid_alias("my-link_2024"));
        assert!(!is_valid_alias(""));
        assert!(!is_valid_alias("has space"));
        assert!(!is_valid_alias("slash/inside"));
        assert!(!is_valid_alias(&"x".repeat(65)));
    }

    #[test]
    fn test_short_url_path() {
        assert_eq!(
            short_url_path("https://lnk.example.com", "abc123"),
            "https://lnk.example.com/shorten/abc123"
        );
        // base_url 尾部斜杠不产生双斜杠
        assert_eq!(
            short_url_path("https://lnk.example.com/", "abc123"),
            "https://lnk.example.com/shorten/abc123"
        );
    }
}
