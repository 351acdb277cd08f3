use super::kind::ResourceKind;
use thiserror::Error;

/// 分类不在资源类型的可选范围内
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} category '{value}', expected one of: {}", .kind.categories().join(", "))]
pub struct UnknownCategory {
    pub kind: ResourceKind,
    pub value: String,
}

/// 解析分类（不区分大小写），未提供时使用默认分类
pub fn resolve_category(
    kind: ResourceKind,
    value: Option<&str>,
) -> Result<&'static str, UnknownCategory> {
    let value = match value.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(kind.default_category()),
    };

    kind.categories()
        .iter()
        .copied()
        .find(|category| category.eq_ignore_ascii_case(value))
        .ok_or_else(|| UnknownCategory {
            kind,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_category_falls_back() {
        assert_eq!(resolve_category(ResourceKind::Blog, None), Ok("General"));
        assert_eq!(resolve_category(ResourceKind::Blog, Some("  ")), Ok("General"));
    }

    #[test]
    fn test_category_is_canonicalized() {
        assert_eq!(resolve_category(ResourceKind::Blog, Some("events")), Ok("Events"));
        assert_eq!(
            resolve_category(ResourceKind::Career, Some("NON-TEACHING")),
            Ok("Non-Teaching")
        );
    }

    #[test]
    fn test_unknown_category() {
        let err = resolve_category(ResourceKind::Gallery, Some("Exams")).unwrap_err();
        assert_eq!(err.value, "Exams");
        assert!(err.to_string().contains("Campus"));
    }
}
