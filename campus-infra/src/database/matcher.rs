//! 内存后端使用的条件匹配与排序比较

use campus_api::document::query::Condition;
use campus_api::document::{Sort, SortOrder};
use serde_json::Value;
use std::cmp::Ordering;

/// 按点分路径查找字段
pub fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

/// 判断文档是否满足条件
pub fn matches(document: &Value, condition: &Condition) -> bool {
    match condition {
        Condition::Empty => true,
        Condition::And { left, right } => matches(document, left) && matches(document, right),
        Condition::Or { left, right } => matches(document, left) || matches(document, right),
        Condition::Equal { index_name, value } => match lookup(document, index_name) {
            Some(Value::Array(items)) if !value.is_array() => items.contains(value),
            Some(field) => field == value,
            None => value.is_null(),
        },
        Condition::Contains { index_name, value } => {
            let needle = value.to_lowercase();
            match lookup(document, index_name) {
                Some(Value::String(text)) => text.to_lowercase().contains(&needle),
                Some(Value::Array(items)) => items.iter().any(|item| {
                    item.as_str()
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                }),
                _ => false,
            }
        }
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// 比较两个字段值，缺失与null视为最小
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// 按排序规则比较两个文档
pub fn compare_documents(a: &Value, b: &Value, sort: &[Sort]) -> Ordering {
    sort.iter()
        .map(|rule| {
            let ordering = compare_values(lookup(a, &rule.field), lookup(b, &rule.field));
            match rule.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
