use serde::{Deserialize, Serialize};

/// Condition 表示查询条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Condition {
    /// 空条件（匹配所有）
    Empty,

    /// AND条件
    And {
        left: Box<Condition>,
        right: Box<Condition>,
    },

    /// OR条件
    Or {
        left: Box<Condition>,
        right: Box<Condition>,
    },

    /// 等于条件，字段为数组时匹配任一元素
    Equal {
        index_name: String,
        value: serde_json::Value,
    },

    /// 不区分大小写的子串匹配
    Contains {
        index_name: String,
        value: String,
    },
}

impl Condition {
    /// 创建空条件
    pub fn empty() -> Self {
        Self::Empty
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// AND组合，空条件不参与组合
    pub fn and(self, other: Condition) -> Self {
        match (self, other) {
            (Self::Empty, other) => other,
            (this, Self::Empty) => this,
            (this, other) => Self::And {
                left: Box::new(this),
                right: Box::new(other),
            },
        }
    }

    /// OR组合
    pub fn or(self, other: Condition) -> Self {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => Self::Empty,
            (this, other) => Self::Or {
                left: Box::new(this),
                right: Box::new(other),
            },
        }
    }
}

/// Queries 提供查询构建工具函数
pub mod queries {
    use super::Condition;
    use serde_json::Value;

    /// 创建等于条件
    pub fn equal(index_name: impl Into<String>, value: impl Into<Value>) -> Condition {
        Condition::Equal {
            index_name: index_name.into(),
            value: value.into(),
        }
    }

    /// 创建子串匹配条件
    pub fn contains(index_name: impl Into<String>, value: impl Into<String>) -> Condition {
        Condition::Contains {
            index_name: index_name.into(),
            value: value.into(),
        }
    }

    /// 任一字段包含关键词
    pub fn contains_any(index_names: &[&str], value: &str) -> Condition {
        index_names
            .iter()
            .map(|name| contains(*name, value))
            .reduce(Condition::or)
            .unwrap_or(Condition::Empty)
    }
}
