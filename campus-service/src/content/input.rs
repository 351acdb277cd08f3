//! 创建与更新内容的输入表单
//!
//! JSON请求体与multipart文本字段都会先转换为表单，再经校验转换为输入。

use crate::error::ServiceError;
use campus_domain::CareerDetails;
use serde::Deserialize;
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// 布尔字段，接受JSON布尔值或表单字符串
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagField {
    Bool(bool),
    Text(String),
}

impl FlagField {
    pub fn parse(&self) -> Result<bool, ServiceError> {
        match self {
            Self::Bool(value) => Ok(*value),
            Self::Text(text) => parse_flag(text),
        }
    }
}

/// 解析 `true/false`、`1/0`、`yes/no`、`on/off`（不区分大小写）
pub fn parse_flag(text: &str) -> Result<bool, ServiceError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ServiceError::validation(format!(
            "'{}' is not a valid boolean value",
            other
        ))),
    }
}

/// 标签字段，接受数组、逗号分隔字符串或JSON数组字符串
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    List(Vec<String>),
    Text(String),
}

impl TagsField {
    pub fn parse(self) -> Result<Vec<String>, ServiceError> {
        let raw = match self {
            Self::List(items) => items,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.starts_with('[') {
                    serde_json::from_str::<Vec<String>>(trimmed).map_err(|e| {
                        ServiceError::validation(format!("tags must be a list of strings: {}", e))
                    })?
                } else {
                    trimmed.split(',').map(str::to_string).collect()
                }
            }
        };
        Ok(normalize_tags(raw))
    }
}

/// 去除空白与重复项，保持顺序
pub fn normalize_tags(raw: Vec<String>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 创建表单
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateContentForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub body: String,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Option<TagsField>,

    #[serde(default)]
    pub published: Option<FlagField>,

    #[serde(default)]
    pub career: Option<CareerDetails>,
}

/// 校验后的创建输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateContentInput {
    pub title: String,
    pub body: String,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub career: Option<CareerDetails>,
}

impl TryFrom<CreateContentForm> for CreateContentInput {
    type Error = ServiceError;

    fn try_from(form: CreateContentForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            title: form.title.trim().to_string(),
            body: form.body.trim().to_string(),
            summary: optional_text(form.summary),
            category: optional_text(form.category),
            tags: form.tags.map(TagsField::parse).transpose()?.unwrap_or_default(),
            published: form
                .published
                .map(|flag| flag.parse())
                .transpose()?
                .unwrap_or(false),
            career: form.career,
        })
    }
}

/// 更新表单，只包含客户端可修改的字段
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateContentForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub body: Option<String>,

    /// 空字符串表示恢复自动摘要
    #[serde(default)]
    pub summary: Option<String>,

    /// 空白表示不修改
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Option<TagsField>,

    #[serde(default)]
    pub published: Option<FlagField>,

    #[serde(default)]
    pub career: Option<CareerDetails>,
}

/// 校验后的部分更新输入，`None` 表示不修改
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateContentInput {
    pub title: Option<String>,
    pub body: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
    pub career: Option<CareerDetails>,
}

impl TryFrom<UpdateContentForm> for UpdateContentInput {
    type Error = ServiceError;

    fn try_from(form: UpdateContentForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            title: form.title.map(|t| t.trim().to_string()),
            body: form.body.map(|b| b.trim().to_string()),
            summary: form.summary.map(|s| s.trim().to_string()),
            category: optional_text(form.category),
            tags: form.tags.map(TagsField::parse).transpose()?,
            published: form.published.map(|flag| flag.parse()).transpose()?,
            career: form.career,
        })
    }
}
