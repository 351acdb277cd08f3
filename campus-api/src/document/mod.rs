pub mod client;
pub mod error;
pub mod query;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use client::DocumentClient;
pub use error::{RepositoryError, RepositoryResult};

/// Metadata 包含由存储层维护的文档元数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// 创建时由存储层分配，之后不可修改
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Metadata {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// 由存储层维护的字段，更新时忽略客户端提供的值
pub const METADATA_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// Document trait 是所有持久化文档的基础trait
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn metadata(&self) -> &Metadata;
    fn metadata_mut(&mut self) -> &mut Metadata;
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// 排序字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// ListOptions 用于查询文档
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOptions {
    /// 查询条件，为空时匹配所有文档
    pub condition: Option<query::Condition>,
    /// 页码，从1开始
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Vec<Sort>,
}

impl ListOptions {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_SIZE: u32 = 10;

    /// 转换为查询条件
    pub fn to_condition(&self) -> query::Condition {
        self.condition.clone().unwrap_or_else(query::Condition::empty)
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(Self::DEFAULT_PAGE).max(1)
    }

    pub fn size(&self) -> u32 {
        self.size.unwrap_or(Self::DEFAULT_SIZE).max(1)
    }

    /// 需要跳过的文档数
    pub fn skip(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.size())
    }
}

/// ListResult 包含分页查询结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> ListResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(u64::from(page_size))
        };
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }

    /// 转换列表项，保留分页信息
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResult<U> {
        ListResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
