use crate::content::input::parse_flag;
use crate::error::{ServiceError, ServiceResult};
use campus_api::document::query::{queries, Condition};
use campus_api::document::{ListOptions, Sort};
use campus_domain::content::{constant, resolve_category};
use campus_domain::ResourceKind;
use serde::Deserialize;
use validator::Validate;

/// 列表范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// 公开列表：只包含已发布内容，按发布时间倒序
    Public,
    /// 管理列表：包含所有内容，按创建时间倒序
    Admin,
}

/// 内容查询参数
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "pageSize must be between 1 and 100"))]
    pub page_size: Option<u32>,

    pub category: Option<String>,

    /// 在标题、正文与摘要中搜索
    pub search: Option<String>,

    pub tag: Option<String>,

    /// 仅管理列表使用
    pub published: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ContentQuery {
    /// 构建ListOptions
    ///
    /// 分类按资源类型的可选范围解析为规范写法，未知分类返回校验错误。
    pub fn to_list_options(&self, kind: ResourceKind, scope: ListScope) -> ServiceResult<ListOptions> {
        self.validate()?;

        let mut condition = Condition::empty();

        let published = match scope {
            ListScope::Public => Some(true),
            ListScope::Admin => non_blank(&self.published).map(parse_flag).transpose()?,
        };
        if let Some(published) = published {
            condition = condition.and(queries::equal(constant::FIELD_PUBLISHED, published));
        }

        // 分类过滤（分类以规范形式存储）
        if let Some(category) = non_blank(&self.category) {
            let category = resolve_category(kind, Some(category))
                .map_err(|e| ServiceError::validation(e.to_string()))?;
            condition = condition.and(queries::equal(constant::FIELD_CATEGORY, category));
        }

        if let Some(tag) = non_blank(&self.tag) {
            condition = condition.and(queries::equal(constant::FIELD_TAGS, tag));
        }

        // 关键词搜索
        if let Some(keyword) = non_blank(&self.search) {
            condition = condition.and(queries::contains_any(
                &[
                    constant::FIELD_TITLE,
                    constant::FIELD_BODY,
                    constant::FIELD_SUMMARY,
                ],
                keyword,
            ));
        }

        let sort = match scope {
            ListScope::Public => Sort::desc(constant::FIELD_PUBLISHED_AT),
            ListScope::Admin => Sort::desc(constant::FIELD_CREATED_AT),
        };

        Ok(ListOptions {
            condition: (!condition.is_empty()).then_some(condition),
            page: Some(self.page.unwrap_or(ListOptions::DEFAULT_PAGE)),
            size: Some(self.page_size.unwrap_or(ListOptions::DEFAULT_SIZE)),
            sort: vec![sort],
        })
    }
}
