use super::derive;
use super::kind::ResourceKind;
use campus_api::document::{Document, Metadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ContentItem是博客、图库、公告和招聘信息的通用表示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(flatten)]
    pub metadata: Metadata,

    pub kind: ResourceKind,

    pub title: String,

    /// 由标题派生，同一资源类型内唯一
    pub slug: String,

    /// 正文（博客、公告）或描述（图库、招聘）
    pub body: String,

    pub summary: Excerpt,

    /// 关联图片的引用
    #[serde(default)]
    pub media_ref: Option<String>,

    /// 标签，保持插入顺序，无重复。招聘信息中表示任职要求
    #[serde(default)]
    pub tags: Vec<String>,

    pub category: String,

    #[serde(default)]
    pub career: Option<CareerDetails>,

    #[serde(default)]
    pub published: bool,

    /// 首次发布时间，设置后不再改变
    #[serde(default, with = "campus_api::timestamp::option")]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub views: u64,

    pub read_time: u32,
}

impl Document for ContentItem {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl ContentItem {
    pub fn id(&self) -> Option<&str> {
        self.metadata.id()
    }

    /// 设置标题并重新生成slug
    pub fn set_title(&mut self, title: String) {
        self.slug = derive::slug_of(&title);
        self.title = title;
    }

    /// 设置正文，重新计算阅读时间和自动摘要
    pub fn set_body(&mut self, body: String) {
        self.read_time = derive::read_time(&body);
        if self.summary.auto_generate {
            self.summary.raw = derive::excerpt(&body);
        }
        self.body = body;
    }

    /// 设置发布状态，首次发布时记录发布时间
    pub fn set_published(&mut self, published: bool, now: DateTime<Utc>) {
        if published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.published = published;
    }
}

/// Excerpt表示内容的摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Excerpt {
    /// 为true时摘要随正文自动更新
    pub auto_generate: bool,
    pub raw: String,
}

impl Excerpt {
    pub fn generated(body: &str) -> Self {
        Self {
            auto_generate: true,
            raw: derive::excerpt(body),
        }
    }

    pub fn custom(raw: String) -> Self {
        Self {
            auto_generate: false,
            raw,
        }
    }
}

/// 招聘信息的附加字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CareerDetails {
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
}

/// 列表中使用的内容视图，不包含正文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    #[serde(flatten)]
    pub metadata: Metadata,
    pub kind: ResourceKind,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub media_ref: Option<String>,
    pub tags: Vec<String>,
    pub category: String,
    pub career: Option<CareerDetails>,
    pub published: bool,
    #[serde(with = "campus_api::timestamp::option")]
    pub published_at: Option<DateTime<Utc>>,
    pub views: u64,
    pub read_time: u32,
}

impl From<ContentItem> for ContentSummary {
    fn from(item: ContentItem) -> Self {
        Self {
            metadata: item.metadata,
            kind: item.kind,
            title: item.title,
            slug: item.slug,
            summary: item.summary.raw,
            media_ref: item.media_ref,
            tags: item.tags,
            category: item.category,
            career: item.career,
            published: item.published,
            published_at: item.published_at,
            views: item.views,
            read_time: item.read_time,
        }
    }
}
