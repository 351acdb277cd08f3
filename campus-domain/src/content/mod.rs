pub mod category;
pub mod derive;
pub mod item;
pub mod kind;

pub use category::{resolve_category, UnknownCategory};
pub use item::{CareerDetails, ContentItem, ContentSummary, Excerpt};
pub use kind::{ParseKindError, ResourceKind};

/// 内容管理相关的常量
pub mod constant {
    /// 阅读速度（词/分钟）
    pub const WORDS_PER_MINUTE: usize = 200;
    /// 自动摘要的最大字符数
    pub const EXCERPT_LENGTH: usize = 150;

    // 存储字段名
    pub const FIELD_ID: &str = "id";
    pub const FIELD_SLUG: &str = "slug";
    pub const FIELD_TITLE: &str = "title";
    pub const FIELD_BODY: &str = "body";
    pub const FIELD_SUMMARY: &str = "summary.raw";
    pub const FIELD_EXCERPT: &str = "summary";
    pub const FIELD_READ_TIME: &str = "readTime";
    pub const FIELD_MEDIA_REF: &str = "mediaRef";
    pub const FIELD_CAREER: &str = "career";
    pub const FIELD_CATEGORY: &str = "category";
    pub const FIELD_TAGS: &str = "tags";
    pub const FIELD_PUBLISHED: &str = "published";
    pub const FIELD_PUBLISHED_AT: &str = "publishedAt";
    pub const FIELD_VIEWS: &str = "views";
    pub const FIELD_CREATED_AT: &str = "createdAt";
}
