use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// ResourceKind表示内容资源的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Blog,
    Gallery,
    Announcement,
    Career,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Blog,
        ResourceKind::Gallery,
        ResourceKind::Announcement,
        ResourceKind::Career,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "blog",
            ResourceKind::Gallery => "gallery",
            ResourceKind::Announcement => "announcement",
            ResourceKind::Career => "career",
        }
    }

    /// URL路径段，同时用作集合名和上传目录
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "blogs",
            ResourceKind::Gallery => "gallery",
            ResourceKind::Announcement => "announcements",
            ResourceKind::Career => "careers",
        }
    }

    pub fn collection(&self) -> &'static str {
        self.path()
    }

    /// 可选分类，第一个为默认值
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Blog => &[
                "General",
                "Academics",
                "Events",
                "Sports",
                "Achievements",
                "Activities",
            ],
            ResourceKind::Gallery => &[
                "General",
                "Campus",
                "Events",
                "Sports",
                "Cultural",
                "Achievements",
            ],
            ResourceKind::Announcement => &[
                "General",
                "Academic",
                "Examination",
                "Holiday",
                "Event",
                "Admission",
            ],
            ResourceKind::Career => &["Teaching", "Non-Teaching", "Administrative"],
        }
    }

    pub fn default_category(&self) -> &'static str {
        self.categories()[0]
    }

    /// 图库条目创建时必须附带图片
    pub fn requires_media(&self) -> bool {
        matches!(self, ResourceKind::Gallery)
    }

    pub fn accepts_career_details(&self) -> bool {
        matches!(self, ResourceKind::Career)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for ResourceKind {
    type Err = ParseKindError;

    /// 按URL路径段解析
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.path() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}
