use crate::document::query::Condition;
use crate::document::{Document, ListOptions, ListResult, RepositoryResult};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// DocumentClient trait 定义文档集合的CRUD操作
///
/// 每种资源使用一个独立的集合。`createdAt`/`updatedAt` 由实现方维护，
/// 客户端提供的值会被忽略。
#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// 为集合的字段声明唯一索引
    async fn ensure_unique_index(&self, collection: &str, field: &str) -> RepositoryResult<()>;

    /// 插入文档并分配ID
    async fn create<D: Document>(&self, collection: &str, document: D) -> RepositoryResult<D>;

    async fn fetch<D: Document>(&self, collection: &str, id: &str) -> RepositoryResult<Option<D>>;

    async fn find_one<D: Document>(
        &self,
        collection: &str,
        condition: Condition,
    ) -> RepositoryResult<Option<D>>;

    async fn list<D: Document>(
        &self,
        collection: &str,
        options: ListOptions,
    ) -> RepositoryResult<ListResult<D>>;

    /// 按ID只写入给定字段并刷新 `updatedAt`，返回更新后的文档；文档不存在时返回 `None`
    ///
    /// 未出现在 `changes` 中的字段保持存储中的值。
    async fn update<D: Document>(
        &self,
        collection: &str,
        id: &str,
        changes: Map<String, Value>,
    ) -> RepositoryResult<Option<D>>;

    /// 原子地增加数值字段，返回更新后的文档
    async fn increment<D: Document>(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> RepositoryResult<Option<D>>;

    /// 按ID删除文档，返回是否删除了文档
    async fn delete(&self, collection: &str, id: &str) -> RepositoryResult<bool>;
}
