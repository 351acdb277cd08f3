use crate::database::matcher;
use async_trait::async_trait;
use campus_api::document::query::Condition;
use campus_api::document::{
    Document, DocumentClient, ListOptions, ListResult, RepositoryError, RepositoryResult, Sort,
    FIELD_UPDATED_AT, METADATA_FIELDS,
};
use campus_api::timestamp;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

const ID_FIELD: &str = "id";

#[derive(Default)]
struct MemoryCollection {
    documents: Vec<Value>,
    unique_fields: HashSet<String>,
}

impl MemoryCollection {
    fn position(&self, id: &str) -> Option<usize> {
        self.documents
            .iter()
            .position(|doc| doc.get(ID_FIELD).and_then(Value::as_str) == Some(id))
    }

    /// 检查唯一字段，`exclude` 为正在更新的文档ID
    fn check_unique(&self, candidate: &Value, exclude: Option<&str>) -> RepositoryResult<()> {
        for field in &self.unique_fields {
            let Some(value) = matcher::lookup(candidate, field).filter(|v| !v.is_null()) else {
                continue;
            };
            let duplicate = self.documents.iter().any(|doc| {
                doc.get(ID_FIELD).and_then(Value::as_str) != exclude
                    && matcher::lookup(doc, field) == Some(value)
            });
            if duplicate {
                return Err(RepositoryError::Conflict(format!(
                    "duplicate value for unique field '{}'",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// InMemoryDocumentClient 进程内文档存储，用于开发和测试
///
/// 文档以JSON形式保存，语义与MongoDB实现保持一致。
#[derive(Default)]
pub struct InMemoryDocumentClient {
    collections: RwLock<HashMap<String, MemoryCollection>>,
    sequence: AtomicU64,
}

impl InMemoryDocumentClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成24位十六进制ID，按创建顺序递增
    fn next_id(&self) -> String {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{:024x}", n)
    }
}

fn to_value<D: Document>(document: &D) -> RepositoryResult<Value> {
    Ok(serde_json::to_value(document)?)
}

fn from_value<D: Document>(value: Value) -> RepositoryResult<D> {
    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl DocumentClient for InMemoryDocumentClient {
    async fn ensure_unique_index(&self, collection: &str, field: &str) -> RepositoryResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .unique_fields
            .insert(field.to_string());
        Ok(())
    }

    async fn create<D: Document>(&self, collection: &str, mut document: D) -> RepositoryResult<D> {
        let now = timestamp::now();
        {
            let metadata = document.metadata_mut();
            metadata.id = Some(self.next_id());
            metadata.created_at = Some(now);
            metadata.updated_at = Some(now);
        }
        let value = to_value(&document)?;

        let mut collections = self.collections.write().await;
        let entry = collections.entry(collection.to_string()).or_default();
        entry.check_unique(&value, None)?;
        entry.documents.push(value);
        Ok(document)
    }

    async fn fetch<D: Document>(&self, collection: &str, id: &str) -> RepositoryResult<Option<D>> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|c| c.position(id).map(|i| c.documents[i].clone()))
            .map(from_value)
            .transpose()
    }

    async fn find_one<D: Document>(
        &self,
        collection: &str,
        condition: Condition,
    ) -> RepositoryResult<Option<D>> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|c| {
                c.documents
                    .iter()
                    .find(|doc| matcher::matches(doc, &condition))
                    .cloned()
            })
            .map(from_value)
            .transpose()
    }

    async fn list<D: Document>(
        &self,
        collection: &str,
        options: ListOptions,
    ) -> RepositoryResult<ListResult<D>> {
        let condition = options.to_condition();
        let mut matched: Vec<Value> = {
            let collections = self.collections.read().await;
            collections
                .get(collection)
                .map(|c| {
                    c.documents
                        .iter()
                        .filter(|doc| matcher::matches(doc, &condition))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };

        let mut sort = options.sort.clone();
        if !sort.iter().any(|s| s.field == ID_FIELD) {
            let order = sort.last().map(|s| s.order).unwrap_or_default();
            sort.push(Sort {
                field: ID_FIELD.to_string(),
                order,
            });
        }
        matched.sort_by(|a, b| matcher::compare_documents(a, b, &sort));

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(options.skip() as usize)
            .take(options.size() as usize)
            .map(from_value)
            .collect::<RepositoryResult<Vec<D>>>()?;
        Ok(ListResult::new(items, total, options.page(), options.size()))
    }

    async fn update<D: Document>(
        &self,
        collection: &str,
        id: &str,
        changes: Map<String, Value>,
    ) -> RepositoryResult<Option<D>> {
        let mut collections = self.collections.write().await;
        let Some(entry) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(index) = entry.position(id) else {
            return Ok(None);
        };

        let mut candidate = entry.documents[index].clone();
        if let Some(object) = candidate.as_object_mut() {
            for (field, value) in changes {
                if !METADATA_FIELDS.contains(&field.as_str()) {
                    object.insert(field, value);
                }
            }
            object.insert(
                FIELD_UPDATED_AT.to_string(),
                Value::String(timestamp::format(&timestamp::now())),
            );
        }

        entry.check_unique(&candidate, Some(id))?;
        let updated = from_value(candidate.clone())?;
        entry.documents[index] = candidate;
        Ok(Some(updated))
    }

    async fn increment<D: Document>(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> RepositoryResult<Option<D>> {
        let mut collections = self.collections.write().await;
        let Some(entry) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(index) = entry.position(id) else {
            return Ok(None);
        };

        let document = &mut entry.documents[index];
        let current = document.get(field).and_then(Value::as_i64).unwrap_or(0);
        if let Some(object) = document.as_object_mut() {
            object.insert(field.to_string(), Value::from(current.saturating_add(delta)));
        }
        from_value(document.clone()).map(Some)
    }

    async fn delete(&self, collection: &str, id: &str) -> RepositoryResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(entry) = collections.get_mut(collection) else {
            return Ok(false);
        };
        match entry.position(id) {
            Some(index) => {
                entry.documents.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
