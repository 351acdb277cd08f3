use crate::database::filter::{self, MONGO_ID};
use async_trait::async_trait;
use campus_api::document::query::Condition;
use campus_api::document::{
    Document, DocumentClient, ListOptions, ListResult, RepositoryError, RepositoryResult,
    FIELD_UPDATED_AT, METADATA_FIELDS,
};
use campus_api::timestamp;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document as BsonDocument};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use serde_json::{Map, Value};
use tracing::debug;

/// MongoDB重复键错误码
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDocumentClient 使用MongoDB实现的文档客户端
pub struct MongoDocumentClient {
    database: Database,
}

impl MongoDocumentClient {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.database.collection(name)
    }
}

fn map_error(err: mongodb::error::Error) -> RepositoryError {
    let duplicate = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    };
    if duplicate {
        RepositoryError::Conflict(err.to_string())
    } else {
        RepositoryError::Backend(err.to_string())
    }
}

/// 非法ID不可能匹配任何文档
fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// 序列化为存储格式，ID由`_id`字段保存
fn to_stored<D: Document>(document: &D) -> RepositoryResult<BsonDocument> {
    let mut stored =
        bson::to_document(document).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    stored.remove("id");
    Ok(stored)
}

fn from_stored<D: Document>(mut stored: BsonDocument) -> RepositoryResult<D> {
    if let Some(Bson::ObjectId(oid)) = stored.remove(MONGO_ID) {
        stored.insert("id", oid.to_hex());
    }
    bson::from_document(stored).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

#[async_trait]
impl DocumentClient for MongoDocumentClient {
    async fn ensure_unique_index(&self, collection: &str, field: &str) -> RepositoryResult<()> {
        let mut keys = BsonDocument::new();
        keys.insert(field, 1);
        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection(collection)
            .create_index(index)
            .await
            .map_err(map_error)?;
        debug!(collection, field, "unique index ensured");
        Ok(())
    }

    async fn create<D: Document>(&self, collection: &str, mut document: D) -> RepositoryResult<D> {
        let now = timestamp::now();
        let oid = ObjectId::new();
        {
            let metadata = document.metadata_mut();
            metadata.id = Some(oid.to_hex());
            metadata.created_at = Some(now);
            metadata.updated_at = Some(now);
        }

        let mut stored = to_stored(&document)?;
        stored.insert(MONGO_ID, oid);
        self.collection(collection)
            .insert_one(stored)
            .await
            .map_err(map_error)?;
        Ok(document)
    }

    async fn fetch<D: Document>(&self, collection: &str, id: &str) -> RepositoryResult<Option<D>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        self.collection(collection)
            .find_one(doc! { MONGO_ID: oid })
            .await
            .map_err(map_error)?
            .map(from_stored)
            .transpose()
    }

    async fn find_one<D: Document>(
        &self,
        collection: &str,
        condition: Condition,
    ) -> RepositoryResult<Option<D>> {
        let filter = match filter::to_filter(&condition) {
            Ok(filter) => filter,
            Err(RepositoryError::InvalidId(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        self.collection(collection)
            .find_one(filter)
            .await
            .map_err(map_error)?
            .map(from_stored)
            .transpose()
    }

    async fn list<D: Document>(
        &self,
        collection: &str,
        options: ListOptions,
    ) -> RepositoryResult<ListResult<D>> {
        let filter = filter::to_filter(&options.to_condition())?;
        let collection = self.collection(collection);

        let total = collection
            .count_documents(filter.clone())
            .await
            .map_err(map_error)?;

        let cursor = collection
            .find(filter)
            .sort(filter::to_sort(&options.sort))
            .skip(options.skip())
            .limit(i64::from(options.size()))
            .await
            .map_err(map_error)?;
        let stored: Vec<BsonDocument> = cursor.try_collect().await.map_err(map_error)?;

        let items = stored
            .into_iter()
            .map(from_stored)
            .collect::<RepositoryResult<Vec<D>>>()?;
        Ok(ListResult::new(items, total, options.page(), options.size()))
    }

    async fn update<D: Document>(
        &self,
        collection: &str,
        id: &str,
        mut changes: Map<String, Value>,
    ) -> RepositoryResult<Option<D>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        for field in METADATA_FIELDS {
            changes.remove(field);
        }
        changes.insert(
            FIELD_UPDATED_AT.to_string(),
            Value::String(timestamp::format(&timestamp::now())),
        );

        let set = bson::to_document(&changes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        self.collection(collection)
            .find_one_and_update(doc! { MONGO_ID: oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_error)?
            .map(from_stored)
            .transpose()
    }

    async fn increment<D: Document>(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> RepositoryResult<Option<D>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let mut inc = BsonDocument::new();
        inc.insert(field, delta);

        self.collection(collection)
            .find_one_and_update(doc! { MONGO_ID: oid }, doc! { "$inc": inc })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_error)?
            .map(from_stored)
            .transpose()
    }

    async fn delete(&self, collection: &str, id: &str) -> RepositoryResult<bool> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };
        let result = self
            .collection(collection)
            .delete_one(doc! { MONGO_ID: oid })
            .await
            .map_err(map_error)?;
        Ok(result.deleted_count > 0)
    }
}
