//! 将查询条件转换为MongoDB过滤和排序文档

use campus_api::document::query::Condition;
use campus_api::document::{RepositoryError, RepositoryResult, Sort, SortOrder};
use mongodb::bson::{self, oid::ObjectId, Bson, Document as BsonDocument};

/// 文档ID在MongoDB中的字段名
pub const MONGO_ID: &str = "_id";

fn stored_field(index_name: &str) -> &str {
    if index_name == "id" {
        MONGO_ID
    } else {
        index_name
    }
}

fn to_bson_value(index_name: &str, value: &serde_json::Value) -> RepositoryResult<Bson> {
    if index_name == "id" {
        let id = value.as_str().unwrap_or_default();
        let oid = ObjectId::parse_str(id)
            .map_err(|_| RepositoryError::InvalidId(id.to_string()))?;
        return Ok(Bson::ObjectId(oid));
    }
    bson::to_bson(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// 构建过滤文档
pub fn to_filter(condition: &Condition) -> RepositoryResult<BsonDocument> {
    let mut filter = BsonDocument::new();
    match condition {
        Condition::Empty => {}
        Condition::And { left, right } => {
            filter.insert("$and", vec![to_filter(left)?, to_filter(right)?]);
        }
        Condition::Or { left, right } => {
            filter.insert("$or", vec![to_filter(left)?, to_filter(right)?]);
        }
        Condition::Equal { index_name, value } => {
            filter.insert(stored_field(index_name), to_bson_value(index_name, value)?);
        }
        Condition::Contains { index_name, value } => {
            let mut regex = BsonDocument::new();
            regex.insert("$regex", regex::escape(value));
            regex.insert("$options", "i");
            filter.insert(stored_field(index_name), regex);
        }
    }
    Ok(filter)
}

/// 构建排序文档，最后按`_id`排序保证分页稳定
pub fn to_sort(sort: &[Sort]) -> BsonDocument {
    let mut document = BsonDocument::new();
    for item in sort {
        document.insert(stored_field(&item.field), direction(item.order));
    }
    if !document.contains_key(MONGO_ID) {
        let order = sort.last().map(|s| s.order).unwrap_or_default();
        document.insert(MONGO_ID, direction(order));
    }
    document
}

fn direction(order: SortOrder) -> i32 {
    match order {
        SortOrder::Asc => 1,
        SortOrder::Desc => -1,
    }
}
