use crate::database::MongoDocumentClient;
use mongodb::Client as MongoClient;
use std::sync::Arc;
use tracing::info;

/// DatabaseManager 管理MongoDB连接
#[derive(Clone)]
pub struct DatabaseManager {
    client: Arc<MongoClient>,
    database: String,
}

impl DatabaseManager {
    /// 连接MongoDB
    pub async fn connect(url: &str, database: &str) -> Result<Self, mongodb::error::Error> {
        let client = MongoClient::with_uri_str(url).await?;
        info!(database, "MongoDB client initialized");
        Ok(Self {
            client: Arc::new(client),
            database: database.to_string(),
        })
    }

    /// 获取MongoDB连接
    pub fn client(&self) -> Arc<MongoClient> {
        self.client.clone()
    }

    /// 创建指向配置数据库的文档客户端
    pub fn document_client(&self) -> MongoDocumentClient {
        MongoDocumentClient::new(self.client.database(&self.database))
    }
}
