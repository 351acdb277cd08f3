use crate::content::input::{CreateContentInput, UpdateContentInput};
use crate::content::query::{ContentQuery, ListScope};
use crate::error::{ServiceError, ServiceResult, UploadError};
use async_trait::async_trait;
use campus_api::document::query::queries;
use campus_api::document::{DocumentClient, ListResult, Metadata, RepositoryError};
use campus_api::media::{MediaStore, MediaUpload};
use campus_domain::content::{constant, derive, resolve_category};
use campus_domain::{CareerDetails, ContentItem, ContentSummary, Excerpt, ResourceKind};
use campus_infra::media::UploadPolicy;
use campus_api::timestamp;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// ResourceService trait 定义内容资源的业务操作
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// 为所有资源类型创建slug唯一索引
    async fn ensure_indexes(&self) -> ServiceResult<()>;

    /// 创建内容
    async fn create(
        &self,
        kind: ResourceKind,
        input: CreateContentInput,
        file: Option<MediaUpload>,
    ) -> ServiceResult<ContentItem>;

    /// 按ID获取内容（管理用，不增加浏览量）
    async fn get(&self, kind: ResourceKind, id: &str) -> ServiceResult<ContentItem>;

    /// 按slug获取已发布内容并增加浏览量
    async fn get_published(&self, kind: ResourceKind, slug: &str) -> ServiceResult<ContentItem>;

    async fn list(
        &self,
        kind: ResourceKind,
        query: ContentQuery,
        scope: ListScope,
    ) -> ServiceResult<ListResult<ContentSummary>>;

    /// 部分更新内容
    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        input: UpdateContentInput,
        file: Option<MediaUpload>,
    ) -> ServiceResult<ContentItem>;

    /// 删除内容并释放关联媒体
    async fn delete(&self, kind: ResourceKind, id: &str) -> ServiceResult<()>;
}

/// 默认ResourceService实现
pub struct DefaultResourceService<C: DocumentClient> {
    client: Arc<C>,
    media_store: Arc<dyn MediaStore>,
    upload_policy: UploadPolicy,
}

impl<C: DocumentClient> DefaultResourceService<C> {
    pub fn new(client: Arc<C>, media_store: Arc<dyn MediaStore>, upload_policy: UploadPolicy) -> Self {
        Self {
            client,
            media_store,
            upload_policy,
        }
    }

    fn not_found(kind: ResourceKind) -> ServiceError {
        ServiceError::NotFound(kind.as_str().to_string())
    }

    fn slug_for(title: &str) -> ServiceResult<String> {
        let slug = derive::slug_of(title);
        if slug.is_empty() {
            return Err(ServiceError::validation(
                "title must contain at least one letter or digit",
            ));
        }
        Ok(slug)
    }

    fn check_career(kind: ResourceKind, career: &Option<CareerDetails>) -> ServiceResult<()> {
        if career.is_some() && !kind.accepts_career_details() {
            return Err(ServiceError::validation(format!(
                "career details are not accepted for {}",
                kind.path()
            )));
        }
        Ok(())
    }

    fn category(kind: ResourceKind, value: Option<&str>) -> ServiceResult<String> {
        resolve_category(kind, value)
            .map(str::to_string)
            .map_err(|e| ServiceError::validation(e.to_string()))
    }

    /// 查找使用该slug的其他内容
    async fn slug_taken(
        &self,
        kind: ResourceKind,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> ServiceResult<bool> {
        let existing: Option<ContentItem> = self
            .client
            .find_one(kind.collection(), queries::equal(constant::FIELD_SLUG, slug))
            .await
            .map_err(persistence)?;
        Ok(existing.is_some_and(|item| exclude_id.is_none() || item.id() != exclude_id))
    }

    /// 检查上传策略并保存文件
    async fn upload(&self, kind: ResourceKind, mut file: MediaUpload) -> ServiceResult<String> {
        file.folder = kind.path().to_string();
        self.upload_policy.check(&file).map_err(UploadError::from)?;
        let reference = self
            .media_store
            .store(file)
            .await
            .map_err(UploadError::from)?;
        Ok(reference)
    }

    /// 尽力释放媒体，失败只记录日志
    async fn release_quietly(&self, reference: &str) {
        if let Err(e) = self.media_store.release(reference).await {
            warn!(reference, error = %e, "failed to release media");
        }
    }
}

fn persistence(err: RepositoryError) -> ServiceError {
    ServiceError::Persistence(err.to_string())
}

/// 从内容中取出指定字段的存储值
fn changed_fields(item: &ContentItem, fields: &[&str]) -> ServiceResult<Map<String, Value>> {
    let mut stored = match serde_json::to_value(item) {
        Ok(Value::Object(stored)) => stored,
        Ok(_) => return Err(ServiceError::Persistence("content is not an object".to_string())),
        Err(e) => return Err(ServiceError::Persistence(e.to_string())),
    };
    Ok(fields
        .iter()
        .filter_map(|field| stored.remove(*field).map(|value| (field.to_string(), value)))
        .collect())
}

fn write_error(err: RepositoryError, slug: &str) -> ServiceError {
    match err {
        RepositoryError::Conflict(_) => ServiceError::Conflict {
            slug: slug.to_string(),
        },
        other => persistence(other),
    }
}

#[async_trait]
impl<C: DocumentClient + 'static> ResourceService for DefaultResourceService<C> {
    async fn ensure_indexes(&self) -> ServiceResult<()> {
        for kind in ResourceKind::ALL {
            self.client
                .ensure_unique_index(kind.collection(), constant::FIELD_SLUG)
                .await
                .map_err(persistence)?;
        }
        Ok(())
    }

    async fn create(
        &self,
        kind: ResourceKind,
        input: CreateContentInput,
        file: Option<MediaUpload>,
    ) -> ServiceResult<ContentItem> {
        Self::check_career(kind, &input.career)?;
        let category = Self::category(kind, input.category.as_deref())?;
        let slug = Self::slug_for(&input.title)?;
        if kind.requires_media() && file.is_none() {
            return Err(ServiceError::validation(format!(
                "an image is required for {} items",
                kind.path()
            )));
        }

        if self.slug_taken(kind, &slug, None).await? {
            return Err(ServiceError::Conflict { slug });
        }

        let media_ref = match file {
            Some(file) => Some(self.upload(kind, file).await?),
            None => None,
        };

        let summary = match input.summary {
            Some(summary) => Excerpt::custom(summary),
            None => Excerpt::generated(&input.body),
        };
        let mut item = ContentItem {
            metadata: Metadata::default(),
            kind,
            title: input.title,
            slug: slug.clone(),
            read_time: derive::read_time(&input.body),
            body: input.body,
            summary,
            media_ref,
            tags: input.tags,
            category,
            career: input.career,
            published: false,
            published_at: None,
            views: 0,
        };
        item.set_published(input.published, timestamp::now());

        let media_ref = item.media_ref.clone();
        match self.client.create(kind.collection(), item).await {
            Ok(created) => {
                info!(kind = %kind, slug = %created.slug, "content created");
                Ok(created)
            }
            Err(e) => {
                if let Some(reference) = media_ref {
                    self.release_quietly(&reference).await;
                }
                Err(write_error(e, &slug))
            }
        }
    }

    async fn get(&self, kind: ResourceKind, id: &str) -> ServiceResult<ContentItem> {
        self.client
            .fetch(kind.collection(), id)
            .await
            .map_err(persistence)?
            .ok_or_else(|| Self::not_found(kind))
    }

    async fn get_published(&self, kind: ResourceKind, slug: &str) -> ServiceResult<ContentItem> {
        let condition = queries::equal(constant::FIELD_SLUG, slug)
            .and(queries::equal(constant::FIELD_PUBLISHED, true));
        let item: ContentItem = self
            .client
            .find_one(kind.collection(), condition)
            .await
            .map_err(persistence)?
            .ok_or_else(|| Self::not_found(kind))?;

        let id = item.id().ok_or_else(|| Self::not_found(kind))?;
        self.client
            .increment(kind.collection(), id, constant::FIELD_VIEWS, 1)
            .await
            .map_err(persistence)?
            .ok_or_else(|| Self::not_found(kind))
    }

    async fn list(
        &self,
        kind: ResourceKind,
        query: ContentQuery,
        scope: ListScope,
    ) -> ServiceResult<ListResult<ContentSummary>> {
        let options = query.to_list_options(kind, scope)?;
        let result = self
            .client
            .list::<ContentItem>(kind.collection(), options)
            .await
            .map_err(persistence)?;
        debug!(kind = %kind, total = result.total, "content listed");
        Ok(result.map(ContentSummary::from))
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        input: UpdateContentInput,
        file: Option<MediaUpload>,
    ) -> ServiceResult<ContentItem> {
        let mut item = self.get(kind, id).await?;
        Self::check_career(kind, &input.career)?;

        let mut changed: Vec<&'static str> = Vec::new();
        if let Some(title) = input.title {
            let slug = Self::slug_for(&title)?;
            if slug != item.slug && self.slug_taken(kind, &slug, item.id()).await? {
                return Err(ServiceError::Conflict { slug });
            }
            item.set_title(title);
            changed.extend([constant::FIELD_TITLE, constant::FIELD_SLUG]);
        }
        if let Some(body) = input.body {
            item.set_body(body);
            changed.extend([
                constant::FIELD_BODY,
                constant::FIELD_READ_TIME,
                constant::FIELD_EXCERPT,
            ]);
        }
        if let Some(summary) = input.summary {
            item.summary = if summary.is_empty() {
                Excerpt::generated(&item.body)
            } else {
                Excerpt::custom(summary)
            };
            changed.push(constant::FIELD_EXCERPT);
        }
        if let Some(category) = input.category {
            item.category = Self::category(kind, Some(&category))?;
            changed.push(constant::FIELD_CATEGORY);
        }
        if let Some(tags) = input.tags {
            item.tags = tags;
            changed.push(constant::FIELD_TAGS);
        }
        if let Some(career) = input.career {
            item.career = Some(career);
            changed.push(constant::FIELD_CAREER);
        }
        if let Some(published) = input.published {
            item.set_published(published, timestamp::now());
            changed.extend([constant::FIELD_PUBLISHED, constant::FIELD_PUBLISHED_AT]);
        }

        // 新文件先上传，文档更新成功后再释放旧文件
        let (uploaded_ref, previous_ref) = match file {
            Some(file) => {
                let reference = self.upload(kind, file).await?;
                let previous = item.media_ref.replace(reference.clone());
                changed.push(constant::FIELD_MEDIA_REF);
                (Some(reference), previous)
            }
            None => (None, None),
        };

        // 只写入修改过的字段，浏览量等并发更新的字段保持存储中的值
        let changes = match changed_fields(&item, &changed) {
            Ok(changes) => changes,
            Err(e) => {
                if let Some(reference) = uploaded_ref {
                    self.release_quietly(&reference).await;
                }
                return Err(e);
            }
        };
        let slug = item.slug.clone();
        let error = match self.client.update::<ContentItem>(kind.collection(), id, changes).await {
            Ok(Some(updated)) => {
                if let Some(previous) = previous_ref {
                    self.release_quietly(&previous).await;
                }
                info!(kind = %kind, slug = %updated.slug, "content updated");
                return Ok(updated);
            }
            Ok(None) => Self::not_found(kind),
            Err(e) => write_error(e, &slug),
        };
        if let Some(reference) = uploaded_ref {
            self.release_quietly(&reference).await;
        }
        Err(error)
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> ServiceResult<()> {
        let item = self.get(kind, id).await?;
        if let Some(reference) = item.media_ref.as_deref() {
            self.release_quietly(reference).await;
        }
        let deleted = self
            .client
            .delete(kind.collection(), id)
            .await
            .map_err(persistence)?;
        if !deleted {
            return Err(Self::not_found(kind));
        }
        info!(kind = %kind, id, "content deleted");
        Ok(())
    }
}
