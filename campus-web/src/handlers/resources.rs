use crate::error::ApiError;
use crate::extractors::ContentPayload;
use crate::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use campus_api::document::ListResult;
use campus_api::security::AuthenticatedUser;
use campus_domain::{ContentItem, ContentSummary, ResourceKind};
use campus_service::{
    ContentQuery, CreateContentForm, CreateContentInput, ListScope, UpdateContentForm,
    UpdateContentInput,
};
use serde_json::json;
use tracing::info;

/// 解析路径中的资源类型，未知类型返回404
fn parse_kind(segment: &str) -> Result<ResourceKind, ApiError> {
    segment
        .parse()
        .map_err(|e: campus_domain::ParseKindError| ApiError::NotFound(e.to_string()))
}

fn parse_query(query: Result<Query<ContentQuery>, QueryRejection>) -> Result<ContentQuery, ApiError> {
    query
        .map(|Query(query)| query)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// 列出已发布内容
/// GET /api/:kind
#[utoipa::path(
    get,
    path = "/api/{kind}",
    tag = "content",
    params(
        ("kind" = String, Path, description = "blogs、gallery、announcements或careers"),
        ("page" = Option<u32>, Query, description = "页码，从1开始"),
        ("pageSize" = Option<u32>, Query, description = "每页数量（1-100）"),
        ("category" = Option<String>, Query, description = "分类"),
        ("search" = Option<String>, Query, description = "在标题、正文与摘要中搜索"),
        ("tag" = Option<String>, Query, description = "标签"),
    ),
    responses(
        (status = 200, description = "已发布内容的分页列表"),
        (status = 400, description = "查询参数不合法"),
        (status = 404, description = "未知的资源类型")
    )
)]
pub async fn list_published(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    query: Result<Query<ContentQuery>, QueryRejection>,
) -> Result<Json<ListResult<ContentSummary>>, ApiError> {
    let kind = parse_kind(&kind)?;
    let result = state
        .resource_service
        .list(kind, parse_query(query)?, ListScope::Public)
        .await?;
    Ok(Json(result))
}

/// 按slug获取已发布内容
/// GET /api/:kind/:slug
#[utoipa::path(
    get,
    path = "/api/{kind}/{slug}",
    tag = "content",
    params(("kind" = String, Path, description = "blogs、gallery、announcements或careers"), ("slug" = String, Path, description = "内容slug")),
    responses(
        (status = 200, description = "内容详情，浏览量加一"),
        (status = 404, description = "内容不存在或未发布")
    )
)]
pub async fn get_published(
    State(state): State<AppState>,
    Path((kind, slug)): Path<(String, String)>,
) -> Result<Json<ContentItem>, ApiError> {
    let kind = parse_kind(&kind)?;
    let item = state.resource_service.get_published(kind, &slug).await?;
    Ok(Json(item))
}

/// 列出所有内容（包括未发布）
/// GET /api/admin/:kind
#[utoipa::path(
    get,
    path = "/api/admin/{kind}",
    tag = "content",
    params(
        ("kind" = String, Path, description = "blogs、gallery、announcements或careers"),
        ("page" = Option<u32>, Query, description = "页码，从1开始"),
        ("pageSize" = Option<u32>, Query, description = "每页数量（1-100）"),
        ("category" = Option<String>, Query, description = "分类"),
        ("search" = Option<String>, Query, description = "在标题、正文与摘要中搜索"),
        ("tag" = Option<String>, Query, description = "标签"),
        ("published" = Option<bool>, Query, description = "按发布状态过滤"),
    ),
    responses(
        (status = 200, description = "全部内容的分页列表"),
        (status = 401, description = "未认证")
    ),
    security(("bearerAuth" = []))
)]
pub async fn admin_list(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    query: Result<Query<ContentQuery>, QueryRejection>,
) -> Result<Json<ListResult<ContentSummary>>, ApiError> {
    let kind = parse_kind(&kind)?;
    let result = state
        .resource_service
        .list(kind, parse_query(query)?, ListScope::Admin)
        .await?;
    Ok(Json(result))
}

/// GET /api/admin/:kind/:id
#[utoipa::path(
    get,
    path = "/api/admin/{kind}/{id}",
    tag = "content",
    params(("kind" = String, Path, description = "blogs、gallery、announcements或careers"), ("id" = String, Path, description = "内容ID")),
    responses(
        (status = 200, description = "内容详情"),
        (status = 401, description = "未认证"),
        (status = 404, description = "内容不存在")
    ),
    security(("bearerAuth" = []))
)]
pub async fn admin_get(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<ContentItem>, ApiError> {
    let kind = parse_kind(&kind)?;
    let item = state.resource_service.get(kind, &id).await?;
    Ok(Json(item))
}

/// 创建内容
/// POST /api/:kind
#[utoipa::path(
    post,
    path = "/api/{kind}",
    tag = "content",
    params(("kind" = String, Path, description = "blogs、gallery、announcements或careers")),
    responses(
        (status = 201, description = "创建成功"),
        (status = 400, description = "输入或上传文件不合法"),
        (status = 401, description = "未认证"),
        (status = 409, description = "slug已存在"),
        (status = 413, description = "请求体过大")
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_item(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Extension(user): Extension<AuthenticatedUser>,
    ContentPayload { form, file }: ContentPayload<CreateContentForm>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    let input = CreateContentInput::try_from(form)?;
    let item = state.resource_service.create(kind, input, file).await?;
    info!(username = %user.username, kind = %kind, slug = %item.slug, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// 部分更新内容
/// PUT /api/:kind/:id
#[utoipa::path(
    put,
    path = "/api/{kind}/{id}",
    tag = "content",
    params(("kind" = String, Path, description = "blogs、gallery、announcements或careers"), ("id" = String, Path, description = "内容ID")),
    responses(
        (status = 200, description = "更新后的内容"),
        (status = 400, description = "输入或上传文件不合法"),
        (status = 401, description = "未认证"),
        (status = 404, description = "内容不存在"),
        (status = 409, description = "slug已存在")
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Extension(user): Extension<AuthenticatedUser>,
    ContentPayload { form, file }: ContentPayload<UpdateContentForm>,
) -> Result<Json<ContentItem>, ApiError> {
    let kind = parse_kind(&kind)?;
    let input = UpdateContentInput::try_from(form)?;
    let item = state.resource_service.update(kind, &id, input, file).await?;
    info!(username = %user.username, kind = %kind, id = %id, "item updated");
    Ok(Json(item))
}

/// 删除内容
/// DELETE /api/:kind/:id
#[utoipa::path(
    delete,
    path = "/api/{kind}/{id}",
    tag = "content",
    params(("kind" = String, Path, description = "blogs、gallery、announcements或careers"), ("id" = String, Path, description = "内容ID")),
    responses(
        (status = 200, description = "删除成功"),
        (status = 401, description = "未认证"),
        (status = 404, description = "内容不存在")
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    state.resource_service.delete(kind, &id).await?;
    info!(username = %user.username, kind = %kind, id = %id, "item deleted");
    Ok(Json(json!({ "message": format!("{} deleted successfully", kind) })))
}
