use crate::error::ApiError;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::Json;
use campus_api::media::MediaUpload;
use campus_service::ServiceError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// multipart中的文件字段名
pub const IMAGE_FIELD: &str = "image";

/// JSON或multipart请求体的组合提取器
/// multipart的文本字段与JSON字段使用同一个表单类型反序列化
pub struct ContentPayload<F> {
    pub form: F,
    pub file: Option<MediaUpload>,
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

/// 同名字段重复出现时合并为数组
fn insert_field(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}

async fn read_file(field: Field<'_>) -> Result<Option<MediaUpload>, ApiError> {
    let field_name = field.name().unwrap_or(IMAGE_FIELD).to_string();
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let content = field.bytes().await.map_err(multipart_error)?;

    // 未选择文件时浏览器会提交空的文件字段
    if file_name.is_empty() && content.is_empty() {
        return Ok(None);
    }
    Ok(Some(MediaUpload {
        folder: String::new(),
        field_name,
        file_name,
        content_type,
        content,
    }))
}

async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(Map<String, Value>, Option<MediaUpload>), ApiError> {
    let mut fields = Map::new();
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == IMAGE_FIELD {
            if file.is_some() {
                return Err(ApiError::BadRequest(
                    "only one image may be uploaded".to_string(),
                ));
            }
            file = read_file(field).await?;
            continue;
        }
        if field.file_name().is_some() {
            return Err(ApiError::BadRequest(format!(
                "unexpected file field '{}'",
                name
            )));
        }

        let text = field.text().await.map_err(multipart_error)?;
        let value = if name == "career" {
            serde_json::from_str(&text)
                .map_err(|e| ApiError::BadRequest(format!("career must be a JSON object: {}", e)))?
        } else {
            Value::String(text)
        };
        insert_field(&mut fields, name, value);
    }
    Ok((fields, file))
}

#[async_trait::async_trait]
impl<S, F> FromRequest<S> for ContentPayload<F>
where
    S: Send + Sync,
    F: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (value, file) = if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            let (fields, file) = read_multipart(multipart).await?;
            (Value::Object(fields), file)
        } else {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| {
                    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                        ApiError::PayloadTooLarge(e.body_text())
                    } else {
                        ApiError::BadRequest(e.body_text())
                    }
                })?;
            (value, None)
        };

        let form = serde_json::from_value(value)
            .map_err(|e| ApiError::Service(ServiceError::validation(e.to_string())))?;
        Ok(Self { form, file })
    }
}
