use crate::{create_router, AppState, RouterConfig};
use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use campus_infra::database::InMemoryDocumentClient;
use campus_infra::media::{LocalMediaStore, UploadPolicy};
use campus_infra::security::JwtService;
use campus_service::{DefaultAuthService, DefaultResourceService, ResourceService};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const PASSWORD: &str = "campus-admin";
const BOUNDARY: &str = "campus-test-boundary";

async fn app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let resource_service = DefaultResourceService::new(
        Arc::new(InMemoryDocumentClient::new()),
        Arc::new(LocalMediaStore::new(dir.path(), "/uploads")),
        UploadPolicy::default(),
    );
    resource_service.ensure_indexes().await.unwrap();

    let hash = bcrypt::hash(PASSWORD, 4).unwrap();
    let auth_service = DefaultAuthService::new(
        Arc::new(JwtService::new("test_secret", "campus", 3600)),
        "admin",
        hash,
    );
    let state = AppState::new(Arc::new(resource_service), Arc::new(auth_service));
    let config = RouterConfig {
        upload_dir: dir.path().to_path_buf(),
        public_prefix: "/uploads".to_string(),
        max_body_size: 10 * 1024 * 1024,
        allowed_origins: Vec::new(),
    };
    (create_router(state, &config), dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn multipart_request(
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, content)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file_name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "admin", "password": PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");
    body["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _dir) = app().await;
    let (status, body) = send(&app, json_request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_blog_lifecycle() {
    let (app, _dir) = app().await;
    let token = login(&app).await;

    let (status, created) = send(
        &app,
        json_request(
            Method::POST,
            "/api/blogs",
            Some(&token),
            Some(json!({ "title": "Hello, World!", "body": "first post", "published": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "hello-world");
    assert_eq!(created["readTime"], 1);
    let id = created["id"].as_str().unwrap().to_string();

    let long_body = "word ".repeat(250);
    let (status, updated) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/blogs/{}", id),
            Some(&token),
            Some(json!({ "body": long_body })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["slug"], "hello-world");
    assert_eq!(updated["readTime"], 2);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    for expected in [1, 2] {
        let (status, item) = send(
            &app,
            json_request(Method::GET, "/api/blogs/hello-world", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["views"], expected);
    }

    let (status, body) = send(
        &app,
        json_request(Method::DELETE, &format!("/api/blogs/{}", id), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/blogs/hello-world", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFoundError");

    let (status, _) = send(
        &app,
        json_request(Method::GET, &format!("/api/admin/blogs/{}", id), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pagination() {
    let (app, _dir) = app().await;
    let token = login(&app).await;

    for i in 0..25 {
        let (status, _) = send(
            &app,
            json_request(
                Method::POST,
                "/api/announcements",
                Some(&token),
                Some(json!({
                    "title": format!("Notice {}", i),
                    "body": "School closed",
                    "published": "true",
                    "category": "holiday"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(
        &app,
        json_request(Method::GET, "/api/announcements?pageSize=10", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 25);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["pageSize"], 10);
    assert_eq!(page["items"].as_array().unwrap().len(), 10);
    assert!(page["items"][0].get("body").is_none());
    assert_eq!(page["items"][0]["category"], "Holiday");

    let (_, last) = send(
        &app,
        json_request(Method::GET, "/api/announcements?page=3&pageSize=10", None, None),
    )
    .await;
    assert_eq!(last["items"].as_array().unwrap().len(), 5);

    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/announcements?pageSize=0", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn test_public_listing_hides_drafts() {
    let (app, _dir) = app().await;
    let token = login(&app).await;

    for (title, published) in [("Open Day", true), ("Draft Plan", false)] {
        send(
            &app,
            json_request(
                Method::POST,
                "/api/blogs",
                Some(&token),
                Some(json!({ "title": title, "body": "text", "published": published })),
            ),
        )
        .await;
    }

    let (_, public) = send(&app, json_request(Method::GET, "/api/blogs", None, None)).await;
    assert_eq!(public["total"], 1);
    assert_eq!(public["items"][0]["slug"], "open-day");

    let (_, admin) = send(
        &app,
        json_request(Method::GET, "/api/admin/blogs", Some(&token), None),
    )
    .await;
    assert_eq!(admin["total"], 2);

    let (_, drafts) = send(
        &app,
        json_request(Method::GET, "/api/admin/blogs?published=no", Some(&token), None),
    )
    .await;
    assert_eq!(drafts["total"], 1);
    assert_eq!(drafts["items"][0]["slug"], "draft-plan");
}

#[tokio::test]
async fn test_mutations_require_authentication() {
    let (app, _dir) = app().await;
    let payload = json!({ "title": "Sneaky", "body": "text" });

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/blogs", None, Some(payload.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(
        &app,
        json_request(Method::POST, "/api/blogs", Some("forged.token.value"), Some(payload)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, json_request(Method::GET, "/api/admin/blogs", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request(Method::DELETE, "/api/blogs/000000000000000000000001", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "wrong" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_responses() {
    let (app, _dir) = app().await;
    let token = login(&app).await;
    let payload = json!({ "title": "Science Fair", "body": "Projects" });

    let (status, _) = send(
        &app,
        json_request(Method::POST, "/api/blogs", Some(&token), Some(payload.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/blogs", Some(&token), Some(payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ConflictError");

    let (status, _) = send(&app, json_request(Method::GET, "/api/events", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/blogs/000000000000000000000001",
            Some(&token),
            Some(json!({ "views": 1000 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");

    let (status, body) = send(
        &app,
        json_request(
            Method::DELETE,
            "/api/blogs/000000000000000000000099",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFoundError");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/blogs",
            Some(&token),
            Some(json!({ "title": "No body" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn test_gallery_multipart_upload() {
    let (app, _dir) = app().await;
    let token = login(&app).await;
    let png: &[u8] = b"\x89PNG\r\n\x1a\nfake image";

    let (status, created) = send(
        &app,
        multipart_request(
            "/api/gallery",
            &token,
            &[
                ("title", "Annual Day"),
                ("body", "Stage photos"),
                ("published", "on"),
                ("tags", "events, stage"),
            ],
            Some(("stage.png", "image/png", png)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["tags"], json!(["events", "stage"]));
    let media_ref = created["mediaRef"].as_str().unwrap().to_string();
    assert!(media_ref.starts_with("/uploads/gallery/image-"));

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, &media_ref, None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], png);

    let (status, body) = send(
        &app,
        multipart_request(
            "/api/gallery",
            &token,
            &[("title", "Script"), ("body", "not an image")],
            Some(("run.sh", "text/x-shellscript", &b"echo hi"[..])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UploadError");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("unsupported file type"));

    let (status, body) = send(
        &app,
        multipart_request(
            "/api/gallery",
            &token,
            &[("title", "No Image"), ("body", "missing file")],
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn test_openapi_document() {
    let (app, _dir) = app().await;
    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api-docs/openapi.json", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/health").is_some());
    assert!(body["paths"]["/api/{kind}"].get("post").is_some());
    assert!(body["paths"].get("/api/admin/{kind}/{id}").is_some());
    assert!(body["components"]["securitySchemes"].get("bearerAuth").is_some());
}
