use super::InMemoryDocumentClient;
use campus_api::document::query::queries::{contains, equal};
use campus_api::document::{
    Document, DocumentClient, ListOptions, Metadata, RepositoryError, Sort,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map};

const NOTES: &str = "notes";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Note {
    #[serde(flatten)]
    metadata: Metadata,
    slug: String,
    title: String,
    published: bool,
    #[serde(default)]
    views: u64,
}

impl Document for Note {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

fn note(slug: &str, published: bool) -> Note {
    Note {
        metadata: Metadata::default(),
        slug: slug.to_string(),
        title: slug.replace('-', " "),
        published,
        views: 0,
    }
}

#[tokio::test]
async fn test_create_assigns_id_and_timestamps() {
    let client = InMemoryDocumentClient::new();
    let created = client.create(NOTES, note("first", true)).await.unwrap();

    let id = created.metadata.id().unwrap().to_string();
    assert_eq!(id.len(), 24);
    assert!(created.metadata.created_at.is_some());
    assert_eq!(created.metadata.created_at, created.metadata.updated_at);

    let fetched: Note = client.fetch(NOTES, &id).await.unwrap().unwrap();
    assert_eq!(fetched.slug, "first");
}

#[tokio::test]
async fn test_unique_index_rejects_duplicates() {
    let client = InMemoryDocumentClient::new();
    client.ensure_unique_index(NOTES, "slug").await.unwrap();
    client.create(NOTES, note("same", true)).await.unwrap();

    let err = client.create(NOTES, note("same", false)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

fn changes(value: serde_json::Value) -> Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

#[tokio::test]
async fn test_update_writes_only_given_fields() {
    let client = InMemoryDocumentClient::new();
    client.ensure_unique_index(NOTES, "slug").await.unwrap();
    let first = client.create(NOTES, note("first", true)).await.unwrap();
    client.create(NOTES, note("second", true)).await.unwrap();
    let id = first.metadata.id().unwrap().to_string();

    let updated: Note = client
        .update(
            NOTES,
            &id,
            changes(json!({ "title": "renamed", "createdAt": "1999-01-01T00:00:00.000Z" })),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.slug, "first");
    assert!(updated.published);
    assert_eq!(updated.metadata.created_at, first.metadata.created_at);
    assert!(updated.metadata.updated_at >= first.metadata.updated_at);

    let err = client
        .update::<Note>(NOTES, &id, changes(json!({ "slug": "second" })))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
    let unchanged: Note = client.fetch(NOTES, &id).await.unwrap().unwrap();
    assert_eq!(unchanged.slug, "first");
}

#[tokio::test]
async fn test_update_keeps_concurrent_increment() {
    let client = InMemoryDocumentClient::new();
    let created = client.create(NOTES, note("viewed", true)).await.unwrap();
    let id = created.metadata.id().unwrap().to_string();

    let _: Option<Note> = client.increment(NOTES, &id, "views", 1).await.unwrap();
    let updated: Note = client
        .update(NOTES, &id, changes(json!({ "title": "edited" })))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.views, 1);
}

#[tokio::test]
async fn test_update_missing_document_returns_none() {
    let client = InMemoryDocumentClient::new();
    let updated: Option<Note> = client
        .update(NOTES, "000000000000000000000099", changes(json!({ "title": "x" })))
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn test_increment_is_cumulative() {
    let client = InMemoryDocumentClient::new();
    let created = client.create(NOTES, note("counted", true)).await.unwrap();
    let id = created.metadata.id().unwrap().to_string();

    let _: Option<Note> = client.increment(NOTES, &id, "views", 1).await.unwrap();
    let after: Note = client.increment(NOTES, &id, "views", 1).await.unwrap().unwrap();
    assert_eq!(after.views, 2);

    let missing: Option<Note> = client.increment(NOTES, "nope", "views", 1).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_list_filters_sorts_and_pages() {
    let client = InMemoryDocumentClient::new();
    for i in 0..25 {
        client
            .create(NOTES, note(&format!("note-{:02}", i), i % 5 != 0))
            .await
            .unwrap();
    }

    let options = ListOptions {
        page: Some(3),
        size: Some(10),
        sort: vec![Sort::asc("slug")],
        ..Default::default()
    };
    let page = client.list::<Note>(NOTES, options).await.unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.items[0].slug, "note-20");

    let options = ListOptions {
        condition: Some(equal("published", true).and(contains("title", "NOTE 1"))),
        sort: vec![Sort::desc("slug")],
        ..Default::default()
    };
    let page = client.list::<Note>(NOTES, options).await.unwrap();
    // note-10 与 note-15 未发布
    assert_eq!(page.total, 8);
    assert_eq!(page.items[0].slug, "note-19");
}

#[tokio::test]
async fn test_delete_and_find_one() {
    let client = InMemoryDocumentClient::new();
    let created = client.create(NOTES, note("gone", true)).await.unwrap();
    let id = created.metadata.id().unwrap().to_string();

    let found: Option<Note> = client.find_one(NOTES, equal("slug", "gone")).await.unwrap();
    assert!(found.is_some());

    assert!(client.delete(NOTES, &id).await.unwrap());
    assert!(!client.delete(NOTES, &id).await.unwrap());
    let fetched: Option<Note> = client.fetch(NOTES, &id).await.unwrap();
    assert!(fetched.is_none());
}
