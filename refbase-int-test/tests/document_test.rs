use refbase::errors::ErrorKind;
use refbase_int_test::test_util::create_test_context;
use serde_json::json;

#[tokio::test]
async fn test_set_get_round_trip() {
    let ctx = create_test_context().unwrap();
    let doc = ctx.db().doc("users/alice").unwrap();

    let data = json!({
        "name": "Alice",
        "age": 30,
        "active": true,
        "score": 4.5,
        "tags": ["admin", "beta"],
        "profile": {"city": "Oslo"},
        "note": null,
    });
    doc.set(data.clone()).await.unwrap();

    let snapshot = doc.get().await.unwrap();
    assert!(snapshot.exists);
    assert_eq!(snapshot.id, "alice");
    assert_eq!(snapshot.path, "users/alice");
    assert_eq!(snapshot.data, Some(data));
}

#[tokio::test]
async fn test_get_missing_document_is_not_an_error() {
    let ctx = create_test_context().unwrap();
    let snapshot = ctx.db().doc("users/nobody").unwrap().get().await.unwrap();
    assert!(!snapshot.exists);
    assert_eq!(snapshot.data, None);
    assert_eq!(snapshot.id, "nobody");
    assert_eq!(snapshot.path, "users/nobody");
}

#[tokio::test]
async fn test_set_without_merge_overwrites() {
    let ctx = create_test_context().unwrap();
    let doc = ctx.db().doc("users/alice").unwrap();

    doc.set(json!({"x": 1})).await.unwrap();
    doc.set(json!({"y": 2})).await.unwrap();

    let snapshot = doc.get().await.unwrap();
    assert_eq!(snapshot.data, Some(json!({"y": 2})));
}

#[tokio::test]
async fn test_update_merges_top_level_fields() {
    let ctx = create_test_context().unwrap();
    let doc = ctx.db().doc("users/alice").unwrap();

    doc.set(json!({"a": 1, "b": 2})).await.unwrap();
    doc.update(json!({"b": 3, "c": 4})).await.unwrap();

    let snapshot = doc.get().await.unwrap();
    assert_eq!(snapshot.data, Some(json!({"a": 1, "b": 3, "c": 4})));
}

#[tokio::test]
async fn test_update_on_absent_document_behaves_as_set() {
    let ctx = create_test_context().unwrap();
    let doc = ctx.db().doc("users/alice").unwrap();

    doc.update(json!({"a": 1})).await.unwrap();

    let snapshot = doc.get().await.unwrap();
    assert!(snapshot.exists);
    assert_eq!(snapshot.data, Some(json!({"a": 1})));
}

#[tokio::test]
async fn test_update_replaces_nested_objects_wholesale() {
    let ctx = create_test_context().unwrap();
    let doc = ctx.db().doc("users/alice").unwrap();

    doc.set(json!({"profile": {"city": "Oslo", "zip": "0150"}, "age": 30}))
        .await
        .unwrap();
    doc.update(json!({"profile": {"city": "Bergen"}})).await.unwrap();

    let snapshot = doc.get().await.unwrap();
    // top-level merge only: "profile" was replaced, "age" survived
    assert_eq!(
        snapshot.data,
        Some(json!({"profile": {"city": "Bergen"}, "age": 30}))
    );
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let ctx = create_test_context().unwrap();
    let doc = ctx.db().doc("users/ghost").unwrap();

    // deleting a document that never existed succeeds
    doc.delete().await.unwrap();

    doc.set(json!({"here": true})).await.unwrap();
    doc.delete().await.unwrap();
    doc.delete().await.unwrap();

    let snapshot = doc.get().await.unwrap();
    assert!(!snapshot.exists);
}

#[tokio::test]
async fn test_set_after_delete_recreates() {
    let ctx = create_test_context().unwrap();
    let doc = ctx.db().doc("users/alice").unwrap();

    doc.set(json!({"v": 1})).await.unwrap();
    doc.delete().await.unwrap();
    doc.set(json!({"v": 2})).await.unwrap();

    let snapshot = doc.get().await.unwrap();
    assert_eq!(snapshot.data, Some(json!({"v": 2})));
}

#[tokio::test]
async fn test_corrupt_stored_content_fails_get() {
    let ctx = create_test_context().unwrap();
    ctx.seed_raw("users/alice.json", b"definitely not json").await.unwrap();

    let err = ctx.db().doc("users/alice").unwrap().get().await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::CorruptDocument);
    assert!(err.cause().is_some());
}

#[tokio::test]
async fn test_corrupt_stored_content_fails_merge() {
    let ctx = create_test_context().unwrap();
    ctx.seed_raw("users/alice.json", b"{broken").await.unwrap();

    let doc = ctx.db().doc("users/alice").unwrap();
    let err = doc.update(json!({"a": 1})).await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::CorruptDocument);

    // a plain set never parses the old content, so it repairs the document
    doc.set(json!({"a": 1})).await.unwrap();
    assert_eq!(doc.get().await.unwrap().data, Some(json!({"a": 1})));
}

#[tokio::test]
async fn test_handles_to_same_path_see_same_document() {
    let ctx = create_test_context().unwrap();
    let db = ctx.db();

    db.doc("users/alice").unwrap().set(json!({"v": 1})).await.unwrap();

    let via_collection = db.collection("users").unwrap().doc("alice").unwrap();
    let snapshot = via_collection.get().await.unwrap();
    assert_eq!(snapshot.data, Some(json!({"v": 1})));
}

#[tokio::test]
async fn test_non_object_document_bodies() {
    let ctx = create_test_context().unwrap();
    let doc = ctx.db().doc("values/answer").unwrap();

    doc.set(json!(42)).await.unwrap();
    assert_eq!(doc.get().await.unwrap().data, Some(json!(42)));

    // merging a non-object pair falls back to full replacement
    doc.update(json!(["a", "b"])).await.unwrap();
    assert_eq!(doc.get().await.unwrap().data, Some(json!(["a", "b"])));
}
