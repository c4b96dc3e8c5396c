use refbase::errors::ErrorKind;
use refbase_int_test::test_util::{connect_over, create_test_context, InterposingStore};
use serde_json::json;

#[tokio::test]
async fn test_stale_writer_observes_conflict() {
    let ctx = create_test_context().unwrap();
    ctx.db().doc("team/x").unwrap().set(json!({"v": 1})).await.unwrap();

    // a concurrent writer lands between this writer's pre-read and write
    let racing = connect_over(InterposingStore::new(
        ctx.store(),
        "team/x.json",
        br#"{"winner": true}"#,
    ))
    .unwrap();

    let err = racing.doc("team/x").unwrap().set(json!({"v": 2})).await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Conflict);

    // the concurrent writer's content persisted; nothing was clobbered
    let snapshot = ctx.db().doc("team/x").unwrap().get().await.unwrap();
    assert_eq!(snapshot.data, Some(json!({"winner": true})));
}

#[tokio::test]
async fn test_stale_delete_observes_conflict() {
    let ctx = create_test_context().unwrap();
    ctx.db().doc("team/x").unwrap().set(json!({"v": 1})).await.unwrap();

    let racing = connect_over(InterposingStore::new(
        ctx.store(),
        "team/x.json",
        br#"{"winner": true}"#,
    ))
    .unwrap();

    let err = racing.doc("team/x").unwrap().delete().await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Conflict);

    let snapshot = ctx.db().doc("team/x").unwrap().get().await.unwrap();
    assert!(snapshot.exists);
    assert_eq!(snapshot.data, Some(json!({"winner": true})));
}

#[tokio::test]
async fn test_conflicted_writer_succeeds_after_re_read() {
    let ctx = create_test_context().unwrap();
    ctx.db().doc("team/x").unwrap().set(json!({"v": 1})).await.unwrap();

    let racing = connect_over(InterposingStore::new(
        ctx.store(),
        "team/x.json",
        br#"{"winner": true}"#,
    ))
    .unwrap();
    let doc = racing.doc("team/x").unwrap();

    let err = doc.set(json!({"v": 2})).await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Conflict);

    // nothing is retried automatically; a fresh attempt pre-reads the new
    // token and goes through
    doc.set(json!({"v": 2})).await.unwrap();
    let snapshot = ctx.db().doc("team/x").unwrap().get().await.unwrap();
    assert_eq!(snapshot.data, Some(json!({"v": 2})));
}

#[tokio::test]
async fn test_update_merges_against_interposed_content_after_re_read() {
    let ctx = create_test_context().unwrap();
    ctx.db().doc("team/x").unwrap().set(json!({"a": 1})).await.unwrap();

    let racing = connect_over(InterposingStore::new(
        ctx.store(),
        "team/x.json",
        br#"{"a": 1, "b": 2}"#,
    ))
    .unwrap();
    let doc = racing.doc("team/x").unwrap();

    let err = doc.update(json!({"c": 3})).await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Conflict);

    // after the conflict the retry merges into what the other writer stored
    doc.update(json!({"c": 3})).await.unwrap();
    let snapshot = ctx.db().doc("team/x").unwrap().get().await.unwrap();
    assert_eq!(snapshot.data, Some(json!({"a": 1, "b": 2, "c": 3})));
}
