use vaultview_prefs::{LocalStore, SqliteStore};

#[tokio::test]
async fn sqlite_store_round_trips_and_deletes() {
    let path = std::env::temp_dir().join(format!(
        "vaultview-prefs-sqlite-test-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let store = SqliteStore::open(&path).await.unwrap();
    assert_eq!(store.get_bytes("preferences").await.unwrap(), None);

    store
        .set_bytes("preferences", vec![1, 2, 3])
        .await
        .unwrap();
    assert_eq!(
        store.get_bytes("preferences").await.unwrap(),
        Some(vec![1, 2, 3])
    );

    // Overwrite through the upsert path.
    store.set_bytes("preferences", vec![9]).await.unwrap();
    assert_eq!(store.get_bytes("preferences").await.unwrap(), Some(vec![9]));

    store.delete("preferences").await.unwrap();
    assert_eq!(store.get_bytes("preferences").await.unwrap(), None);

    let _ = std::fs::remove_file(&path);
}
