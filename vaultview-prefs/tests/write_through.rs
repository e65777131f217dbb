//! The table engine and the preference store working together: a
//! gesture-driven page-size change on one screen propagates to the shared
//! store and from there to every other table.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use vaultview_prefs::{
    MemoryStore, PrefUpdate, PreferenceService, PreferenceStore, Preferences, PrefsError,
    RemotePreferences,
};
use vaultview_table::{
    ColumnDef, EngineConfig, PaginationState, TableEngine, TableGesture, TableRow,
};

#[derive(Default)]
struct RecordingService {
    record: Mutex<RemotePreferences>,
}

#[async_trait]
impl PreferenceService for RecordingService {
    async fn fetch(&self) -> Result<RemotePreferences, PrefsError> {
        Ok(self.record.lock().unwrap().clone())
    }

    async fn store(&self, prefs: &Preferences) -> Result<(), PrefsError> {
        *self.record.lock().unwrap() = RemotePreferences::from(prefs);
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Backup {
    id: u32,
}

impl TableRow for Backup {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

fn columns() -> Vec<ColumnDef<Backup>> {
    vec![ColumnDef::new("id", |b: &Backup| i64::from(b.id).into())]
}

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn page_size_gesture_reaches_the_shared_store_and_other_tables() {
    let service = Arc::new(RecordingService::default());
    let store = PreferenceStore::new(Arc::new(MemoryStore::new()), Arc::clone(&service) as _);
    store.load().await.unwrap();

    let data: Vec<Backup> = (0..60).map(|id| Backup { id }).collect();
    let mut jobs_table = TableEngine::new(data.clone(), columns(), EngineConfig::default());
    jobs_table.set_pagination(PaginationState::with_page_size(store.page_size() as usize));

    let store_for_hook = Arc::clone(&store);
    jobs_table.on_page_size_change(move |size| {
        let store = Arc::clone(&store_for_hook);
        tokio::spawn(async move {
            if let Err(err) = store.set(PrefUpdate::PageSize(size as u32)).await {
                log::warn!("page size write-through failed: {err}");
            }
        });
    });

    let view = jobs_table.apply(TableGesture::PageSizeChange(25));
    assert_eq!(view.pagination.page_size, 25);
    settle().await;

    // The shared store converged locally and remotely.
    assert_eq!(store.page_size(), 25);
    assert_eq!(service.record.lock().unwrap().page_size, Some(25));

    // A second screen mounting afterwards reads the same size.
    let mut restore_table = TableEngine::new(data, columns(), EngineConfig::default());
    let view = restore_table
        .set_pagination(PaginationState::with_page_size(store.page_size() as usize));
    assert_eq!(view.pagination.page_size, 25);
    assert_eq!(view.page_count, 3);
}
