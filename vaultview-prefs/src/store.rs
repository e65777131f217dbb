//! The cross-store preference synchronizer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};

use crate::error::PrefsError;
use crate::local::LocalStore;
use crate::model::{PrefUpdate, Preferences, SizeBase};
use crate::remote::PreferenceService;

/// Key the full preference record is cached under locally.
const LOCAL_KEY: &str = "preferences";

/// Process-wide preference store.
///
/// One instance is shared by reference across every table view; it
/// outlives any single screen. The store keeps three copies of the record
/// consistent: the in-memory value (authoritative for reads), the durable
/// local cache (authoritative across restarts while offline), and the
/// remote service record (authoritative across installations).
///
/// Hydration is an explicit two-state lifecycle. Until [`load`] finishes
/// its one reconciliation, the store is `Loading` and nothing is pushed to
/// the remote service; reconciliation itself only ever writes memory and
/// the local cache. Only user-driven [`set`] calls after hydration trigger
/// the fire-and-forget remote write. That gate is what prevents a fetched
/// value from echoing straight back as a PUT.
///
/// [`load`]: PreferenceStore::load
/// [`set`]: PreferenceStore::set
pub struct PreferenceStore {
    current: RwLock<Preferences>,
    hydrated: AtomicBool,
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn PreferenceService>,
}

impl PreferenceStore {
    /// Create a store over a local cache and remote service.
    ///
    /// The record starts at its defaults; call [`load`] once at startup to
    /// hydrate it.
    ///
    /// [`load`]: PreferenceStore::load
    pub fn new(
        local: Arc<dyn LocalStore>,
        remote: Arc<dyn PreferenceService>,
    ) -> Arc<Self> {
        Arc::new(Self {
            current: RwLock::new(Preferences::default()),
            hydrated: AtomicBool::new(false),
            local,
            remote,
        })
    }

    /// Hydrate the record: local cache first for an immediate value, then
    /// one remote fetch with remote-wins reconciliation.
    ///
    /// Values from either side are migrated to the current valid ranges,
    /// never dropped. A remote fetch failure is logged and non-fatal; the
    /// local value stays authoritative until the next round-trip. Calling
    /// `load` again after hydration is an idempotent read.
    pub async fn load(&self) -> Result<Preferences, PrefsError> {
        if self.hydrated.load(Ordering::SeqCst) {
            return Ok(self.snapshot());
        }

        let mut prefs = match self.local.get_bytes(LOCAL_KEY).await? {
            Some(bytes) => match bincode::deserialize::<Preferences>(&bytes) {
                Ok(stored) => stored.normalized(),
                Err(err) => {
                    warn!("discarding unreadable local preferences: {err}");
                    Preferences::default()
                }
            },
            None => Preferences::default(),
        };
        *self.write_guard() = prefs.clone();

        match self.remote.fetch().await {
            Ok(remote) => {
                // Reconciliation is load-only: it updates memory and the
                // local cache, never the remote write path.
                if prefs.merge_remote(&remote) {
                    debug!("remote preferences differ, overwriting local values");
                    *self.write_guard() = prefs.clone();
                    self.persist_local(&prefs).await?;
                }
            }
            Err(err) => warn!("remote preference fetch failed: {err}"),
        }

        self.hydrated.store(true, Ordering::SeqCst);
        Ok(self.snapshot())
    }

    /// Apply a user-driven update: memory and the local durable cache
    /// synchronously (works offline), then a fire-and-forget remote write
    /// of the full record.
    ///
    /// Concurrent calls are last-write-wins per key. Remote failures are
    /// logged inside the spawned task and never reach the caller; only
    /// local database errors propagate.
    pub async fn set(&self, update: PrefUpdate) -> Result<(), PrefsError> {
        let snapshot = {
            let mut guard = self.write_guard();
            guard.apply(update);
            guard.clone()
        };

        self.persist_local(&snapshot).await?;

        if self.hydrated.load(Ordering::SeqCst) {
            let remote = Arc::clone(&self.remote);
            tokio::spawn(async move {
                if let Err(err) = remote.store(&snapshot).await {
                    warn!("remote preference write failed: {err}");
                }
            });
        }
        Ok(())
    }

    /// Current value of the whole record.
    pub fn snapshot(&self) -> Preferences {
        self.read_guard().clone()
    }

    /// Current page size.
    pub fn page_size(&self) -> u32 {
        self.read_guard().page_size
    }

    /// Current display-unit base.
    pub fn size_base(&self) -> SizeBase {
        self.read_guard().size_base
    }

    /// Current font scale.
    pub fn font_scale(&self) -> f32 {
        self.read_guard().font_scale
    }

    /// Whether the one-time reconciliation has completed.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated.load(Ordering::SeqCst)
    }

    async fn persist_local(&self, prefs: &Preferences) -> Result<(), PrefsError> {
        let bytes = bincode::serialize(prefs).map_err(PrefsError::Serialization)?;
        self.local.set_bytes(LOCAL_KEY, bytes).await
    }

    // Preference writes never panic while holding the lock, but a poisoned
    // lock still holds a coherent record, so recover it instead of failing
    // every read after an unrelated panic.
    fn read_guard(&self) -> RwLockReadGuard<'_, Preferences> {
        self.current.read().unwrap_or_else(|err| err.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Preferences> {
        self.current.write().unwrap_or_else(|err| err.into_inner())
    }
}
