use crate::interceptor::{PolicySource, RequestInterceptor};
use crate::policy::Policy;
use crate::raw::RawPolicy;
use crate::sanitize::sanitize;
use std::convert::Infallible;
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{info, warn};

/// Persistence collaborator holding the raw policy record.
pub trait PolicyStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// `Ok(None)` when no record has been written yet.
    fn load(&self) -> Result<Option<RawPolicy>, Self::Error>;

    fn save(&self, record: &RawPolicy) -> Result<(), Self::Error>;

    fn delete(&self) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum StoreError<E>
where
    E: std::error::Error + 'static,
{
    #[error("policy storage failed")]
    Storage(#[source] E),
}

/// In-process storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Mutex<Option<RawPolicy>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: RawPolicy) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl PolicyStorage for MemoryStorage {
    type Error = Infallible;

    fn load(&self) -> Result<Option<RawPolicy>, Self::Error> {
        Ok(self
            .record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, record: &RawPolicy) -> Result<(), Self::Error> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.clone());
        Ok(())
    }

    fn delete(&self) -> Result<(), Self::Error> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}

/// Process-wide holder of the effective policy.
///
/// Readers load the current `Arc<Policy>` without locking; writers publish a
/// whole new snapshot, so a request sees either the old or the new policy.
/// Writers are serialized so the stored record and the live snapshot agree.
pub struct PolicyStore<S> {
    storage: S,
    current: ArcSwap<Policy>,
    writer: Mutex<()>,
}

impl<S: PolicyStorage> PolicyStore<S> {
    /// Loads and sanitizes the stored record. A missing record yields
    /// [`Policy::default`].
    pub fn open(storage: S) -> Result<Self, StoreError<S::Error>> {
        let policy = Self::load_policy(&storage)?;
        Ok(Self {
            storage,
            current: ArcSwap::from_pointee(policy),
            writer: Mutex::new(()),
        })
    }

    pub fn snapshot(&self) -> Arc<Policy> {
        self.current.load_full()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Writes the default record unless one already exists, then publishes the
    /// stored policy.
    pub fn install(&self) -> Result<Arc<Policy>, StoreError<S::Error>> {
        let _writer = self.lock_writer();
        let existing = self.storage.load().map_err(storage_error)?;
        let policy = match existing {
            Some(record) => sanitize(&record),
            None => {
                let policy = Policy::default();
                self.storage
                    .save(&policy.to_raw())
                    .map_err(storage_error)?;
                info!("installed default CORS policy");
                policy
            }
        };
        Ok(self.publish(policy))
    }

    /// Sanitizes a submission, saves the canonical record and publishes it.
    /// On a storage error the previous snapshot stays current.
    pub fn update(&self, submission: &RawPolicy) -> Result<Arc<Policy>, StoreError<S::Error>> {
        let policy = sanitize(submission);
        let _writer = self.lock_writer();
        self.storage
            .save(&policy.to_raw())
            .map_err(storage_error)?;
        Ok(self.publish(policy))
    }

    pub fn reload(&self) -> Result<Arc<Policy>, StoreError<S::Error>> {
        let _writer = self.lock_writer();
        let policy = Self::load_policy(&self.storage)?;
        Ok(self.publish(policy))
    }

    /// Removes the stored record and falls back to the disabled default.
    pub fn uninstall(&self) -> Result<Arc<Policy>, StoreError<S::Error>> {
        let _writer = self.lock_writer();
        self.storage.delete().map_err(storage_error)?;
        info!("removed stored CORS policy");
        Ok(self.publish(Policy::default()))
    }

    fn load_policy(storage: &S) -> Result<Policy, StoreError<S::Error>> {
        let record = storage.load().map_err(storage_error)?;
        Ok(record.as_ref().map(sanitize).unwrap_or_default())
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, policy: Policy) -> Arc<Policy> {
        let snapshot = Arc::new(policy);
        self.current.store(Arc::clone(&snapshot));
        info!(
            enabled = snapshot.enabled,
            origins = snapshot.allowed_origins.len(),
            "published CORS policy"
        );
        snapshot
    }
}

fn storage_error<E: std::error::Error + 'static>(err: E) -> StoreError<E> {
    warn!(error = %err, "CORS policy storage failed");
    StoreError::Storage(err)
}

impl<S: PolicyStorage> PolicySource for Arc<PolicyStore<S>> {
    fn current(&self) -> Arc<Policy> {
        self.snapshot()
    }
}

impl<S: PolicyStorage> RequestInterceptor<Arc<PolicyStore<S>>> {
    /// Binds the interceptor to a store; each request reads the snapshot
    /// current at that moment.
    pub fn from_store(store: Arc<PolicyStore<S>>) -> Self {
        Self::with_source(store)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
