//! Client-side session cache.
//!
//! Portal consumers keep the identity's organization list for a short TTL to
//! avoid refetching it on every navigation. The cache is an explicit object
//! (keyed by identity id) handed to whoever needs it; there is no module-level
//! singleton. Server-side handlers never consult it: membership is always
//! re-checked against the backend there.

use crate::{Backend, BackendError};
use lru::LruCache;
use portal_core::models::{CurrentUser, Organization};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Default freshness window for cached organization lists
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(5 * 60);

const DEFAULT_CAPACITY: usize = 256;

/// Source of the current time in epoch milliseconds
pub trait Clock: Send + Sync {
    fn now_epoch_ms(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Cached value and the time it was fetched
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub data: T,
    pub fetched_at_epoch_ms: i64,
}

impl<T> CacheEntry<T> {
    /// Stale once `ttl` has fully elapsed since the fetch. A clock that moved
    /// backwards counts as stale.
    pub fn is_stale(&self, now_epoch_ms: i64, ttl: Duration) -> bool {
        let age = now_epoch_ms - self.fetched_at_epoch_ms;
        age < 0 || age as u128 >= ttl.as_millis()
    }
}

/// Bounded TTL cache keyed by identity id
pub struct SessionCache<T> {
    entries: Mutex<LruCache<String, CacheEntry<T>>>,
    ttl: Duration,
}

impl<T: Clone> SessionCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Entry for `identity_id` if present, fresh or not
    pub fn peek(&self, identity_id: &str) -> Option<CacheEntry<T>> {
        self.lock().peek(identity_id).cloned()
    }

    /// Cached data for `identity_id` if it is still fresh at `now_epoch_ms`.
    /// Stale entries are evicted.
    pub fn get_fresh(&self, identity_id: &str, now_epoch_ms: i64) -> Option<T> {
        let mut entries = self.lock();
        let lookup = entries
            .get(identity_id)
            .map(|entry| (entry.is_stale(now_epoch_ms, self.ttl), entry.data.clone()));
        match lookup {
            Some((false, data)) => Some(data),
            Some((true, _)) => {
                entries.pop(identity_id);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, identity_id: &str, data: T, fetched_at_epoch_ms: i64) {
        self.lock().put(
            identity_id.to_string(),
            CacheEntry {
                data,
                fetched_at_epoch_ms,
            },
        );
    }

    pub fn invalidate(&self, identity_id: &str) {
        self.lock().pop(identity_id);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// Identity plus its organization memberships
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: CurrentUser,
    pub organizations: Vec<Organization>,
}

/// Loads sessions through a [`Backend`], reusing cached organization lists.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn Backend>,
    cache: Arc<SessionCache<Vec<Organization>>>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(
        backend: Arc<dyn Backend>,
        cache: Arc<SessionCache<Vec<Organization>>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backend,
            cache,
            clock,
        }
    }

    /// Store with the default 5 minute TTL and the wall clock
    pub fn with_defaults(backend: Arc<dyn Backend>) -> Self {
        Self::new(
            backend,
            Arc::new(SessionCache::new(DEFAULT_SESSION_TTL)),
            Arc::new(SystemClock),
        )
    }

    /// Organization list for `identity_id`, from cache when fresh
    pub async fn organizations(
        &self,
        identity_id: &str,
        token: &str,
    ) -> Result<Vec<Organization>, BackendError> {
        if let Some(orgs) = self
            .cache
            .get_fresh(identity_id, self.clock.now_epoch_ms())
        {
            tracing::trace!(identity_id, "Organization list served from cache");
            return Ok(orgs);
        }
        self.fetch(identity_id, token).await
    }

    /// Drop the cached list and fetch again (e.g. after creating a resource)
    pub async fn refetch(
        &self,
        identity_id: &str,
        token: &str,
    ) -> Result<Vec<Organization>, BackendError> {
        self.cache.invalidate(identity_id);
        self.fetch(identity_id, token).await
    }

    pub fn invalidate(&self, identity_id: &str) {
        self.cache.invalidate(identity_id);
    }

    /// Identity and memberships for `token`
    pub async fn load(&self, token: &str) -> Result<Session, BackendError> {
        let user = self.backend.current_user(token).await?;
        let organizations = self.organizations(&user.id, token).await?;
        Ok(Session {
            user,
            organizations,
        })
    }

    async fn fetch(
        &self,
        identity_id: &str,
        token: &str,
    ) -> Result<Vec<Organization>, BackendError> {
        let orgs = self.backend.list_organizations(token).await?;
        self.cache
            .insert(identity_id, orgs.clone(), self.clock.now_epoch_ms());
        tracing::debug!(
            identity_id,
            organizations = orgs.len(),
            "Organization list fetched"
        );
        Ok(orgs)
    }
}
