//! Per-user profile persistence: assessment answers plus ranked careers.
//!
//! Two independent backends give at-least-once durability. The remote
//! document store is the primary; the local file store is written
//! unconditionally as a secondary backup on every save and consulted on
//! read only when the remote tier fails or has nothing. The two are never
//! reconciled. Racing saves for one user are last-write-wins — no version
//! token is kept, only an `updatedAt` timestamp for inspection.

pub mod handlers;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::warn;

use crate::errors::AppError;
use crate::models::career::{sort_by_match, Career, UserProfile};
use crate::store::local::LocalStore;
use crate::store::{DocumentStore, StoreError};

const PROFILES_COLLECTION: &str = "profiles";

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn save(&self, user_id: &str, profile: &UserProfile) -> Result<(), StoreError>;
    async fn load(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Remote tier — document store
// ────────────────────────────────────────────────────────────────────────────

pub struct RemoteProfileStore {
    docs: Arc<dyn DocumentStore>,
}

impl RemoteProfileStore {
    pub fn new(docs: Arc<dyn DocumentStore>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl ProfileStore for RemoteProfileStore {
    async fn save(&self, user_id: &str, profile: &UserProfile) -> Result<(), StoreError> {
        let value = json!({
            "answers": profile.answers,
            "careers": profile.careers,
            "updatedAt": Utc::now().to_rfc3339(),
        });
        self.docs.set(PROFILES_COLLECTION, user_id, &value).await
    }

    async fn load(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        match self.docs.get(PROFILES_COLLECTION, user_id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Local tier — file-backed key/value map
// ────────────────────────────────────────────────────────────────────────────

pub struct LocalProfileStore {
    store: Arc<LocalStore>,
}

impl LocalProfileStore {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    fn key(user_id: &str) -> String {
        format!("profile_{user_id}")
    }
}

#[async_trait]
impl ProfileStore for LocalProfileStore {
    async fn save(&self, user_id: &str, profile: &UserProfile) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(profile)?;
        self.store.set(&Self::key(user_id), &serialized)?;
        Ok(())
    }

    async fn load(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let Some(stored) = self.store.get(&Self::key(user_id)) else {
            return Ok(None);
        };
        match serde_json::from_str(&stored) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!("Discarding unreadable local profile for {user_id}: {e}");
                Ok(None)
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback decorator — the dual-backend policy, made explicit
// ────────────────────────────────────────────────────────────────────────────

/// Save: try remote (failure absorbed), then always write local. Load:
/// prefer remote, fall back to local on failure or absence.
pub struct FallbackProfileStore {
    remote: Option<Arc<dyn ProfileStore>>,
    local: Arc<dyn ProfileStore>,
}

impl FallbackProfileStore {
    pub fn new(remote: Option<Arc<dyn ProfileStore>>, local: Arc<dyn ProfileStore>) -> Self {
        Self { remote, local }
    }
}

#[async_trait]
impl ProfileStore for FallbackProfileStore {
    async fn save(&self, user_id: &str, profile: &UserProfile) -> Result<(), StoreError> {
        let mut remote_ok = false;
        if let Some(remote) = &self.remote {
            match remote.save(user_id, profile).await {
                Ok(()) => remote_ok = true,
                Err(e) => warn!("Remote profile save failed for {user_id}, keeping local copy: {e}"),
            }
        }

        match self.local.save(user_id, profile).await {
            Ok(()) => Ok(()),
            Err(e) if remote_ok => {
                warn!("Local backup write failed for {user_id}: {e}");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn load(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.load(user_id).await {
                Ok(Some(profile)) => return Ok(Some(profile)),
                Ok(None) => {}
                Err(e) => warn!("Remote profile load failed for {user_id}, trying local: {e}"),
            }
        }
        self.local.load(user_id).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Mutations
// ────────────────────────────────────────────────────────────────────────────

/// Appends newly generated careers, re-sorts the full list by descending
/// match, and re-persists the whole profile. Returns the updated list.
pub async fn append_careers(
    store: &dyn ProfileStore,
    user_id: &str,
    additions: Vec<Career>,
) -> Result<Vec<Career>, AppError> {
    let mut profile = store
        .load(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {user_id}")))?;

    profile.careers.extend(additions);
    sort_by_match(&mut profile.careers);
    store.save(user_id, &profile).await?;
    Ok(profile.careers)
}

/// Flips the favorite flag of the career at `index` in the sorted list,
/// leaving every other entry untouched, and re-persists the profile.
pub async fn toggle_favorite(
    store: &dyn ProfileStore,
    user_id: &str,
    index: usize,
) -> Result<Career, AppError> {
    let mut profile = store
        .load(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {user_id}")))?;

    let career = profile.careers.get_mut(index).ok_or_else(|| {
        AppError::Validation(format!("Career index {index} is out of range"))
    })?;
    career.is_favorite = Some(!career.is_favorite.unwrap_or(false));
    let toggled = career.clone();

    store.save(user_id, &profile).await?;
    Ok(toggled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::career::tests::sample_answers;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryProfileStore {
        profiles: Mutex<HashMap<String, UserProfile>>,
        fail: bool,
    }

    impl MemoryProfileStore {
        fn shared() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                profiles: Mutex::new(HashMap::new()),
                fail: true,
            })
        }

        fn contains(&self, user_id: &str) -> bool {
            self.profiles.lock().unwrap().contains_key(user_id)
        }
    }

    #[async_trait]
    impl ProfileStore for MemoryProfileStore {
        async fn save(&self, user_id: &str, profile: &UserProfile) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::NotFound("offline".to_string()));
            }
            self.profiles
                .lock()
                .unwrap()
                .insert(user_id.to_string(), profile.clone());
            Ok(())
        }

        async fn load(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
            if self.fail {
                return Err(StoreError::NotFound("offline".to_string()));
            }
            Ok(self.profiles.lock().unwrap().get(user_id).cloned())
        }
    }

    fn career(name: &str, match_score: u8) -> Career {
        Career {
            name: name.to_string(),
            match_score,
            category: String::new(),
            description: String::new(),
            salary: String::new(),
            growth: String::new(),
            education: String::new(),
            is_favorite: None,
        }
    }

    fn profile(careers: Vec<Career>) -> UserProfile {
        UserProfile {
            answers: sample_answers(),
            careers,
        }
    }

    #[tokio::test]
    async fn test_save_writes_local_even_when_remote_succeeds() {
        let remote = MemoryProfileStore::shared();
        let local = MemoryProfileStore::shared();
        let store = FallbackProfileStore::new(Some(remote.clone()), local.clone());

        store.save("u1", &profile(vec![])).await.unwrap();

        assert!(remote.contains("u1"));
        assert!(local.contains("u1"));
    }

    #[tokio::test]
    async fn test_save_survives_remote_failure() {
        let local = MemoryProfileStore::shared();
        let store = FallbackProfileStore::new(Some(MemoryProfileStore::failing()), local.clone());

        store.save("u1", &profile(vec![])).await.unwrap();
        assert!(local.contains("u1"));
    }

    #[tokio::test]
    async fn test_save_fails_only_when_both_tiers_fail() {
        let store = FallbackProfileStore::new(
            Some(MemoryProfileStore::failing()),
            MemoryProfileStore::failing(),
        );
        assert!(store.save("u1", &profile(vec![])).await.is_err());
    }

    #[tokio::test]
    async fn test_load_prefers_remote() {
        let remote = MemoryProfileStore::shared();
        let local = MemoryProfileStore::shared();
        remote
            .save("u1", &profile(vec![career("Remote Copy", 90)]))
            .await
            .unwrap();
        local
            .save("u1", &profile(vec![career("Local Copy", 10)]))
            .await
            .unwrap();

        let store = FallbackProfileStore::new(Some(remote), local);
        let loaded = store.load("u1").await.unwrap().unwrap();
        assert_eq!(loaded.careers[0].name, "Remote Copy");
    }

    #[tokio::test]
    async fn test_load_falls_back_when_remote_fails() {
        let local = MemoryProfileStore::shared();
        local
            .save("u1", &profile(vec![career("Local Copy", 10)]))
            .await
            .unwrap();

        let store = FallbackProfileStore::new(Some(MemoryProfileStore::failing()), local);
        let loaded = store.load("u1").await.unwrap().unwrap();
        assert_eq!(loaded.careers[0].name, "Local Copy");
    }

    #[tokio::test]
    async fn test_load_falls_back_when_remote_has_nothing() {
        let local = MemoryProfileStore::shared();
        local.save("u1", &profile(vec![])).await.unwrap();

        let store = FallbackProfileStore::new(Some(MemoryProfileStore::shared()), local);
        assert!(store.load("u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_local_only_when_remote_unconfigured() {
        let local = MemoryProfileStore::shared();
        let store = FallbackProfileStore::new(None, local.clone());

        store.save("u1", &profile(vec![])).await.unwrap();
        assert!(local.contains("u1"));
        assert!(store.load("u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_append_careers_resorts_and_persists() {
        let store = MemoryProfileStore::shared();
        store
            .save("u1", &profile(vec![career("Existing", 80)]))
            .await
            .unwrap();

        let updated = append_careers(
            store.as_ref(),
            "u1",
            vec![career("Better", 92), career("Worse", 50)],
        )
        .await
        .unwrap();

        let names: Vec<&str> = updated.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Better", "Existing", "Worse"]);

        let persisted = store.load("u1").await.unwrap().unwrap();
        assert_eq!(persisted.careers.len(), 3);
        assert_eq!(persisted.careers[0].name, "Better");
    }

    #[tokio::test]
    async fn test_append_requires_existing_profile() {
        let store = MemoryProfileStore::shared();
        let result = append_careers(store.as_ref(), "ghost", vec![career("X", 50)]).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_toggle_favorite_flips_only_target_index() {
        let store = MemoryProfileStore::shared();
        let mut second = career("B", 80);
        second.is_favorite = Some(true);
        store
            .save("u1", &profile(vec![career("A", 90), second]))
            .await
            .unwrap();

        let toggled = toggle_favorite(store.as_ref(), "u1", 0).await.unwrap();
        assert_eq!(toggled.is_favorite, Some(true));

        let persisted = store.load("u1").await.unwrap().unwrap();
        assert_eq!(persisted.careers[0].is_favorite, Some(true));
        assert_eq!(persisted.careers[1].is_favorite, Some(true));

        let untoggled = toggle_favorite(store.as_ref(), "u1", 0).await.unwrap();
        assert_eq!(untoggled.is_favorite, Some(false));
    }

    #[tokio::test]
    async fn test_toggle_favorite_rejects_out_of_range_index() {
        let store = MemoryProfileStore::shared();
        store.save("u1", &profile(vec![career("A", 90)])).await.unwrap();

        let result = toggle_favorite(store.as_ref(), "u1", 5).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
