//! Recently selected locations and the last used location.
//!
//! Both stores swallow storage errors: a failed read behaves like an empty
//! store and a failed write is only logged.

use super::{KeyValueStore, get_value, put_value};
use crate::models::Location;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum number of remembered locations
pub const MAX_RECENTS: usize = 15;

const RECENTS_KEY: &str = "recent_locations";
const LAST_LOCATION_KEY: &str = "last_location";

/// Newest-first list of selected locations
#[derive(Clone)]
pub struct RecentsStore {
    store: Arc<dyn KeyValueStore>,
}

impl RecentsStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All remembered locations, newest first
    pub async fn list(&self) -> Vec<Location> {
        match get_value::<Vec<Location>>(self.store.as_ref(), RECENTS_KEY).await {
            Ok(recents) => recents.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to read recent locations: {}", e);
                Vec::new()
            }
        }
    }

    /// Put `location` at the front, replacing any entry with the same id or
    /// the same name (case-insensitive), and return the updated list.
    pub async fn save(&self, location: &Location) -> Vec<Location> {
        let recents = insert_recent(self.list().await, location.clone());

        if let Err(e) = put_value(self.store.as_ref(), RECENTS_KEY, &recents).await {
            warn!("Failed to save recent locations: {}", e);
        } else {
            debug!("Saved {} to recents ({} entries)", location.name, recents.len());
        }
        recents
    }

    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(RECENTS_KEY).await {
            warn!("Failed to clear recent locations: {}", e);
        }
    }
}

fn insert_recent(mut recents: Vec<Location>, location: Location) -> Vec<Location> {
    let name = location.normalized_name();
    recents.retain(|existing| existing.id != location.id && existing.normalized_name() != name);
    recents.insert(0, location);
    recents.truncate(MAX_RECENTS);
    recents
}

/// The most recently used location
#[derive(Clone)]
pub struct LastLocationStore {
    store: Arc<dyn KeyValueStore>,
}

impl LastLocationStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Option<Location> {
        match get_value::<Location>(self.store.as_ref(), LAST_LOCATION_KEY).await {
            Ok(location) => location,
            Err(e) => {
                warn!("Failed to read last location: {}", e);
                None
            }
        }
    }

    pub async fn save(&self, location: &Location) {
        if let Err(e) = put_value(self.store.as_ref(), LAST_LOCATION_KEY, location).await {
            warn!("Failed to save last location: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::{Result, RideError};
    use async_trait::async_trait;

    fn place(i: usize) -> Location {
        Location::new(40.0 + i as f64, 2.0, format!("Town {i}"))
    }

    fn recents() -> RecentsStore {
        RecentsStore::new(Arc::new(MemoryStore::new()))
    }

    /// Store whose every operation fails
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(RideError::storage("disk on fire"))
        }
        async fn put(&self, _key: &str, _value: Vec<u8>) -> Result<()> {
            Err(RideError::storage("disk on fire"))
        }
        async fn remove(&self, _key: &str) -> Result<()> {
            Err(RideError::storage("disk on fire"))
        }
    }

    #[tokio::test]
    async fn test_recents_capped_newest_first() {
        let store = recents();
        for i in 0..16 {
            store.save(&place(i)).await;
        }

        let list = store.list().await;
        assert_eq!(list.len(), MAX_RECENTS);
        assert_eq!(list[0].name, "Town 15");
        assert_eq!(list[14].name, "Town 1");
        assert!(list.iter().all(|l| l.name != "Town 0"));
    }

    #[tokio::test]
    async fn test_same_name_replaces_entry() {
        let store = recents();
        store.save(&Location::new(41.98, 2.82, "Girona".to_string())).await;
        store.save(&place(1)).await;
        store.save(&Location::new(41.99, 2.83, "  GIRONA".to_string())).await;

        let list = store.list().await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "  GIRONA");
        assert_eq!(list[0].latitude, 41.99);
        assert_eq!(list[1].name, "Town 1");
    }

    #[tokio::test]
    async fn test_same_id_replaces_entry() {
        let store = recents();
        let mut first = place(1);
        first.id = "geo-42".to_string();
        let mut renamed = place(2);
        renamed.id = "geo-42".to_string();

        store.save(&first).await;
        store.save(&renamed).await;

        let list = store.list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Town 2");
    }

    #[tokio::test]
    async fn test_clear_recents() {
        let store = recents();
        store.save(&place(1)).await;
        store.clear().await;
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_storage_errors_are_swallowed() {
        let broken: Arc<dyn KeyValueStore> = Arc::new(BrokenStore);
        let store = RecentsStore::new(broken.clone());

        assert!(store.list().await.is_empty());
        let saved = store.save(&place(1)).await;
        assert_eq!(saved.len(), 1);

        let last = LastLocationStore::new(broken);
        last.save(&place(1)).await;
        assert!(last.load().await.is_none());
    }

    #[tokio::test]
    async fn test_last_location_round_trip() {
        let last = LastLocationStore::new(Arc::new(MemoryStore::new()));
        assert!(last.load().await.is_none());

        let location = place(3).with_details(Some("Catalonia".to_string()), None);
        last.save(&location).await;
        assert_eq!(last.load().await, Some(location));
    }
}
