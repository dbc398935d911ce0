pub mod cancel;
pub mod session;
pub mod state;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::{ApiClient, ApiError};
use crate::core::event::CalendarEvent;
use crate::core::gift::Gift;
use crate::core::journal::JournalEntry;
use crate::core::todo::Todo;
use crate::core::trip::Trip;

pub use cancel::CancelScope;
pub use session::Session;
pub use state::AppState;

/// A backend-managed entity type. Implementing this is all it takes to get a
/// fully wired store for a new resource.
pub trait Resource: Clone + Serialize + DeserializeOwned {
    /// Collection path segment under `/api/`.
    const PATH: &'static str;

    /// The server-assigned identifier; `None` until first persisted.
    fn id(&self) -> Option<u64>;
}

impl Resource for Todo {
    const PATH: &'static str = "todos";
    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl Resource for Gift {
    const PATH: &'static str = "gifts";
    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl Resource for JournalEntry {
    const PATH: &'static str = "journal";
    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl Resource for CalendarEvent {
    const PATH: &'static str = "events";
    fn id(&self) -> Option<u64> {
        self.id
    }
}

impl Resource for Trip {
    const PATH: &'static str = "trips";
    fn id(&self) -> Option<u64> {
        self.id
    }
}

/// In-memory list for one resource plus its loading/error pair. The list is
/// the only cache; a fetch rebuilds it from the backend wholesale.
#[derive(Debug, Clone)]
pub struct ResourceStore<R: Resource> {
    items: Vec<R>,
    loading: bool,
    error: Option<String>,
}

impl<R: Resource> Default for ResourceStore<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn find(&self, id: u64) -> Option<&R> {
        self.items.iter().find(|item| item.id() == Some(id))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Views dismiss a shown error through this.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replace the list with the server's response, in server order.
    pub async fn fetch_all(
        &mut self,
        api: &ApiClient,
        scope: &CancelScope,
    ) -> Result<(), ApiError> {
        self.begin();
        let result = api.get_list::<R>(R::PATH).await;
        self.settle_fetch(scope, result)
    }

    /// POST a draft; the server's copy (with its assigned id) is appended.
    pub async fn create(
        &mut self,
        api: &ApiClient,
        scope: &CancelScope,
        draft: &R,
    ) -> Result<(), ApiError> {
        self.begin();
        let result = api.post::<R, R>(R::PATH, draft).await;
        self.settle_create(scope, result)
    }

    /// PATCH a partial update; the returned item replaces the matching entry.
    pub async fn update(
        &mut self,
        api: &ApiClient,
        scope: &CancelScope,
        id: u64,
        patch: &serde_json::Value,
    ) -> Result<(), ApiError> {
        self.begin();
        let result = api.patch::<R>(R::PATH, id, patch).await;
        self.settle_update(scope, result)
    }

    /// PUT a full replacement, for resources saved wholesale (trips and
    /// their nested collections).
    pub async fn replace(
        &mut self,
        api: &ApiClient,
        scope: &CancelScope,
        id: u64,
        item: &R,
    ) -> Result<(), ApiError> {
        self.begin();
        let result = api.put::<R, R>(R::PATH, id, item).await;
        self.settle_update(scope, result)
    }

    /// DELETE by id and drop the matching entry, whatever the response body.
    pub async fn delete(
        &mut self,
        api: &ApiClient,
        scope: &CancelScope,
        id: u64,
    ) -> Result<(), ApiError> {
        self.begin();
        let result = api.delete(R::PATH, id).await;
        self.settle_delete(scope, result, id)
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn settle_fetch(
        &mut self,
        scope: &CancelScope,
        result: Result<Vec<R>, ApiError>,
    ) -> Result<(), ApiError> {
        self.loading = false;
        if scope.is_cancelled() {
            log::debug!("Dropping stale {} fetch result", R::PATH);
            return Ok(());
        }
        match result {
            Ok(items) => {
                log::info!("Fetched {} {}", items.len(), R::PATH);
                self.items = items;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn settle_create(
        &mut self,
        scope: &CancelScope,
        result: Result<R, ApiError>,
    ) -> Result<(), ApiError> {
        self.loading = false;
        if scope.is_cancelled() {
            log::debug!("Dropping stale {} create result", R::PATH);
            return Ok(());
        }
        match result {
            Ok(created) => {
                self.items.push(created);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn settle_update(
        &mut self,
        scope: &CancelScope,
        result: Result<R, ApiError>,
    ) -> Result<(), ApiError> {
        self.loading = false;
        if scope.is_cancelled() {
            log::debug!("Dropping stale {} update result", R::PATH);
            return Ok(());
        }
        match result {
            Ok(updated) => {
                match updated.id() {
                    Some(id) => match self.items.iter_mut().find(|i| i.id() == Some(id)) {
                        Some(slot) => *slot = updated,
                        // The entry left the list while the call was in
                        // flight. Keep the list as-is, but loudly.
                        None => log::warn!("Update for unknown {} id {} ignored", R::PATH, id),
                    },
                    None => log::warn!("Server returned a {} update without an id", R::PATH),
                }
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn settle_delete(
        &mut self,
        scope: &CancelScope,
        result: Result<(), ApiError>,
        id: u64,
    ) -> Result<(), ApiError> {
        self.loading = false;
        if scope.is_cancelled() {
            log::debug!("Dropping stale {} delete result", R::PATH);
            return Ok(());
        }
        match result {
            Ok(()) => {
                self.items.retain(|item| item.id() != Some(id));
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, e: ApiError) -> Result<(), ApiError> {
        log::warn!("{} request failed: {}", R::PATH, e);
        self.error = Some(e.to_string());
        Err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: Option<u64>,
        title: String,
    }

    impl Resource for Item {
        const PATH: &'static str = "items";
        fn id(&self) -> Option<u64> {
            self.id
        }
    }

    fn item(id: u64, title: &str) -> Item {
        Item {
            id: Some(id),
            title: title.to_string(),
        }
    }

    fn network_error() -> ApiError {
        ApiError::Decode("connection reset".to_string())
    }

    #[test]
    fn fetch_replaces_the_list_in_server_order() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        store.begin();
        store
            .settle_fetch(&CancelScope::new(), Ok(vec![item(3, "C"), item(1, "A")]))
            .unwrap();

        let titles: Vec<&str> = store.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A"]);
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
    }

    #[test]
    fn create_appends_the_server_copy() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        store.begin();
        store
            .settle_fetch(&CancelScope::new(), Ok(vec![item(1, "A")]))
            .unwrap();

        store.begin();
        store
            .settle_create(&CancelScope::new(), Ok(item(2, "B")))
            .unwrap();

        assert_eq!(store.items().len(), 2);
        assert_eq!(store.items()[0], item(1, "A"));
        assert_eq!(store.items()[1], item(2, "B"));
    }

    #[test]
    fn update_replaces_in_place_preserving_order() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        store.begin();
        store
            .settle_fetch(&CancelScope::new(), Ok(vec![item(1, "A"), item(2, "B")]))
            .unwrap();

        store.begin();
        store
            .settle_update(&CancelScope::new(), Ok(item(2, "X")))
            .unwrap();

        assert_eq!(store.items()[0], item(1, "A"));
        assert_eq!(store.items()[1], item(2, "X"));
        assert_eq!(store.items().len(), 2);
    }

    #[test]
    fn update_with_no_match_leaves_the_list_unchanged() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        store.begin();
        store
            .settle_fetch(&CancelScope::new(), Ok(vec![item(1, "A")]))
            .unwrap();

        store.begin();
        store
            .settle_update(&CancelScope::new(), Ok(item(9, "ghost")))
            .unwrap();

        assert_eq!(store.items(), &[item(1, "A")]);
        assert_eq!(store.error(), None);
    }

    #[test]
    fn delete_removes_only_the_matching_entry() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        store.begin();
        store
            .settle_fetch(&CancelScope::new(), Ok(vec![item(1, "A"), item(2, "B")]))
            .unwrap();

        store.begin();
        store
            .settle_delete(&CancelScope::new(), Ok(()), 1)
            .unwrap();

        assert_eq!(store.items(), &[item(2, "B")]);
    }

    #[test]
    fn loading_is_true_strictly_between_begin_and_settle() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        assert!(!store.is_loading());

        store.begin();
        assert!(store.is_loading());

        store
            .settle_fetch(&CancelScope::new(), Ok(Vec::new()))
            .unwrap();
        assert!(!store.is_loading());

        store.begin();
        assert!(store.is_loading());
        let _ = store.settle_fetch(&CancelScope::new(), Err(network_error()));
        assert!(!store.is_loading());
    }

    #[test]
    fn failure_stores_a_message_and_begin_clears_it() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        store.begin();
        let err = store.settle_fetch(&CancelScope::new(), Err(network_error()));
        assert!(err.is_err());
        assert!(store.error().unwrap().contains("connection reset"));

        store.begin();
        assert_eq!(store.error(), None);
    }

    #[test]
    fn clear_error_dismisses_without_a_new_call() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        store.begin();
        let _ = store.settle_create(&CancelScope::new(), Err(network_error()));
        assert!(store.error().is_some());

        store.clear_error();
        assert_eq!(store.error(), None);
    }

    #[test]
    fn cancelled_scope_drops_the_result() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        store.begin();
        store
            .settle_fetch(&CancelScope::new(), Ok(vec![item(1, "A")]))
            .unwrap();

        // The view unmounts while a refresh is in flight.
        let scope = CancelScope::new();
        store.begin();
        scope.cancel();
        store
            .settle_fetch(&scope, Ok(vec![item(9, "stale")]))
            .unwrap();

        assert_eq!(store.items(), &[item(1, "A")]);
        assert!(!store.is_loading());
    }

    #[test]
    fn cancelled_scope_swallows_late_errors_too() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        let scope = CancelScope::new();
        store.begin();
        scope.cancel();
        store.settle_delete(&scope, Err(network_error()), 1).unwrap();
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn failed_fetch_surfaces_through_the_async_path() {
        // Nothing listens on the discard port; the connection is refused.
        let api = ApiClient::new(
            "http://127.0.0.1:9",
            std::time::Duration::from_secs(2),
        )
        .unwrap();
        let mut store: ResourceStore<Item> = ResourceStore::new();

        let result = store.fetch_all(&api, &CancelScope::new()).await;
        assert!(result.is_err());
        assert!(!store.is_loading());
        assert!(store.error().is_some());
        assert!(store.items().is_empty());
    }

    #[test]
    fn find_looks_up_by_server_id() {
        let mut store: ResourceStore<Item> = ResourceStore::new();
        store.begin();
        store
            .settle_fetch(&CancelScope::new(), Ok(vec![item(1, "A"), item(2, "B")]))
            .unwrap();

        assert_eq!(store.find(2).map(|i| i.title.as_str()), Some("B"));
        assert!(store.find(9).is_none());
    }
}
