use crate::api::{self, ApiClient, ApiError, keyring};
use crate::config::AppConfig;
use crate::core::event::CalendarEvent;
use crate::core::gift::Gift;
use crate::core::journal::JournalEntry;
use crate::core::todo::Todo;
use crate::core::trip::Trip;

use super::ResourceStore;
use super::session::Session;

/// The root state tree: one store per resource plus the session, composed
/// around a single API client. Constructed explicitly at application start
/// and handed to whatever drives the views; there is no process-wide
/// instance. Dropping it is the teardown.
pub struct AppState {
    pub api: ApiClient,
    pub session: Session,
    pub todos: ResourceStore<Todo>,
    pub gifts: ResourceStore<Gift>,
    pub journal: ResourceStore<JournalEntry>,
    pub events: ResourceStore<CalendarEvent>,
    pub trips: ResourceStore<Trip>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Ok(Self {
            api: ApiClient::from_config(config)?,
            session: Session::default(),
            todos: ResourceStore::new(),
            gifts: ResourceStore::new(),
            journal: ResourceStore::new(),
            events: ResourceStore::new(),
            trips: ResourceStore::new(),
        })
    }

    /// Pick up a persisted token at startup. Returns whether a session was
    /// restored; a missing or unreadable keyring just leaves the gate shut.
    pub async fn restore_session(&mut self) -> bool {
        match keyring::load_token().await {
            Ok(Some(token)) => {
                self.api.set_token(&token);
                self.session.apply_login(token);
                log::info!("Restored persisted session");
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("Could not restore session: {}", e);
                false
            }
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        self.session.begin();
        match api::auth::login(&self.api, username, password).await {
            Ok(token) => self.open_session(token).await,
            Err(e) => {
                self.session.fail(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        self.session.begin();
        match api::auth::register(&self.api, username, email, password).await {
            Ok(token) => self.open_session(token).await,
            Err(e) => {
                self.session.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Clear the session, the client's token, and the persisted copy. Fetched
    /// lists are dropped so the next login starts from the backend.
    pub async fn logout(&mut self) {
        if let Err(e) = keyring::delete_token().await {
            log::warn!("Could not remove persisted token: {}", e);
        }
        self.api.clear_token();
        self.session.apply_logout();
        self.todos = ResourceStore::new();
        self.gifts = ResourceStore::new();
        self.journal = ResourceStore::new();
        self.events = ResourceStore::new();
        self.trips = ResourceStore::new();
        log::info!("Logged out");
    }

    async fn open_session(&mut self, token: String) -> Result<(), ApiError> {
        // A keyring failure costs persistence across restarts, not the login.
        if let Err(e) = keyring::store_token(&token).await {
            log::warn!("Could not persist token: {}", e);
        }
        self.api.set_token(&token);
        self.session.apply_login(token);
        log::info!("Session opened");
        Ok(())
    }
}
