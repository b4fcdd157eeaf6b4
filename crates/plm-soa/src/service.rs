//! Service facade
//!
//! Public entry point for integrations. Holds the transport, the session
//! store and the search defaults; each method builds one command and runs
//! it. Whether a session is active is read from the store on every call.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::{collections::BTreeMap, sync::Arc};

use plm_soa_core::{
    operations::{
        item_types::{item_types, TypeQuery},
        items::{create_item, get_item, update_item, CreateItemParams, GetItemParams, UpdateItemParams},
        search::{search, SearchParams},
        session_ops, Command,
    },
    session::{login, logout},
    ClientConfig, CommandResult, Credentials, DomainObject, InMemorySessionStore, SearchConfig,
    Session, SessionInfo, SessionStore, SoaTransport, TypeDescription, UpdatedItem,
};
use serde_json::Value;

use crate::http::HttpTransport;

pub struct PlmService {
    transport: Option<Arc<dyn SoaTransport>>,
    store: Arc<dyn SessionStore>,
    search: SearchConfig,
}

impl PlmService {
    /// Compose a facade. A session already in `store` is handed to the
    /// transport so it is attached to the first call.
    pub fn new(
        transport: Option<Arc<dyn SoaTransport>>,
        store: Arc<dyn SessionStore>,
        search: SearchConfig,
    ) -> Self {
        if let (Some(transport), Some(session)) = (&transport, store.current()) {
            tracing::debug!("Resuming stored session");
            transport.set_session_id(Some(session.session_id));
        }
        Self {
            transport,
            store,
            search,
        }
    }

    /// HTTP transport plus an in-memory store, configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be initialized.
    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        let transport: Arc<dyn SoaTransport> = Arc::new(HttpTransport::new(config)?);
        Ok(Self::new(
            Some(transport),
            Arc::new(InMemorySessionStore::new()),
            config.search.clone(),
        ))
    }

    fn port(&self) -> Option<&dyn SoaTransport> {
        self.transport.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.current().is_some()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.store.current()
    }

    /// Search parameters for `query` with the configured defaults.
    pub fn search_params(&self, query: impl Into<String>) -> SearchParams {
        SearchParams::new(query, &self.search)
    }

    pub async fn login(&self, credentials: Credentials) -> CommandResult<Session> {
        login(self.port(), self.store.as_ref(), credentials).await
    }

    pub async fn logout(&self) -> CommandResult<()> {
        logout(self.port(), self.store.as_ref(), self.is_logged_in()).await
    }

    pub async fn search(&self, params: SearchParams) -> CommandResult<Vec<DomainObject>> {
        Command::new(search(params.convention), self.port(), self.is_logged_in(), params)
            .execute()
            .await
    }

    pub async fn get_item(&self, params: GetItemParams) -> CommandResult<DomainObject> {
        Command::new(get_item(), self.port(), self.is_logged_in(), params)
            .execute()
            .await
    }

    pub async fn create_item(&self, params: CreateItemParams) -> CommandResult<DomainObject> {
        Command::new(create_item(), self.port(), self.is_logged_in(), params)
            .execute()
            .await
    }

    pub async fn update_item(
        &self,
        id: impl Into<String>,
        properties: BTreeMap<String, Value>,
    ) -> CommandResult<UpdatedItem> {
        let params = UpdateItemParams::new(id, properties);
        Command::new(update_item(), self.port(), self.is_logged_in(), params)
            .execute()
            .await
    }

    pub async fn item_types(&self, query: TypeQuery) -> CommandResult<Vec<TypeDescription>> {
        Command::new(item_types(), self.port(), self.is_logged_in(), query)
            .execute()
            .await
    }

    pub async fn favorites(&self) -> CommandResult<Vec<DomainObject>> {
        Command::new(session_ops::favorites(), self.port(), self.is_logged_in(), ())
            .execute()
            .await
    }

    pub async fn session_info(&self) -> CommandResult<SessionInfo> {
        Command::new(session_ops::session_info(), self.port(), self.is_logged_in(), ())
            .execute()
            .await
    }
}
