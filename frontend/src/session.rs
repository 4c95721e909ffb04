use crate::models::{AdminProfile, Session};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use web_sys::window;
use yew::prelude::*;

pub const TOKEN_KEY: &str = "token";
pub const ADMIN_KEY: &str = "admin";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("Browser storage is unavailable")]
    Unavailable,
    #[error("Failed to store {0}")]
    Write(&'static str),
    #[error("Failed to encode admin profile: {0}")]
    Encode(String),
}

/// Key/value storage the session is persisted in.
pub trait SessionBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &'static str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// `window.localStorage`; survives reloads and is shared by every tab.
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    fn storage() -> Option<web_sys::Storage> {
        window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

impl SessionBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&self, key: &'static str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(key).is_err() {
                log::warn!("Failed to remove '{}' from storage", key);
            }
        }
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
}

impl SessionBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &'static str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn SessionBackend>,
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.backend, &other.backend)
    }
}

impl SessionStore {
    pub fn new(backend: Rc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    pub fn local() -> Self {
        Self::new(Rc::new(LocalStorageBackend))
    }

    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let admin = session
            .admin
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StorageError::Encode(e.to_string()))?;

        self.backend.set(TOKEN_KEY, &session.token)?;
        match admin {
            Some(admin) => self.backend.set(ADMIN_KEY, &admin)?,
            None => self.backend.remove(ADMIN_KEY),
        }
        Ok(())
    }

    pub fn read(&self) -> Option<Session> {
        let token = self.backend.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let admin = self.backend.get(ADMIN_KEY).and_then(|raw| {
            serde_json::from_str::<AdminProfile>(&raw)
                .map_err(|e| log::warn!("Ignoring unreadable admin profile: {}", e))
                .ok()
        });
        Some(Session { token, admin })
    }

    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(ADMIN_KEY);
    }
}

/// Session handed to every component through a Yew context.
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub session: Option<Session>,
    store: SessionStore,
    on_change: Callback<Option<Session>>,
}

impl SessionContext {
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn admin(&self) -> Option<&AdminProfile> {
        self.session.as_ref().and_then(|s| s.admin.as_ref())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn login(&self, session: Session) -> Result<(), StorageError> {
        self.store.save(&session)?;
        self.on_change.emit(Some(session));
        Ok(())
    }

    pub fn logout(&self) {
        self.store.clear();
        self.on_change.emit(None);
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub store: SessionStore,
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = {
        let store = props.store.clone();
        use_state(move || store.read())
    };

    let on_change = {
        let session = session.clone();
        Callback::from(move |next: Option<Session>| session.set(next))
    };

    let context = SessionContext {
        session: (*session).clone(),
        store: props.store.clone(),
        on_change,
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            { for props.children.iter() }
        </ContextProvider<SessionContext>>
    }
}

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider must wrap the application")
}
