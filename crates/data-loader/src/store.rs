//! In-memory user registry and rating store.
//!
//! All mutations go through a single `RwLock`, so concurrent votes for the
//! same user are serialized and can't overwrite each other. Readers get
//! cloned snapshots and never hold the lock across calls.

use crate::error::{DataLoadError, Result, StoreError};
use crate::parser;
use crate::traits::RatingStore;
use crate::types::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, instrument, warn};

/// Users in registration order plus a username index
#[derive(Debug, Default)]
struct UserTable {
    records: Vec<UserRecord>,
    by_name: HashMap<String, usize>,
}

impl UserTable {
    fn get(&self, username: &str) -> Option<&UserRecord> {
        self.by_name.get(username).map(|&i| &self.records[i])
    }

    fn get_mut(&mut self, username: &str) -> Option<&mut UserRecord> {
        match self.by_name.get(username) {
            Some(&i) => self.records.get_mut(i),
            None => None,
        }
    }

    fn push(&mut self, user: UserRecord) {
        self.by_name.insert(user.username.clone(), self.records.len());
        self.records.push(user);
    }

    fn next_id(&self) -> UserId {
        self.records.iter().map(|u| u.id).max().map_or(1, |max| max + 1)
    }
}

/// Thread-safe user registry implementing [`RatingStore`]
#[derive(Debug, Default)]
pub struct UserStore {
    table: RwLock<UserTable>,
}

impl UserStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records.
    ///
    /// Duplicate usernames or ids are rejected. Repeated votes for one title
    /// collapse into a single entry holding the last value.
    pub fn from_records(records: Vec<UserRecord>) -> Result<Self> {
        let mut table = UserTable::default();
        let mut ids = HashSet::new();
        for mut user in records {
            if table.by_name.contains_key(&user.username) {
                return Err(DataLoadError::ValidationError(format!(
                    "duplicate username: {}",
                    user.username
                )));
            }
            if !ids.insert(user.id) {
                return Err(DataLoadError::ValidationError(format!(
                    "duplicate user id: {}",
                    user.id
                )));
            }

            let votes = std::mem::take(&mut user.ratings);
            let loaded = votes.len();
            for vote in votes {
                user.upsert_rating(&vote.title, vote.rating);
            }
            if user.ratings.len() < loaded {
                warn!(
                    "User {} had {} repeated ratings, keeping the last vote per title",
                    user.username,
                    loaded - user.ratings.len()
                );
            }
            table.push(user);
        }
        Ok(Self {
            table: RwLock::new(table),
        })
    }

    /// Load a users snapshot. A missing file yields an empty store.
    #[instrument]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        match parser::parse_users(path) {
            Ok(records) => {
                let store = Self::from_records(records)?;
                info!("Loaded {} users", store.len());
                Ok(store)
            }
            Err(DataLoadError::FileNotFound { path }) => {
                warn!("Users file {} not found, starting with an empty store", path);
                Ok(Self::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Persist the current snapshot
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let users = self
            .users()
            .map_err(|e| DataLoadError::ValidationError(e.to_string()))?;
        parser::save_users(path, &users)?;
        debug!("Saved {} users to {}", users.len(), path.display());
        Ok(())
    }

    fn read(&self) -> std::result::Result<RwLockReadGuard<'_, UserTable>, StoreError> {
        self.table.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> std::result::Result<RwLockWriteGuard<'_, UserTable>, StoreError> {
        self.table.write().map_err(|_| StoreError::Poisoned)
    }

    /// Register a new user with no ratings and return its id
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> std::result::Result<UserId, StoreError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "username and password must not be empty".to_string(),
            ));
        }

        let mut table = self.write()?;
        if table.by_name.contains_key(username) {
            return Err(StoreError::AlreadyExists(username.to_string()));
        }

        let id = table.next_id();
        table.push(UserRecord::new(id, username, password));
        info!("Registered user {} with id {}", username, id);
        Ok(id)
    }

    /// Plain credential check against the stored password
    pub fn authenticate(&self, username: &str, password: &str) -> std::result::Result<(), StoreError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "username and password must not be empty".to_string(),
            ));
        }

        let table = self.read()?;
        let user = table
            .get(username)
            .ok_or_else(|| StoreError::user_not_found(username))?;
        if user.password != password {
            return Err(StoreError::InvalidCredentials(username.to_string()));
        }
        Ok(())
    }

    pub fn user_by_id(&self, id: UserId) -> std::result::Result<Option<UserRecord>, StoreError> {
        Ok(self.read()?.records.iter().find(|u| u.id == id).cloned())
    }

    /// Snapshot of every user in registration order
    pub fn users(&self) -> std::result::Result<Vec<UserRecord>, StoreError> {
        Ok(self.read()?.records.clone())
    }

    pub fn len(&self) -> usize {
        match self.read() {
            Ok(table) => table.records.len(),
            Err(e) => {
                warn!("Counting users failed: {}", e);
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RatingStore for UserStore {
    fn register(&self, username: &str, password: &str) -> std::result::Result<UserId, StoreError> {
        UserStore::register(self, username, password)
    }

    fn authenticate(&self, username: &str, password: &str) -> std::result::Result<(), StoreError> {
        UserStore::authenticate(self, username, password)
    }

    fn record_rating(
        &self,
        username: &str,
        title: &str,
        rating: StarRating,
    ) -> std::result::Result<(), StoreError> {
        if title.trim().is_empty() {
            return Err(StoreError::InvalidInput("title must not be empty".to_string()));
        }

        let mut table = self.write()?;
        let user = table
            .get_mut(username)
            .ok_or_else(|| StoreError::user_not_found(username))?;
        user.upsert_rating(title, rating);
        debug!("User {} rated {} with {}", username, title, rating);
        Ok(())
    }

    fn get_ratings(&self, username: &str) -> Vec<UserRating> {
        match self.read() {
            Ok(table) => table
                .get(username)
                .map(|u| u.ratings.clone())
                .unwrap_or_default(),
            Err(e) => {
                warn!("Reading ratings of {} failed: {}", username, e);
                Vec::new()
            }
        }
    }

    fn contains_user(&self, username: &str) -> std::result::Result<bool, StoreError> {
        Ok(self.read()?.by_name.contains_key(username))
    }
}
