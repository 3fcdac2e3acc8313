//! Core ToyHaus functionality
//!
//! This module contains the main ToyHaus struct, which owns the collection
//! stores and the services built on them and coordinates operations that
//! span more than one collection.

use config::AppConfig;
use store_object::{GenericStore, QueryResult, StoreObject};
use tokio::sync::Mutex;
use tracing::info;
use type_mapping::{merge, ParamMap};

use crate::auth::TokenCipher;
use crate::catalog::CatalogRecord;
use crate::errors::ToyHausError;
use crate::models::{Item, MiniUser, PublicUser, Toy, User};
use crate::users::UserService;

/// Main ToyHaus coordinator holding every collection of the catalog
#[derive(Debug)]
pub struct ToyHaus {
    config: AppConfig,
    items: GenericStore<Item>,
    toys: GenericStore<Toy>,
    users: UserService,
    tokens: TokenCipher,
    /// Held while creating catalog records and while removing users
    creators_lock: Mutex<()>,
}

impl ToyHaus {
    /// Load every collection named by `config`.
    ///
    /// Any missing or malformed document fails the whole startup.
    pub async fn open(config: AppConfig) -> Result<Self, ToyHausError> {
        config.validate()?;
        let storage = &config.storage;

        let items = GenericStore::load(storage.item_path()).await?;
        let toys = GenericStore::load(storage.toy_path()).await?;
        let users = UserService::new(GenericStore::load(storage.user_path()).await?);
        let tokens = TokenCipher::new(&config.auth.secret);

        info!("ToyHaus opened with data from {}", storage.data_dir);
        Ok(Self {
            config,
            items,
            toys,
            users,
            tokens,
            creators_lock: Mutex::new(()),
        })
    }

    /// Assemble from stores already loaded
    pub fn from_parts(
        config: AppConfig,
        items: GenericStore<Item>,
        toys: GenericStore<Toy>,
        users: GenericStore<User>,
    ) -> Self {
        let tokens = TokenCipher::new(&config.auth.secret);
        Self {
            config,
            items,
            toys,
            users: UserService::new(users),
            tokens,
            creators_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn page_size(&self) -> usize {
        self.config.query.page_size
    }

    pub fn items(&self) -> &GenericStore<Item> {
        &self.items
    }

    pub fn toys(&self) -> &GenericStore<Toy> {
        &self.toys
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn tokens(&self) -> &TokenCipher {
        &self.tokens
    }

    /// Merge `overrides` into the collection defaults and run the listing
    pub async fn query<T: CatalogRecord>(&self, overrides: &ParamMap) -> QueryResult<T> {
        let params = merge(&T::default_params(), overrides);
        crate::trace_log!("Listing {} with {:?}", T::collection_name(), params);
        T::store(self).query(&params, self.page_size()).await
    }

    pub async fn page_count<T: CatalogRecord>(&self) -> usize {
        T::store(self).page_count(self.page_size()).await
    }

    /// Resolve a login token to the user it was issued for
    pub fn logged_in_user(&self, token: Option<&str>) -> Option<MiniUser> {
        token.and_then(|token| self.tokens.validate_token(token))
    }

    /// Store a new catalog record.
    ///
    /// A record naming a creator is refused once that user has been removed.
    pub async fn create<T: CatalogRecord>(&self, record: T) -> Result<T, ToyHausError> {
        let _guard = self.creators_lock.lock().await;
        if let Some(creator_id) = record.creator_id() {
            if !self.users.store().exists(creator_id).await {
                return Err(ToyHausError::Forbidden(format!(
                    "Creator '{}' no longer exists",
                    creator_id
                )));
            }
        }
        Ok(T::store(self).create(record).await?)
    }

    /// Remove a user that created no catalog records
    pub async fn remove_user(&self, user_id: &str) -> Result<PublicUser, ToyHausError> {
        let _guard = self.creators_lock.lock().await;
        if self.items.has_records_by_creator(user_id).await
            || self.toys.has_records_by_creator(user_id).await
        {
            return Err(ToyHausError::Forbidden(
                "Cannot delete user with items".to_string(),
            ));
        }
        self.users.remove(user_id).await
    }
}
