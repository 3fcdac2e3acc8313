//! User accounts and login

use serde::Deserialize;
use store_object::{GenericStore, StoreError, StoreObject};
use tracing::{info, warn};

use crate::errors::ToyHausError;
use crate::models::{MiniUser, PublicUser, User};

/// Login request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Signup request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub fullname: String,
    pub username: String,
    pub password: String,
}

/// User collection with password handling kept out of responses
#[derive(Debug)]
pub struct UserService {
    store: GenericStore<User>,
}

impl UserService {
    pub fn new(store: GenericStore<User>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &GenericStore<User> {
        &self.store
    }

    pub async fn query(&self) -> Vec<PublicUser> {
        self.store
            .snapshot()
            .await
            .iter()
            .map(User::to_public)
            .collect()
    }

    pub async fn get_by_id(&self, user_id: &str) -> Result<PublicUser, ToyHausError> {
        Ok(self.store.get_by_id(user_id).await?.to_public())
    }

    pub async fn remove(&self, user_id: &str) -> Result<PublicUser, ToyHausError> {
        Ok(self.store.remove(user_id).await?.to_public())
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<MiniUser, ToyHausError> {
        let users = self.store.snapshot().await;
        let user = users.iter().find(|user| {
            user.username == credentials.username && user.password == credentials.password
        });

        match user {
            Some(user) => {
                info!("User {} logged in", user.id);
                Ok(user.to_mini())
            }
            None => {
                warn!("Failed login for username '{}'", credentials.username);
                Err(ToyHausError::InvalidCredentials(
                    "Invalid username or password".to_string(),
                ))
            }
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<MiniUser, ToyHausError> {
        if request.fullname.is_empty() || request.username.is_empty() || request.password.is_empty()
        {
            return Err(ToyHausError::invalid_input("Incomplete credentials"));
        }

        let username = request.username.clone();
        let user = self
            .store
            .create_checked(
                User {
                    id: String::new(),
                    fullname: request.fullname,
                    username: request.username,
                    password: request.password,
                    is_admin: false,
                    created_at: 0,
                    updated_at: 0,
                },
                move |users| {
                    if users.iter().any(|user| user.username == username) {
                        Err(StoreError::InvalidInput(format!(
                            "Username '{}' is taken",
                            username
                        )))
                    } else {
                        Ok(())
                    }
                },
            )
            .await?;
        Ok(user.to_mini())
    }
}
