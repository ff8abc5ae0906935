// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application shell composing both containers.
//!
//! The session owns the token storage. It reads the access token once per
//! operation, hands it to the container explicitly, and carries out the
//! effects the container returns: token writes go to storage, navigation
//! intents are published on a watch channel for the UI to follow.

use tokio::sync::watch;

use crate::error::{ApiError, Result};
use crate::models::{Credential, PostProfile, PostTask, Profile, ReadTask, User};
use crate::services::ApiClient;
use crate::storage::{StorageError, TokenStorage};
use crate::store::{AuthStore, Effect, Route, TaskOp, TaskStore};

/// Composed client state: auth + task containers over one token store.
pub struct Session<S: TokenStorage> {
    auth: AuthStore,
    tasks: TaskStore,
    storage: S,
    navigation: watch::Sender<Option<Route>>,
}

impl<S: TokenStorage> Session<S> {
    pub fn new(api: ApiClient, storage: S) -> Self {
        Self::with_stores(
            AuthStore::new(api.clone()),
            TaskStore::new(api),
            storage,
        )
    }

    /// Build a session around pre-populated containers.
    pub fn with_stores(auth: AuthStore, tasks: TaskStore, storage: S) -> Self {
        let (navigation, _) = watch::channel(None);
        Self {
            auth,
            tasks,
            storage,
            navigation,
        }
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Receiver for navigation intents.
    pub fn navigation(&self) -> watch::Receiver<Option<Route>> {
        self.navigation.subscribe()
    }

    /// Most recent navigation intent, if any.
    pub fn current_route(&self) -> Option<Route> {
        *self.navigation.borrow()
    }

    /// Stored access token, if any.
    pub fn token(&self) -> std::result::Result<Option<String>, StorageError> {
        self.storage.load()
    }

    /// Stored token usable for an `Authorization` header. An empty value
    /// counts as absent.
    fn usable_token(&self) -> std::result::Result<Option<String>, StorageError> {
        Ok(self.token()?.filter(|t| !t.is_empty()))
    }

    fn require_token(&self) -> Result<String> {
        self.usable_token()?.ok_or(ApiError::NoToken)
    }

    /// Carry out effects returned by a container.
    pub fn apply(&self, effects: Vec<Effect>) -> std::result::Result<(), StorageError> {
        for effect in effects {
            match effect {
                Effect::PersistToken(token) => {
                    self.storage.save(&token)?;
                    tracing::info!("Access token stored");
                }
                Effect::ClearToken => {
                    self.storage.clear()?;
                    tracing::info!("Access token cleared");
                }
                Effect::Navigate(route) => {
                    tracing::info!(route = %route, "Navigating");
                    self.navigation.send_replace(Some(route));
                }
            }
        }
        Ok(())
    }

    // ─── Auth ────────────────────────────────────────────────────────────────

    pub fn toggle_mode(&self) {
        self.auth.toggle_mode();
    }

    pub async fn login(&self, credential: &Credential) -> Result<()> {
        let effects = self.auth.login(credential).await?;
        self.apply(effects)?;
        Ok(())
    }

    pub async fn register(&self, credential: &Credential) -> Result<User> {
        self.auth.register(credential).await
    }

    /// Submit the sign-in form in its current mode.
    ///
    /// In register mode the new account is logged in right away and given an
    /// empty profile.
    pub async fn sign_in(&self, credential: &Credential) -> Result<()> {
        if self.auth.is_login_view() {
            return self.login(credential).await;
        }

        self.register(credential).await?;
        self.login(credential).await?;
        self.create_profile().await?;
        Ok(())
    }

    pub async fn fetch_own_profile(&self) -> Result<()> {
        let token = self.require_token()?;
        self.auth.fetch_own_profile(&token).await
    }

    pub async fn create_profile(&self) -> Result<Profile> {
        let token = self.require_token()?;
        self.auth.create_profile(&token).await
    }

    pub async fn list_profiles(&self) -> Result<()> {
        let token = self.require_token()?;
        self.auth.list_profiles(&token).await
    }

    pub async fn update_profile(&self, profile: PostProfile) -> Result<()> {
        let token = self.require_token()?;
        self.auth.update_profile(&token, profile).await
    }

    pub fn logout(&self) -> Result<()> {
        let effects = self.auth.logout();
        self.apply(effects)?;
        Ok(())
    }

    /// Initial load of an authenticated page.
    ///
    /// Without a stored token the client is sent to the login page. Otherwise
    /// identity, profiles, tasks, users and categories load concurrently.
    /// Task-side failures follow the container's bounce policy; the first
    /// auth-side failure is returned after all loads settle.
    pub async fn bootstrap(&self) -> Result<()> {
        let Some(token) = self.usable_token()? else {
            tracing::info!("No stored token, redirecting to login");
            self.apply(vec![Effect::Navigate(Route::Root)])?;
            return Ok(());
        };

        let (me, profiles, tasks, users, categories) = tokio::join!(
            self.auth.fetch_own_profile(&token),
            self.auth.list_profiles(&token),
            self.tasks.list_tasks(&token),
            self.tasks.list_users(&token),
            self.tasks.list_categories(&token),
        );

        self.apply(tasks)?;
        self.apply(users)?;
        self.apply(categories)?;
        me?;
        profiles?;
        Ok(())
    }

    // ─── Tasks ───────────────────────────────────────────────────────────────

    pub fn set_edit_draft(&self, draft: PostTask) {
        self.tasks.set_edit_draft(draft);
    }

    pub fn set_selected_task(&self, task: ReadTask) {
        self.tasks.set_selected_task(task);
    }

    pub async fn list_tasks(&self) -> Result<()> {
        let effects = match self.usable_token()? {
            Some(token) => self.tasks.list_tasks(&token).await,
            None => self.tasks.reject(TaskOp::ListTasks, ApiError::NoToken),
        };
        Ok(self.apply(effects)?)
    }

    pub async fn list_users(&self) -> Result<()> {
        let effects = match self.usable_token()? {
            Some(token) => self.tasks.list_users(&token).await,
            None => self.tasks.reject(TaskOp::ListUsers, ApiError::NoToken),
        };
        Ok(self.apply(effects)?)
    }

    pub async fn list_categories(&self) -> Result<()> {
        let effects = match self.usable_token()? {
            Some(token) => self.tasks.list_categories(&token).await,
            None => self.tasks.reject(TaskOp::ListCategories, ApiError::NoToken),
        };
        Ok(self.apply(effects)?)
    }

    pub async fn create_category(&self, name: &str) -> Result<()> {
        let effects = match self.usable_token()? {
            Some(token) => self.tasks.create_category(&token, name).await,
            None => self.tasks.reject(TaskOp::CreateCategory, ApiError::NoToken),
        };
        Ok(self.apply(effects)?)
    }

    pub async fn create_task(&self, draft: &PostTask) -> Result<()> {
        let effects = match self.usable_token()? {
            Some(token) => self.tasks.create_task(&token, draft).await,
            None => self.tasks.reject(TaskOp::CreateTask, ApiError::NoToken),
        };
        Ok(self.apply(effects)?)
    }

    pub async fn update_task(&self, draft: &PostTask) -> Result<()> {
        let effects = match self.usable_token()? {
            Some(token) => self.tasks.update_task(&token, draft).await,
            None => self.tasks.reject(TaskOp::UpdateTask, ApiError::NoToken),
        };
        Ok(self.apply(effects)?)
    }

    pub async fn delete_task(&self, id: u64) -> Result<()> {
        let effects = match self.usable_token()? {
            Some(token) => self.tasks.delete_task(&token, id).await,
            None => self.tasks.reject(TaskOp::DeleteTask, ApiError::NoToken),
        };
        Ok(self.apply(effects)?)
    }

    /// Save the current edit draft: create when unsaved, update otherwise.
    pub async fn save_edit_draft(&self) -> Result<()> {
        let draft = self.tasks.edited_task();
        if draft.is_new() {
            self.create_task(&draft).await
        } else {
            self.update_task(&draft).await
        }
    }
}
