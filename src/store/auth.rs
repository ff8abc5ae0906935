// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication and profile container.

use tokio::sync::watch;

use super::{Effect, Route};
use crate::error::Result;
use crate::models::{Credential, Jwt, LoginUser, PostProfile, Profile, User};
use crate::services::ApiClient;

/// Authentication slice of the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    /// Whether the sign-in form is in login (vs. register) mode
    pub is_login_view: bool,
    /// The authenticated identity; `LoginUser::default()` when unknown
    pub login_user: LoginUser,
    pub profiles: Vec<Profile>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            is_login_view: true,
            login_user: LoginUser::default(),
            profiles: Vec::new(),
        }
    }
}

/// Settled results of auth operations, plus local actions.
#[derive(Debug, Clone)]
pub enum AuthAction {
    ToggleMode,
    LoginFulfilled(Jwt),
    LoginUserFetched(LoginUser),
    ProfilesFetched(Vec<Profile>),
    ProfileUpdated(Profile),
    LoggedOut,
}

impl AuthState {
    /// Apply `action` and return the effects the shell must carry out.
    pub fn reduce(&mut self, action: AuthAction) -> Vec<Effect> {
        match action {
            AuthAction::ToggleMode => {
                self.is_login_view = !self.is_login_view;
                Vec::new()
            }
            AuthAction::LoginFulfilled(jwt) => {
                let mut effects = Vec::with_capacity(2);
                let has_token = !jwt.access.is_empty();
                effects.push(Effect::PersistToken(jwt.access));
                if has_token {
                    effects.push(Effect::Navigate(Route::Tasks));
                }
                effects
            }
            AuthAction::LoginUserFetched(user) => {
                self.login_user = user;
                Vec::new()
            }
            AuthAction::ProfilesFetched(profiles) => {
                self.profiles = profiles;
                Vec::new()
            }
            AuthAction::ProfileUpdated(profile) => {
                if let Some(slot) = self.profiles.iter_mut().find(|p| p.id == profile.id) {
                    *slot = profile;
                }
                Vec::new()
            }
            AuthAction::LoggedOut => {
                *self = AuthState::default();
                vec![Effect::ClearToken, Effect::Navigate(Route::Root)]
            }
        }
    }

    /// Profile owned by `user_id`, if loaded.
    pub fn profile_of(&self, user_id: u64) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.owner_user_id == user_id)
    }
}

/// Observable auth container backed by the REST API.
///
/// Operations take `&self`: concurrent calls are not serialized and the
/// response that resolves last wins.
pub struct AuthStore {
    api: ApiClient,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    pub fn new(api: ApiClient) -> Self {
        Self::with_state(api, AuthState::default())
    }

    pub fn with_state(api: ApiClient, initial: AuthState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { api, state }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every commit.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_login_view(&self) -> bool {
        self.state.borrow().is_login_view
    }

    pub fn login_user(&self) -> LoginUser {
        self.state.borrow().login_user.clone()
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.state.borrow().profiles.clone()
    }

    /// Commit `action` and return its effects.
    pub fn dispatch(&self, action: AuthAction) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.state.send_modify(|state| effects = state.reduce(action));
        effects
    }

    pub fn toggle_mode(&self) {
        self.dispatch(AuthAction::ToggleMode);
    }

    /// Obtain a token pair. The returned effects persist the access token and,
    /// when it is non-empty, navigate to the task page.
    pub async fn login(&self, credential: &Credential) -> Result<Vec<Effect>> {
        let jwt = self.api.create_token(credential).await?;
        tracing::info!(username = %credential.username, "Login succeeded");
        Ok(self.dispatch(AuthAction::LoginFulfilled(jwt)))
    }

    /// Register an account. State is not touched.
    pub async fn register(&self, credential: &Credential) -> Result<User> {
        let user = self.api.create_user(credential).await?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub async fn fetch_own_profile(&self, token: &str) -> Result<()> {
        let user = self.api.get_login_user(token).await?;
        self.dispatch(AuthAction::LoginUserFetched(user));
        Ok(())
    }

    /// Create an empty profile. State is not touched.
    pub async fn create_profile(&self, token: &str) -> Result<Profile> {
        self.api.create_profile(token).await
    }

    pub async fn list_profiles(&self, token: &str) -> Result<()> {
        let profiles = self.api.list_profiles(token).await?;
        self.dispatch(AuthAction::ProfilesFetched(profiles));
        Ok(())
    }

    pub async fn update_profile(&self, token: &str, profile: PostProfile) -> Result<()> {
        let updated = self.api.update_profile(token, profile).await?;
        self.dispatch(AuthAction::ProfileUpdated(updated));
        Ok(())
    }

    /// Forget the session and return to the login page.
    pub fn logout(&self) -> Vec<Effect> {
        tracing::info!("Logging out");
        self.dispatch(AuthAction::LoggedOut)
    }
}
