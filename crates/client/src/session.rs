//! Authenticated session lifecycle
//!
//! [`SessionManager`] owns the in-memory [`Session`], writes every mutation
//! through to the durable [`SessionStore`], and routes authenticated requests
//! through a single refresh-and-retry loop: one 401 triggers at most one
//! token refresh and one retry, and a failed refresh tears the session down
//! to Anonymous.

use crate::config::ShopConfig;
use crate::error::ClientError;
use crate::http::{AuthenticatedShopClient, PublicShopClient};
use crate::types::{
    AuthTokensResponse, ChangePasswordRequest, LoginRequest, LogoutRequest, ProfileResponse,
    ProfileUpdate, RegisterRequest, RegisterResponse, ResendOtpRequest, TokenRefreshRequest,
    VerifyOtpRequest,
};
use optishop_core::storage::{SessionStore, StoredSession};
use optishop_core::validation::{self, ValidationError};
use optishop_core::{FaceShape, Profile, Session, User, UserRole};
use std::future::Future;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

pub struct SessionManager {
    public: PublicShopClient,
    store: Arc<dyn SessionStore>,
    session: RwLock<Session>,
}

impl SessionManager {
    /// Create a manager with the given configuration and durable store.
    pub fn new(config: ShopConfig, store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        config
            .validate()
            .map_err(|err| ClientError::Configuration(err.to_string()))?;
        let public = PublicShopClient::from_config(&config)?;
        Ok(Self {
            public,
            store,
            session: RwLock::new(Session::default()),
        })
    }

    /// Rehydrate session state from the durable store.
    ///
    /// Purely local: no network call is made. A snapshot missing either
    /// token is discarded (and the store cleared) rather than restored, so
    /// an authenticated session always holds both credentials. Returns
    /// whether the session is authenticated afterwards.
    pub async fn restore(&self) -> Result<bool, ClientError> {
        match self.store.load().await? {
            Some(stored) if stored.is_complete() => {
                debug!(email = %stored.user.email, "session restored from store");
                let mut session = self.session.write().expect("session lock poisoned");
                session.access_token = stored.access_token;
                session.refresh_token = stored.refresh_token;
                session.user = Some(stored.user);
                Ok(true)
            }
            Some(_) => {
                warn!("stored session is missing credentials, discarding");
                self.teardown().await;
                Ok(false)
            }
            None => {
                debug!("no stored session, starting anonymous");
                Ok(false)
            }
        }
    }

    /// Ask the server whether the restored access token is still accepted.
    ///
    /// Goes through the normal refresh path, so a stale access token with a
    /// live refresh token comes back `true`; an irrecoverable session has
    /// already been torn down and comes back `false`.
    pub async fn verify_session(&self) -> Result<bool, ClientError> {
        if !self.is_authenticated() {
            return Ok(false);
        }
        match self
            .with_retry(|client| async move { client.verify_token().await })
            .await
        {
            Ok(_) => Ok(true),
            Err(ClientError::SessionExpired) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the session is populated and persisted, then enriched
    /// with the extended profile. Enrichment failures are non-fatal unless
    /// they expire the session, which is reported as
    /// [`ClientError::SessionExpired`].
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        validation::validate_login(email, password)?;
        info!(email, "signing in");

        let tokens = self
            .public
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        let user = tokens.user.clone();
        self.install_tokens(tokens).await?;
        info!(email, "sign in successful");

        // Enrichment is best-effort, except SessionExpired: that means the
        // fresh tokens were rejected and the session is already torn down.
        match self.fetch_profile().await {
            Err(ClientError::SessionExpired) => return Err(ClientError::SessionExpired),
            Err(err) => warn!(error = %err, "profile fetch after sign-in failed"),
            Ok(_) => {}
        }
        Ok(self.current_user().unwrap_or(user))
    }

    /// Create an account and trigger OTP delivery.
    ///
    /// Validates locally first; the session stays anonymous until the code
    /// is verified.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
        role: UserRole,
    ) -> Result<RegisterResponse, ClientError> {
        validation::validate_registration(name, email, password, confirm_password)?;
        info!(email, "registering account");
        self.public
            .register(&RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                confirm_password: confirm_password.to_string(),
                role,
            })
            .await
    }

    /// Exchange the emailed one-time code for an authenticated session.
    ///
    /// A wrong or expired code surfaces as [`ClientError::InvalidOtp`].
    /// After authenticating, makes sure a profile record exists server-side;
    /// that step is best-effort.
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<User, ClientError> {
        let tokens = self
            .public
            .verify_otp(&VerifyOtpRequest {
                email: email.to_string(),
                otp: code.to_string(),
            })
            .await?;
        let user = tokens.user.clone();
        self.install_tokens(tokens).await?;
        info!(email, "email verified, session authenticated");

        if let Err(err) = self
            .with_retry(|client| async move { client.create_initial_profile().await })
            .await
        {
            warn!(error = %err, "initial profile creation failed");
        }
        Ok(user)
    }

    /// Re-trigger OTP delivery; no session state changes.
    pub async fn resend_otp(&self, email: &str) -> Result<(), ClientError> {
        validation::validate_email(email)?;
        self.public
            .resend_otp(&ResendOtpRequest {
                email: email.to_string(),
            })
            .await?;
        info!(email, "verification code resent");
        Ok(())
    }

    /// Sign out.
    ///
    /// Notifies the server (bounded by a short timeout) so the refresh token
    /// gets blacklisted, then unconditionally clears local state. Local
    /// cleanup happens even when the server call fails or times out.
    pub async fn logout(&self) {
        let refresh = self.snapshot().refresh_token;
        if !refresh.is_empty() {
            if let Err(err) = self.public.logout(&LogoutRequest { refresh }).await {
                warn!(error = %err, "server logout failed, clearing local session anyway");
            }
        }
        self.teardown().await;
        info!("signed out");
    }

    /// Fetch the extended profile and merge it into the current user.
    ///
    /// Fields the response does not carry keep their current values.
    pub async fn fetch_profile(&self) -> Result<User, ClientError> {
        let profile = self
            .with_retry(|client| async move { client.fetch_profile().await })
            .await?;
        self.merge_profile(&profile).await
    }

    /// Apply a partial profile update and merge the server's response back.
    ///
    /// An entirely empty update is rejected before any network call.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ClientError> {
        if update.is_empty() {
            return Err(ValidationError::EmptyUpdate.into());
        }
        let profile = self
            .with_retry(|client| async move { client.update_profile(update).await })
            .await?;
        info!("profile updated");
        self.merge_profile(&profile).await
    }

    /// Change the account password.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<(), ClientError> {
        validation::validate_password(new)?;
        self.with_retry(|client| async move {
            client
                .change_password(&ChangePasswordRequest {
                    current_password: current.to_string(),
                    new_password: new.to_string(),
                })
                .await
        })
        .await?;
        info!("password changed");
        Ok(())
    }

    /// Upload a face photo for shape detection (public endpoint).
    pub async fn detect_face_shape(
        &self,
        image: Vec<u8>,
        filename: impl Into<String>,
    ) -> Result<FaceShape, ClientError> {
        let response = self.public.detect_face_shape(image, filename).await?;
        Ok(response.face_shape)
    }

    pub fn current_user(&self) -> Option<User> {
        self.snapshot().user
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    /// Role check; always false while anonymous.
    pub fn has_role(&self, roles: &[UserRole]) -> bool {
        self.snapshot().has_role(roles)
    }

    /// Access the underlying public client.
    pub fn public(&self) -> &PublicShopClient {
        &self.public
    }

    /// Run an authenticated exchange with the refresh-and-retry policy.
    ///
    /// The explicit `retried` flag caps the policy at one refresh and one
    /// retry per request; a second 401 is returned to the caller as-is.
    async fn with_retry<T, F, Fut>(&self, op: F) -> Result<T, ClientError>
    where
        F: Fn(AuthenticatedShopClient) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut retried = false;
        loop {
            let client = self.authed_client()?;
            match op(client).await {
                Err(err) if err.is_auth_failure() && !retried => {
                    retried = true;
                    self.refresh_access_token().await?;
                }
                result => return result,
            }
        }
    }

    /// Build an authenticated client around the current access token.
    fn authed_client(&self) -> Result<AuthenticatedShopClient, ClientError> {
        let session = self.session.read().expect("session lock poisoned");
        if !session.is_authenticated() {
            return Err(ClientError::AuthenticationFailed("not signed in".to_string()));
        }
        Ok(self.public.clone().authenticate(session.access_token.clone()))
    }

    /// Trade the stored refresh token for a new access token.
    ///
    /// Failure is irrecoverable: the session is torn down and the caller
    /// gets [`ClientError::SessionExpired`].
    async fn refresh_access_token(&self) -> Result<(), ClientError> {
        let refresh = self.snapshot().refresh_token;
        if refresh.is_empty() {
            warn!("access token rejected and no refresh token available");
            self.teardown().await;
            return Err(ClientError::SessionExpired);
        }

        debug!("access token rejected, refreshing");
        match self.public.refresh_token(&TokenRefreshRequest { refresh }).await {
            Ok(tokens) => {
                {
                    let mut session = self.session.write().expect("session lock poisoned");
                    session.access_token = tokens.access;
                    if let Some(rotated) = tokens.refresh {
                        session.refresh_token = rotated;
                    }
                }
                self.persist().await?;
                info!("access token refreshed");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed, clearing session");
                self.teardown().await;
                Err(ClientError::SessionExpired)
            }
        }
    }

    /// Populate the session from a login/verify response and persist it.
    async fn install_tokens(&self, tokens: AuthTokensResponse) -> Result<(), ClientError> {
        {
            let mut session = self.session.write().expect("session lock poisoned");
            session.access_token = tokens.access;
            session.refresh_token = tokens.refresh;
            session.user = Some(tokens.user);
        }
        self.persist().await
    }

    /// Merge a profile response into the current user without clobbering
    /// fields the response does not carry, then persist.
    async fn merge_profile(&self, response: &ProfileResponse) -> Result<User, ClientError> {
        let user = {
            let mut session = self.session.write().expect("session lock poisoned");
            let Some(user) = session.user.as_mut() else {
                return Err(ClientError::SessionExpired);
            };
            if let Some(name) = response.name.as_ref().filter(|name| !name.is_empty()) {
                user.name = name.clone();
            }
            if let Some(email) = response.email.as_ref().filter(|email| !email.is_empty()) {
                user.email = email.clone();
            }
            let profile = user.profile.get_or_insert_with(Profile::default);
            if let Some(value) = &response.phone_number {
                profile.phone_number = value.clone();
            }
            if let Some(value) = &response.address_line1 {
                profile.address_line1 = value.clone();
            }
            if let Some(value) = &response.address_line2 {
                profile.address_line2 = value.clone();
            }
            if let Some(value) = &response.city {
                profile.city = value.clone();
            }
            if let Some(value) = &response.state {
                profile.state = value.clone();
            }
            if let Some(value) = &response.zip_code {
                profile.zip_code = value.clone();
            }
            if let Some(value) = &response.country {
                profile.country = value.clone();
            }
            user.clone()
        };
        self.persist().await?;
        Ok(user)
    }

    /// Write the in-memory state through to the durable store.
    async fn persist(&self) -> Result<(), ClientError> {
        let snapshot = {
            let session = self.session.read().expect("session lock poisoned");
            session.user.clone().map(|user| StoredSession {
                access_token: session.access_token.clone(),
                refresh_token: session.refresh_token.clone(),
                user,
            })
        };
        match snapshot {
            Some(stored) => self.store.save(&stored).await?,
            None => self.store.clear().await?,
        }
        Ok(())
    }

    /// Local cleanup that cannot fail: clear the store and reset memory.
    async fn teardown(&self) {
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear session store");
        }
        self.session.write().expect("session lock poisoned").clear();
    }

    fn snapshot(&self) -> Session {
        self.session.read().expect("session lock poisoned").clone()
    }
}
