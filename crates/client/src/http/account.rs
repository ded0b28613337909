//! Profile and account client methods

use super::AuthenticatedShopClient;
use crate::error::ClientError;
use crate::types::{ChangePasswordRequest, MessageResponse, ProfileResponse, ProfileUpdate};

impl AuthenticatedShopClient {
    /// Fetch the extended profile for the current user
    pub async fn fetch_profile(&self) -> Result<ProfileResponse, ClientError> {
        let req = self.request(reqwest::Method::GET, "/api/core/profile/");
        self.execute(req).await
    }

    /// Apply a partial profile update; the backend expects a flat payload
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> Result<ProfileResponse, ClientError> {
        let req = self
            .request(reqwest::Method::PATCH, "/api/core/profile/")
            .json(update);
        self.execute(req).await
    }

    /// Create an empty profile record if one does not exist yet
    pub async fn create_initial_profile(&self) -> Result<ProfileResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/core/profile/")
            .json(&ProfileUpdate {
                phone_number: Some(String::new()),
                address_line1: Some(String::new()),
                address_line2: Some(String::new()),
                city: Some(String::new()),
                state: Some(String::new()),
                zip_code: Some(String::new()),
                country: Some(String::new()),
                ..Default::default()
            });
        self.execute(req).await
    }

    /// Change the account password
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/core/change-password/")
            .json(request);
        self.execute(req).await
    }

    /// Lightweight server-side check that the access token is still accepted
    pub async fn verify_token(&self) -> Result<MessageResponse, ClientError> {
        let req = self.request(reqwest::Method::GET, "/api/core/verify-token/");
        self.execute(req).await
    }
}
