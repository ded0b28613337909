//! Authentication API client methods

use super::PublicShopClient;
use crate::error::ClientError;
use crate::types::{
    AuthTokensResponse, LoginRequest, LogoutRequest, MessageResponse, RegisterRequest,
    RegisterResponse, ResendOtpRequest, TokenRefreshRequest, TokenRefreshResponse,
    VerifyOtpRequest,
};
use std::time::Duration;

/// Logout is best-effort; never let it hang longer than this.
const LOGOUT_TIMEOUT: Duration = Duration::from_secs(5);

impl PublicShopClient {
    /// Exchange credentials for a token pair and the signed-in user
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthTokensResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/core/login/")
            .json(request);
        self.execute(req).await
    }

    /// Create an account and trigger OTP delivery; does not authenticate
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/core/register/")
            .json(request);
        self.execute(req).await
    }

    /// Exchange a one-time code for a token pair.
    ///
    /// A 4xx here means the code itself was wrong or expired and maps to
    /// [`ClientError::InvalidOtp`]; transport failures are reported as-is.
    pub async fn verify_otp(
        &self,
        request: &VerifyOtpRequest,
    ) -> Result<AuthTokensResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/core/verify-otp/")
            .json(request);
        match self.execute(req).await {
            Err(
                ClientError::BadRequest(message)
                | ClientError::AuthenticationFailed(message)
                | ClientError::Forbidden(message)
                | ClientError::NotFound(message),
            ) => Err(ClientError::InvalidOtp(message)),
            other => other,
        }
    }

    /// Re-trigger OTP delivery; no session state involved
    pub async fn resend_otp(
        &self,
        request: &ResendOtpRequest,
    ) -> Result<RegisterResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/core/resend-otp/")
            .json(request);
        self.execute(req).await
    }

    /// Trade the refresh token for a fresh access token
    pub async fn refresh_token(
        &self,
        request: &TokenRefreshRequest,
    ) -> Result<TokenRefreshResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/core/token/refresh/")
            .json(request);
        self.execute(req).await
    }

    /// Notify the server that the refresh token should be blacklisted.
    ///
    /// Bounded by a short timeout; callers treat any failure here as
    /// non-fatal and clear local state regardless.
    pub async fn logout(&self, request: &LogoutRequest) -> Result<MessageResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/core/logout/")
            .timeout(LOGOUT_TIMEOUT)
            .json(request);
        self.execute(req).await
    }
}
