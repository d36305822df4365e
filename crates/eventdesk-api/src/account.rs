// Account recovery endpoints.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ForgotPasswordRequest, MessageResponse};

impl ApiClient {
    /// Ask the backend to email a password-reset link.
    ///
    /// `POST /auth/forgot-password` with `{"email": ...}`
    ///
    /// Success and failure both carry `{ "message": ... }`; on failure the
    /// message lands in [`Error::Status`] or [`Error::Unauthorized`].
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, Error> {
        let url = self.url(&["auth", "forgot-password"])?;
        debug!("requesting password reset");
        self.post(url, &ForgotPasswordRequest { email }, None).await
    }
}
