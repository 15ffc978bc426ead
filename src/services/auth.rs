//! Account and session operations.
//!
//! No session state is cached locally; every call is a fresh round trip and
//! the session itself lives in the shared client's cookie jar.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::client::{AppwriteClient, ID_UNIQUE};
use crate::models::{Session, User};
use crate::types::{AppError, AppResult};

pub struct AuthService {
    client: Arc<AppwriteClient>,
}

#[derive(Serialize)]
struct CreateAccountBody<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct CreateSessionBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl AuthService {
    pub fn new(client: Arc<AppwriteClient>) -> Self {
        Self { client }
    }

    /// Registers a new account and immediately logs it in, returning the
    /// fresh session. Failures at either step propagate to the caller.
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> AppResult<Session> {
        let body = CreateAccountBody {
            user_id: ID_UNIQUE,
            email,
            password,
            name,
        };
        let user: User = self
            .client
            .send_json(self.client.post("/account").json(&body))
            .await?;
        info!(user = %user.id, "account created, opening session");
        self.login(email, password).await
    }

    /// Opens an email/password session. Invalid credentials are an error,
    /// never a resolved session.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let body = CreateSessionBody { email, password };
        info!(%email, "opening session");
        self.client
            .send_json(self.client.post("/account/sessions/email").json(&body))
            .await
    }

    /// Fetches the account behind the current session. `Ok(None)` means the
    /// client holds no session (guest); anything else that goes wrong is a
    /// real error.
    pub async fn current_user(&self) -> AppResult<Option<User>> {
        debug!("fetching current account");
        match self.client.send_json(self.client.get("/account")).await {
            Ok(user) => Ok(Some(user)),
            Err(AppError::Api { status: 401, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Deletes every session belonging to the current account.
    pub async fn logout(&self) -> AppResult<()> {
        info!("deleting all sessions");
        self.client
            .send_empty(self.client.delete("/account/sessions"))
            .await
    }
}
