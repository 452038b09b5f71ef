//! HTTP client for a GoTrue-style identity admin API.
//!
//! Endpoints used:
//! - `POST   {base}/auth/v1/admin/users`      create a principal
//! - `DELETE {base}/auth/v1/admin/users/{id}` delete a principal
//!
//! Every request carries the service key both as `apikey` and as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use common::IdentityProviderConfig;

use super::identity_provider::{CreatePrincipal, IdentityProvider, Principal, PrincipalMetadata};
use crate::error::{IdentityError, IdentityResult};

const ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";

/// Fields checked, in order, for a human-readable error message.
const ERROR_MESSAGE_FIELDS: &[&str] = &["msg", "message", "error_description", "error"];

#[derive(Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
    user_metadata: &'a PrincipalMetadata,
}

#[derive(Deserialize)]
struct UserBody {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

/// Admin API client.
pub struct GoTrueAdminClient {
    http: Client,
    base_url: String,
    service_key: String,
}

impl GoTrueAdminClient {
    /// Build a client from configuration.
    pub fn new(config: &IdentityProviderConfig) -> IdentityResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }

    fn users_url(&self) -> String {
        format!("{}{}", self.base_url, ADMIN_USERS_PATH)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

#[async_trait]
impl IdentityProvider for GoTrueAdminClient {
    async fn create_principal(&self, request: CreatePrincipal) -> IdentityResult<Principal> {
        debug!("Creating identity principal for {}", request.email);

        let body = CreateUserBody {
            email: &request.email,
            password: &request.password,
            email_confirm: request.email_confirmed,
            user_metadata: &request.metadata,
        };

        let response = self
            .authorized(self.http.post(self.users_url()))
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let user: UserBody = response
            .json()
            .await
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;

        Ok(Principal {
            id: user.id,
            email: user.email.unwrap_or(request.email),
        })
    }

    async fn delete_principal(&self, id: Uuid) -> IdentityResult<()> {
        debug!("Deleting identity principal {}", id);

        let response = self
            .authorized(self.http.delete(format!("{}/{}", self.users_url(), id)))
            .send()
            .await?;
        ensure_success(response).await?;

        Ok(())
    }
}

/// Turn a non-2xx response into [`IdentityError::Rejected`].
async fn ensure_success(response: Response) -> IdentityResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = error_message(&text)
        .unwrap_or_else(|| format!("Identity provider returned {}", status));

    Err(IdentityError::rejected(status.as_u16(), message))
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ERROR_MESSAGE_FIELDS
        .iter()
        .find_map(|field| value.get(*field).and_then(|v| v.as_str()))
        .map(str::to_string)
}
