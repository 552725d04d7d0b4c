use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::DocstoreError;
use crate::Result;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A signed-in identity returned by the identity service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id_token: String,
    pub user_id: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Port for the identity service consumed by the planner server.
///
/// Only the gating operations exist here; the planner does not partition
/// tasks per user, it just refuses unauthenticated access.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;
    async fn sign_out(&self, id_token: &str) -> Result<()>;
}

/// REST implementation of [`IdentityProvider`] against the hosted identity
/// service (`accounts:signInWithPassword` / `accounts:signOut`).
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v1/accounts:{}", self.base_url, action)
    }

    async fn post_checked(
        &self,
        url: String,
        body: serde_json::Value,
    ) -> Result<reqwest::Response> {
        let resp = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        #[derive(Deserialize)]
        struct ErrBody {
            error: ErrDetail,
        }
        #[derive(Deserialize)]
        struct ErrDetail {
            message: String,
        }
        let message = match resp.json::<ErrBody>().await {
            Ok(b) => b.error.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(DocstoreError::Auth(message))
    }
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let resp = self
            .post_checked(
                self.endpoint("signInWithPassword"),
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        let session: Session = resp.json().await?;
        tracing::debug!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    async fn sign_out(&self, id_token: &str) -> Result<()> {
        self.post_checked(
            self.endpoint("signOut"),
            serde_json::json!({ "idToken": id_token }),
        )
        .await?;
        tracing::debug!("signed out");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
