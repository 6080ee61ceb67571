//! Process Manager HTTP collaborators.
//!
//! The envelope builder is pure; everything that talks to the tenant lives
//! here. Four calls, always made in this order by [`UpdateWorkflow`]:
//!
//! 1. `POST {tenant}/oauth2/token`           -> bearer token
//! 2. `POST {tenant}/Login.aspx`             -> anti-forgery token (scraped from HTML)
//! 3. `GET  {tenant}/Api/v1/Processes/{id}`  -> process definition
//! 4. `PUT  {tenant}/Api/v1/Processes/{id}`  <- update envelope

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Response};
use serde_json::Value;

use crate::envelope::{import, GetProcessResponse, UpdateEnvelope};
use crate::types::{Config, Credentials, Error, ProcessId, Result};

pub mod auth;
pub mod workflow;

pub use auth::{extract_verification_token, BearerToken, VerificationToken};
pub use workflow::{UpdateRequest, UpdateWorkflow};

/// The four tenant calls, as a seam for tests and alternative transports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessApi: Send + Sync {
    async fn bearer_token(&self, credentials: &Credentials) -> Result<BearerToken>;

    async fn verification_token(
        &self,
        credentials: &Credentials,
        cookies: Option<String>,
    ) -> Result<VerificationToken>;

    async fn get_process(&self, id: &ProcessId, bearer: &BearerToken)
        -> Result<GetProcessResponse>;

    async fn update_process(
        &self,
        id: &ProcessId,
        envelope: &UpdateEnvelope,
        bearer: &BearerToken,
        verification: &VerificationToken,
    ) -> Result<Value>;
}

/// reqwest-backed [`ProcessApi`].
#[derive(Debug, Clone)]
pub struct HttpProcessClient {
    client: Client,
    tenant_url: String,
}

impl HttpProcessClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http.timeout)
            .user_agent(config.http.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            tenant_url: config.tenant.tenant_url()?,
        })
    }

    pub fn tenant_url(&self) -> &str {
        &self.tenant_url
    }

    /// `{tenant}/Api/v1/Processes/{id}`
    pub fn process_url(&self, id: &ProcessId) -> String {
        format!("{}/Api/v1/Processes/{}", self.tenant_url, id)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "process manager request failed");
        Err(Error::api(status.as_u16(), message))
    }
}

#[async_trait]
impl ProcessApi for HttpProcessClient {
    async fn bearer_token(&self, credentials: &Credentials) -> Result<BearerToken> {
        let url = format!("{}/oauth2/token", self.tenant_url);
        tracing::info!(username = %credentials.username, "requesting bearer token");

        let response = self
            .client
            .post(&url)
            .form(&auth::password_grant_form(credentials))
            .send()
            .await?;
        let body: auth::TokenResponse = Self::check(response).await?.json().await?;
        Ok(BearerToken::new(body.access_token))
    }

    async fn verification_token(
        &self,
        credentials: &Credentials,
        cookies: Option<String>,
    ) -> Result<VerificationToken> {
        let url = format!("{}/Login.aspx", self.tenant_url);
        tracing::info!("requesting verification token");

        let mut request = self.client.post(&url).form(&auth::login_form(credentials));
        if let Some(cookies) = cookies.filter(|c| !c.is_empty()) {
            request = request.header(COOKIE, cookies);
        }
        let html = Self::check(request.send().await?).await?.text().await?;
        extract_verification_token(&html)
    }

    async fn get_process(
        &self,
        id: &ProcessId,
        bearer: &BearerToken,
    ) -> Result<GetProcessResponse> {
        tracing::info!(process_id = %id, "fetching process");

        let response = self
            .client
            .get(self.process_url(id))
            .header(AUTHORIZATION, format!("Bearer {}", bearer.as_str()))
            .send()
            .await?;
        let bytes = Self::check(response).await?.bytes().await?;
        import::from_json(&bytes)
    }

    async fn update_process(
        &self,
        id: &ProcessId,
        envelope: &UpdateEnvelope,
        bearer: &BearerToken,
        verification: &VerificationToken,
    ) -> Result<Value> {
        tracing::info!(
            process_id = %id,
            change_description = envelope.change_description(),
            "updating process"
        );

        let response = self
            .client
            .put(self.process_url(id))
            .header(AUTHORIZATION, format!("Bearer {}", bearer.as_str()))
            .header(auth::VERIFICATION_TOKEN_NAME, verification.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header("x-requested-with", "XMLHttpRequest")
            .body(crate::envelope::export::to_json(envelope)?)
            .send()
            .await?;
        let bytes = Self::check(response).await?.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
