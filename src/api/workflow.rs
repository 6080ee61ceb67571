//! Fetch-edit-update round trip against one process.

use serde_json::Value;

use super::{ProcessApi, VerificationToken};
use crate::envelope::{apply_edits, FieldEdit, UpdateEnvelope};
use crate::types::{Credentials, ProcessId, Result};

/// What to change on which process.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub process_id: ProcessId,
    pub change_description: String,
    pub edits: Vec<FieldEdit>,
    /// Cookie header for the login page, if the tenant needs one.
    pub cookies: Option<String>,
}

/// Runs the tenant calls in order; each step feeds the next.
#[derive(Debug)]
pub struct UpdateWorkflow<A> {
    api: A,
    credentials: Credentials,
}

impl<A: ProcessApi> UpdateWorkflow<A> {
    pub fn new(api: A, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Authenticate, fetch, apply edits, build the envelope and submit it.
    ///
    /// Returns the envelope that was sent and the endpoint's JSON reply.
    pub async fn run(&self, request: &UpdateRequest) -> Result<(UpdateEnvelope, Value)> {
        let bearer = self.api.bearer_token(&self.credentials).await?;
        tracing::info!("bearer token obtained");

        let verification: VerificationToken = self
            .api
            .verification_token(&self.credentials, request.cookies.clone())
            .await?;
        tracing::info!("verification token obtained");

        let mut process = self
            .api
            .get_process(&request.process_id, &bearer)
            .await?
            .into_process();
        apply_edits(&mut process, &request.edits);

        let envelope = UpdateEnvelope::build(&process, Some(&request.change_description))?;
        let reply = self
            .api
            .update_process(&request.process_id, &envelope, &bearer, &verification)
            .await?;
        tracing::info!(process_id = %request.process_id, "process updated");

        Ok((envelope, reply))
    }
}
