// Outbound entry submission to the remote forms endpoint.
//
// The request is a url-encoded POST keyed by the remote form's entry tokens.
// It is fire-and-forget: `spawn_submission` runs it on a tokio task and
// reports a single `SubmitOutcome` over a channel. The response body is not
// interpreted; any HTTP answer counts as completion.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{Config, SubmissionEntries};
use crate::form::SubmitOutcome;
use crate::validate::ValidatedPayload;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Anything that can deliver an encoded entry.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, form: Vec<(String, String)>) -> Result<(), SubmitError>;
}

/// Pair each payload value with its remote entry token, in the order the
/// form lists them: identity fields, player slots, rookie slots.
pub fn encode_payload(
    payload: &ValidatedPayload,
    entries: &SubmissionEntries,
) -> Vec<(String, String)> {
    let fields = &payload.fields;
    let mut form = vec![
        (entries.first_name.clone(), fields.first_name.clone()),
        (entries.last_name.clone(), fields.last_name.clone()),
        (entries.email.clone(), fields.email.clone()),
        (entries.team_name.clone(), fields.team_name.clone()),
    ];
    form.extend(
        entries
            .players
            .iter()
            .cloned()
            .zip(payload.player_names.iter().cloned()),
    );
    form.extend(
        entries
            .rookies
            .iter()
            .cloned()
            .zip(payload.rookie_names.iter().cloned()),
    );
    form
}

// ---------------------------------------------------------------------------
// FormsSubmitter
// ---------------------------------------------------------------------------

/// Posts entries to a Google Forms style `formResponse` endpoint.
pub struct FormsSubmitter {
    http: reqwest::Client,
    endpoint: String,
}

impl FormsSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.submission.endpoint.clone())
    }
}

#[async_trait]
impl Submitter for FormsSubmitter {
    async fn submit(&self, form: Vec<(String, String)>) -> Result<(), SubmitError> {
        debug!(endpoint = %self.endpoint, fields = form.len(), "posting entry");
        let response = self.http.post(&self.endpoint).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        // The endpoint's answer carries no usable result for us.
        debug!(%status, body_len = body.len(), "endpoint responded");
        Ok(())
    }
}

/// Send `form` on a background task. The outcome arrives on `tx`; errors are
/// logged and reported, never retried.
pub fn spawn_submission(
    submitter: Arc<dyn Submitter>,
    form: Vec<(String, String)>,
    tx: mpsc::Sender<SubmitOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = match submitter.submit(form).await {
            Ok(()) => {
                info!("Submission request completed");
                SubmitOutcome::Completed
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                SubmitOutcome::Failed(e.to_string())
            }
        };
        if tx.send(outcome).await.is_err() {
            debug!("submission outcome dropped: receiver closed");
        }
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
