use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, warn};

use crate::config::VerificationConfig;

/// Fixed third-party endpoint exchanging a challenge token for a trust
/// decision.
pub const SITEVERIFY_ENDPOINT: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Trust boundary for client-supplied challenge tokens. Implementations must
/// resolve every ambiguous outcome to `false`.
#[async_trait]
pub trait BotVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> bool;
}

/// reCAPTCHA siteverify client. One outbound call per invocation, bounded by
/// the configured timeout, no retry.
pub struct RecaptchaVerifier {
    secret: Option<String>,
    endpoint: String,
    client: reqwest::Client,
}

impl RecaptchaVerifier {
    pub fn new(config: &VerificationConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_endpoint(config, timeout, SITEVERIFY_ENDPOINT)
    }

    /// Endpoint override for exercising failure paths against local sockets.
    pub fn with_endpoint(
        config: &VerificationConfig,
        timeout: Duration,
        endpoint: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            secret: config.secret.clone(),
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SiteverifyAck {
    #[serde(default)]
    success: bool,
}

#[async_trait]
impl BotVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> bool {
        let Some(secret) = self.secret.as_deref() else {
            error!("RECAPTCHA_SECRET_KEY is not set; refusing submission");
            return false;
        };

        if token.trim().is_empty() {
            return false;
        }

        let params = [("secret", secret), ("response", token)];
        let response = match self.client.post(&self.endpoint).form(&params).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "bot verification request failed");
                return false;
            }
        };

        match response.json::<SiteverifyAck>().await {
            Ok(ack) => ack.success,
            Err(err) => {
                warn!(error = %err, "bot verification returned a malformed body");
                false
            }
        }
    }
}
