use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;
use tracing::{error, info, warn};

use crate::config::NotificationConfig;

use super::domain::Application;

/// Transactional email provider endpoint.
pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("provider rejected the message ({status}): {detail}")]
    Provider { status: u16, detail: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One candidate notification channel in the ranked fallback chain.
#[async_trait]
pub trait DispatchChannel: Send + Sync {
    fn name(&self) -> &'static str;
    /// Whether this tier has the configuration it needs to run.
    fn configured(&self) -> bool;
    async fn deliver(&self, application: &Application) -> Result<(), DispatchError>;
}

/// Ranked list of capability-checked channels evaluated in fixed order.
/// Adding a channel means adding a list entry, not touching existing tiers.
pub struct NotificationDispatcher {
    channels: Vec<Box<dyn DispatchChannel>>,
}

impl NotificationDispatcher {
    pub fn new(channels: Vec<Box<dyn DispatchChannel>>) -> Self {
        Self { channels }
    }

    /// Standard chain: transactional provider, legacy SMTP handoff, then the
    /// always-available structured log.
    pub fn from_config(
        config: &NotificationConfig,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(vec![
            Box::new(ResendChannel::from_config(config, timeout)?),
            Box::new(SmtpHandoff::from_config(config)),
            Box::new(ApplicationLog),
        ]))
    }

    /// Deliver through the first configured tier. A tier that is attempted
    /// and fails is a hard dispatch failure; later tiers are not consulted,
    /// so a rejected provider call surfaces to the applicant instead of
    /// silently degrading.
    pub async fn dispatch(&self, application: &Application) -> bool {
        for channel in &self.channels {
            if !channel.configured() {
                continue;
            }

            return match channel.deliver(application).await {
                Ok(()) => {
                    info!(
                        channel = channel.name(),
                        position = %application.position,
                        "application notification dispatched"
                    );
                    true
                }
                Err(err) => {
                    error!(
                        channel = channel.name(),
                        error = %err,
                        "application notification failed"
                    );
                    false
                }
            };
        }

        warn!("no dispatch channel registered");
        false
    }
}

/// Tier 1: transactional email via Resend. An empty API key marks the tier
/// unconfigured.
pub struct ResendChannel {
    api_key: String,
    sender: String,
    recipient: String,
    endpoint: String,
    client: reqwest::Client,
}

impl ResendChannel {
    pub fn from_config(
        config: &NotificationConfig,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Self::with_endpoint(config, timeout, RESEND_ENDPOINT)
    }

    /// Endpoint override for exercising provider failures against local
    /// sockets.
    pub fn with_endpoint(
        config: &NotificationConfig,
        timeout: Duration,
        endpoint: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key: config.resend_api_key.clone().unwrap_or_default(),
            sender: config.sender.clone(),
            recipient: config.recipient.clone(),
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Provider payload: subject embeds position and applicant name, the body
    /// is the rendered summary, and the resume rides along base64-encoded
    /// under its original filename.
    pub fn payload(&self, application: &Application) -> serde_json::Value {
        let attachments = match &application.attachment {
            Some(attachment) => json!([{
                "filename": attachment.filename,
                "content": BASE64.encode(&attachment.bytes),
            }]),
            None => json!([]),
        };

        json!({
            "from": self.sender,
            "to": [self.recipient],
            "subject": subject(application),
            "html": html_body(application),
            "attachments": attachments,
        })
    }
}

#[async_trait]
impl DispatchChannel for ResendChannel {
    fn name(&self) -> &'static str {
        "resend"
    }

    fn configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn deliver(&self, application: &Application) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.payload(application))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(DispatchError::Provider {
            status: status.as_u16(),
            detail,
        })
    }
}

pub fn subject(application: &Application) -> String {
    format!(
        "New Application: {} - {}",
        application.position, application.name
    )
}

pub fn html_body(application: &Application) -> String {
    let mut body = String::with_capacity(512);
    body.push_str("<h2>New Career Application</h2>");
    body.push_str(&format!(
        "<p><strong>Position:</strong> {}</p><hr>",
        application.position
    ));
    body.push_str("<h3>Applicant Details</h3>");
    body.push_str(&format!(
        "<p><strong>Name:</strong> {}</p>",
        application.name
    ));
    body.push_str(&format!(
        "<p><strong>Email:</strong> {}</p>",
        application.email
    ));
    body.push_str(&format!(
        "<p><strong>Phone:</strong> {}</p>",
        application.phone
    ));
    body.push_str(&format!(
        "<p><strong>Portfolio/LinkedIn:</strong> <a href=\"{0}\">{0}</a></p>",
        application.link
    ));
    if let Some(attachment) = &application.attachment {
        body.push_str(&format!(
            "<p><strong>Resume:</strong> Attached ({})</p>",
            attachment.filename
        ));
    }
    body.push_str(&format!(
        "<hr><p style=\"color: #666; font-size: 12px;\">Received {} via the careers page.</p>",
        application.received_at.format("%Y-%m-%d %H:%M UTC")
    ));
    body
}

/// Tier 2: legacy mail-transport settings are present but no mailer is wired
/// to them. The application is recorded for operator visibility and the tier
/// reports success so the applicant-facing "received" contract holds.
// TODO: replace the log handoff with a real SMTP mailer (lettre) and demote
// failures of that mailer to hard dispatch failures like tier 1.
pub struct SmtpHandoff {
    host: Option<String>,
}

impl SmtpHandoff {
    pub fn from_config(config: &NotificationConfig) -> Self {
        Self {
            host: config.smtp.as_ref().map(|smtp| smtp.host.clone()),
        }
    }
}

#[async_trait]
impl DispatchChannel for SmtpHandoff {
    fn name(&self) -> &'static str {
        "smtp-handoff"
    }

    fn configured(&self) -> bool {
        self.host.is_some()
    }

    async fn deliver(&self, application: &Application) -> Result<(), DispatchError> {
        warn!(
            host = self.host.as_deref().unwrap_or_default(),
            "smtp transport is not implemented; recording the application without sending"
        );
        log_application(application);
        Ok(())
    }
}

/// Tier 3: no channel configured. Always available; records the structured
/// application and reports success.
pub struct ApplicationLog;

#[async_trait]
impl DispatchChannel for ApplicationLog {
    fn name(&self) -> &'static str {
        "log"
    }

    fn configured(&self) -> bool {
        true
    }

    async fn deliver(&self, application: &Application) -> Result<(), DispatchError> {
        log_application(application);
        Ok(())
    }
}

/// Structured record of an application. Attachment bytes are never logged,
/// only the filename.
fn log_application(application: &Application) {
    info!(
        position = %application.position,
        name = %application.name,
        email = %application.email,
        phone = %application.phone,
        link = %application.link,
        resume = application.resume_label(),
        received_at = %application.received_at,
        "new career application"
    );
}
