use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::careers::application::dispatch::{
    DispatchChannel, DispatchError, NotificationDispatcher,
};
use crate::careers::application::domain::{Application, Attachment, SubmissionDraft};
use crate::careers::application::service::ApplicationService;
use crate::careers::application::verification::BotVerifier;
use crate::config::NotificationConfig;

pub(super) fn draft() -> SubmissionDraft {
    SubmissionDraft {
        name: "Amina Yusof".to_string(),
        email: "amina@example.com".to_string(),
        phone: "+60 12-345 6789".to_string(),
        link: "https://portfolio.example.com/amina".to_string(),
        position: "Creative UI/UX Designer".to_string(),
        recaptcha_token: "token-123".to_string(),
        attachment: None,
    }
}

pub(super) fn application() -> Application {
    draft().into_application()
}

pub(super) fn pdf_attachment(size: usize) -> Attachment {
    Attachment {
        filename: "resume.pdf".to_string(),
        content_type: mime::APPLICATION_PDF,
        bytes: vec![0u8; size].into(),
    }
}

pub(super) fn png_attachment() -> Attachment {
    Attachment {
        filename: "resume.png".to_string(),
        content_type: mime::IMAGE_PNG,
        bytes: vec![0u8; 128].into(),
    }
}

pub(super) fn notification_config() -> NotificationConfig {
    NotificationConfig {
        resend_api_key: None,
        sender: "Career Applications <onboarding@resend.dev>".to_string(),
        recipient: "careers@example.com".to_string(),
        smtp: None,
    }
}

/// Verifier fake with a fixed outcome and a call counter so gate ordering
/// can be asserted.
pub(super) struct StaticVerifier {
    outcome: bool,
    calls: AtomicUsize,
}

impl StaticVerifier {
    pub(super) fn new(outcome: bool) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BotVerifier for StaticVerifier {
    async fn verify(&self, _token: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }
}

/// Channel fake that records delivered applications.
#[derive(Clone, Default)]
pub(super) struct RecordingChannel {
    inner: Arc<RecordingInner>,
}

#[derive(Default)]
struct RecordingInner {
    deliveries: Mutex<Vec<(String, String)>>,
}

impl RecordingChannel {
    /// `(applicant name, resume label)` pairs in delivery order.
    pub(super) fn deliveries(&self) -> Vec<(String, String)> {
        self.inner
            .deliveries
            .lock()
            .expect("deliveries mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl DispatchChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn configured(&self) -> bool {
        true
    }

    async fn deliver(&self, application: &Application) -> Result<(), DispatchError> {
        self.inner
            .deliveries
            .lock()
            .expect("deliveries mutex poisoned")
            .push((
                application.name.clone(),
                application.resume_label().to_string(),
            ));
        Ok(())
    }
}

/// Channel fake representing an attempted-and-rejected provider call.
pub(super) struct FailingChannel;

#[async_trait]
impl DispatchChannel for FailingChannel {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn configured(&self) -> bool {
        true
    }

    async fn deliver(&self, _application: &Application) -> Result<(), DispatchError> {
        Err(DispatchError::Provider {
            status: 422,
            detail: "invalid sender".to_string(),
        })
    }
}

/// Channel fake without configuration; must never be asked to deliver.
pub(super) struct UnconfiguredChannel;

#[async_trait]
impl DispatchChannel for UnconfiguredChannel {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    fn configured(&self) -> bool {
        false
    }

    async fn deliver(&self, _application: &Application) -> Result<(), DispatchError> {
        panic!("unconfigured channel must not be invoked");
    }
}

pub(super) fn service_with(
    verifier: Arc<StaticVerifier>,
    channels: Vec<Box<dyn DispatchChannel>>,
) -> ApplicationService<StaticVerifier> {
    ApplicationService::new(verifier, NotificationDispatcher::new(channels))
}

pub(super) const BOUNDARY: &str = "career-intake-test";

pub(super) fn complete_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Amina Yusof"),
        ("email", "amina@example.com"),
        ("phone", "+60 12-345 6789"),
        ("link", "https://portfolio.example.com/amina"),
        ("position", "Creative UI/UX Designer"),
        ("recaptchaToken", "token-123"),
    ]
}

pub(super) fn multipart_request(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((filename, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post("/api/career/apply")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
