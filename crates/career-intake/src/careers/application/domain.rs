use axum::body::Bytes;
use chrono::{DateTime, Utc};
use mime::Mime;

/// Multipart field names forming the submission endpoint's wire contract.
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_LINK: &str = "link";
pub const FIELD_POSITION: &str = "position";
pub const FIELD_RECAPTCHA_TOKEN: &str = "recaptchaToken";
pub const FIELD_RESUME: &str = "resume";

/// Raw applicant input as parsed from the multipart form, before any gate
/// has run. `position` is supplied by the page the form was opened from,
/// not typed by the applicant.
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub link: String,
    pub position: String,
    pub recaptcha_token: String,
    pub attachment: Option<Attachment>,
}

impl SubmissionDraft {
    /// Consume the draft into a dispatchable application, stamping the
    /// receive time. The verification token is spent by this point and is
    /// not carried along.
    pub fn into_application(self) -> Application {
        Application {
            name: self.name,
            email: self.email,
            phone: self.phone,
            link: self.link,
            position: self.position,
            attachment: self.attachment,
            received_at: Utc::now(),
        }
    }
}

/// Uploaded resume held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: Mime,
    pub bytes: Bytes,
}

impl Attachment {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// A fully validated submission ready for dispatch. No identity, no
/// persistence; dropped once the notification attempt completes.
#[derive(Debug, Clone)]
pub struct Application {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub link: String,
    pub position: String,
    pub attachment: Option<Attachment>,
    pub received_at: DateTime<Utc>,
}

impl Application {
    /// Filename suitable for log records and email summaries. Never exposes
    /// attachment bytes.
    pub fn resume_label(&self) -> &str {
        self.attachment
            .as_ref()
            .map(|attachment| attachment.filename.as_str())
            .unwrap_or("not provided")
    }
}
