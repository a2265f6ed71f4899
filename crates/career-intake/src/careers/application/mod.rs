//! Career application intake pipeline.
//!
//! One stateless request/response cycle per submission: multipart parsing,
//! field validation, bot verification, attachment validation, and tiered
//! notification dispatch. Nothing is persisted; the application lives for
//! the duration of the request and is discarded after the dispatch attempt.

pub mod dispatch;
pub mod domain;
pub mod router;
pub mod service;
pub mod validation;
pub mod verification;

#[cfg(test)]
mod tests;

pub use dispatch::{
    ApplicationLog, DispatchChannel, DispatchError, NotificationDispatcher, ResendChannel,
    SmtpHandoff,
};
pub use domain::{Application, Attachment, SubmissionDraft};
pub use router::career_router;
pub use service::{ApplicationError, ApplicationService, SubmissionRejection};
pub use validation::{
    check_attachment, field_errors, is_plausible_email, AttachmentError, FieldError,
    FieldErrorKind, ALLOWED_ATTACHMENT_TYPES, MAX_ATTACHMENT_BYTES,
};
pub use verification::{BotVerifier, RecaptchaVerifier};
