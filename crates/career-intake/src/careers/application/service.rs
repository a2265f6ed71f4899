use std::sync::Arc;

use super::dispatch::NotificationDispatcher;
use super::domain::{Application, SubmissionDraft};
use super::validation::{self, AttachmentError, FieldErrorKind};
use super::verification::BotVerifier;

/// Orchestrates one submission through the gates: field validation, token
/// presence, bot verification, attachment validation, dispatch. Each gate
/// halts processing on failure; nothing is partially dispatched.
pub struct ApplicationService<V> {
    verifier: Arc<V>,
    dispatcher: NotificationDispatcher,
}

impl<V> ApplicationService<V>
where
    V: BotVerifier,
{
    pub fn new(verifier: Arc<V>, dispatcher: NotificationDispatcher) -> Self {
        Self {
            verifier,
            dispatcher,
        }
    }

    pub async fn submit(&self, draft: SubmissionDraft) -> Result<Application, ApplicationError> {
        let errors = validation::field_errors(&draft);

        let missing: Vec<&'static str> = errors
            .iter()
            .filter(|error| error.kind == FieldErrorKind::Required)
            .map(|error| error.field)
            .collect();
        if !missing.is_empty() {
            return Err(SubmissionRejection::MissingFields { fields: missing }.into());
        }

        if errors
            .iter()
            .any(|error| error.kind == FieldErrorKind::InvalidFormat)
        {
            return Err(SubmissionRejection::InvalidEmail.into());
        }

        // Token presence is checked before spending an outbound call.
        if draft.recaptcha_token.trim().is_empty() {
            return Err(SubmissionRejection::VerificationRequired.into());
        }

        if !self.verifier.verify(&draft.recaptcha_token).await {
            return Err(SubmissionRejection::VerificationFailed.into());
        }

        if let Some(attachment) = &draft.attachment {
            validation::check_attachment(attachment).map_err(SubmissionRejection::Attachment)?;
        }

        let application = draft.into_application();

        if !self.dispatcher.dispatch(&application).await {
            return Err(ApplicationError::DispatchFailed);
        }

        Ok(application)
    }
}

/// User-correctable rejections. Messages are the applicant-facing contract.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionRejection {
    #[error("All fields are required")]
    MissingFields { fields: Vec<&'static str> },
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("reCAPTCHA verification required")]
    VerificationRequired,
    #[error("reCAPTCHA verification failed. Please try again.")]
    VerificationFailed,
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Rejected(#[from] SubmissionRejection),
    #[error("Failed to send application. Please try again later.")]
    DispatchFailed,
}
