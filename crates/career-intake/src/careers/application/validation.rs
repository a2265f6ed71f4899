use mime::Mime;

use super::domain::{
    Attachment, SubmissionDraft, FIELD_EMAIL, FIELD_LINK, FIELD_NAME, FIELD_PHONE, FIELD_POSITION,
};

/// Hard cap on resume uploads: 5 MiB.
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for resumes: PDF plus the two Word flavors.
pub const ALLOWED_ATTACHMENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    InvalidFormat,
}

/// One violation keyed by field name so callers can render a complete
/// correction list in a single round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

/// Collect every field-level violation. The format check only applies to a
/// non-empty email; an empty one already carries the `Required` error.
pub fn field_errors(draft: &SubmissionDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for (field, value) in [
        (FIELD_NAME, &draft.name),
        (FIELD_EMAIL, &draft.email),
        (FIELD_PHONE, &draft.phone),
        (FIELD_LINK, &draft.link),
        (FIELD_POSITION, &draft.position),
    ] {
        if value.trim().is_empty() {
            errors.push(FieldError {
                field,
                kind: FieldErrorKind::Required,
            });
        }
    }

    let email = draft.email.trim();
    if !email.is_empty() && !is_plausible_email(email) {
        errors.push(FieldError {
            field: FIELD_EMAIL,
            kind: FieldErrorKind::InvalidFormat,
        });
    }

    errors
}

/// Basic `local@domain.tld` shape: exactly one `@`, no whitespace, and a
/// dotted domain with non-empty segments on both sides of the last dot.
pub fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn allowed_attachment_type(content_type: &Mime) -> bool {
    ALLOWED_ATTACHMENT_TYPES
        .iter()
        .any(|allowed| content_type.essence_str() == *allowed)
}

/// Size and type caps run independently of the field checks; the size cap
/// wins when both are violated.
pub fn check_attachment(attachment: &Attachment) -> Result<(), AttachmentError> {
    if attachment.size() > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge {
            size: attachment.size(),
        });
    }

    if !allowed_attachment_type(&attachment.content_type) {
        return Err(AttachmentError::UnsupportedType {
            found: attachment.content_type.essence_str().to_string(),
        });
    }

    Ok(())
}

/// Attachment constraint violations. Messages are part of the applicant-facing
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    #[error("Resume file must be less than 5MB")]
    TooLarge { size: usize },
    #[error("Only PDF and DOC/DOCX files are allowed")]
    UnsupportedType { found: String },
}
