use std::fs;
use std::path::PathBuf;

use career_intake::careers::application::{
    check_attachment, field_errors, Attachment, NotificationDispatcher, SubmissionDraft,
};
use career_intake::config::AppConfig;
use career_intake::error::AppError;
use career_intake::telemetry;
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Position title the test application targets
    #[arg(long, default_value = "Creative UI/UX Designer")]
    pub(crate) position: String,
    /// Applicant name
    #[arg(long, default_value = "Test Applicant")]
    pub(crate) name: String,
    /// Applicant email
    #[arg(long, default_value = "applicant@example.com")]
    pub(crate) email: String,
    /// Applicant phone
    #[arg(long, default_value = "+60 12-000 0000")]
    pub(crate) phone: String,
    /// Portfolio or profile URL
    #[arg(long, default_value = "https://example.com/portfolio")]
    pub(crate) link: String,
    /// Optional resume file to attach
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
}

/// Smoke-test the notification configuration: run the validator and the
/// dispatcher exactly as the endpoint would. Bot verification is not part of
/// this path; it guards the public endpoint, not operator tooling.
pub(crate) async fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut draft = SubmissionDraft {
        name: args.name,
        email: args.email,
        phone: args.phone,
        link: args.link,
        position: args.position,
        recaptcha_token: String::new(),
        attachment: None,
    };

    if let Some(path) = args.resume {
        let bytes = fs::read(&path)?;
        let content_type = mime_guess::from_path(&path).first_or_octet_stream();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        draft.attachment = Some(Attachment {
            filename,
            content_type,
            bytes: bytes.into(),
        });
    }

    let errors = field_errors(&draft);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("invalid field '{}': {:?}", error.field, error.kind);
        }
        return Ok(());
    }

    if let Some(attachment) = &draft.attachment {
        if let Err(err) = check_attachment(attachment) {
            eprintln!("resume rejected: {err}");
            return Ok(());
        }
    }

    let dispatcher =
        NotificationDispatcher::from_config(&config.notifications, config.outbound.timeout)?;
    let application = draft.into_application();

    println!(
        "Dispatching test application for '{}' (resume: {})",
        application.position,
        application.resume_label()
    );

    if dispatcher.dispatch(&application).await {
        println!("Dispatch reported success. Check the configured channel for the notification.");
    } else {
        println!("Dispatch failed. Inspect the log output for the rejected tier.");
    }

    Ok(())
}
