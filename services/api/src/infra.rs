use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use career_intake::careers::application::{
    ApplicationService, NotificationDispatcher, RecaptchaVerifier,
};
use career_intake::config::AppConfig;
use career_intake::content::ContentClient;
use career_intake::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the submission pipeline from configuration: live verifier plus the
/// standard dispatch chain.
pub(crate) fn build_application_service(
    config: &AppConfig,
) -> Result<Arc<ApplicationService<RecaptchaVerifier>>, AppError> {
    let verifier = RecaptchaVerifier::new(&config.verification, config.outbound.timeout)?;
    let dispatcher =
        NotificationDispatcher::from_config(&config.notifications, config.outbound.timeout)?;
    Ok(Arc::new(ApplicationService::new(
        Arc::new(verifier),
        dispatcher,
    )))
}

pub(crate) fn build_content_client(config: &AppConfig) -> Result<Arc<ContentClient>, AppError> {
    Ok(Arc::new(ContentClient::new(
        &config.content,
        config.outbound.timeout,
    )?))
}
