use std::sync::Arc;

use mailform_core_contact_contracts::delivery::{ContactDeliveryService, DeliveryOutcome};
use mailform_extern_contracts::emailjs::{EmailJsApiService, EmailJsTemplateParams};
use mailform_models::{
    contact::{ContactField, ContactSubmission},
    emailjs::{EmailJsSettings, MissingConfigError},
    notification::{NotificationId, NotificationKind},
};
use mailform_notify_contracts::NotificationService;
use tracing::{error, info, instrument};

pub const SENDING_MESSAGE: &str = "Sending...";
pub const SENT_MESSAGE: &str = "Message sent successfully.";
pub const FAILED_MESSAGE: &str = "Failed to send message.";

#[derive(Debug, Clone)]
pub struct ContactDeliveryServiceImpl<EmailJsApi, Notify> {
    emailjs_api: EmailJsApi,
    notify: Notify,
    config: ContactDeliveryConfig,
}

#[derive(Debug, Clone)]
pub struct ContactDeliveryConfig {
    pub emailjs: Arc<EmailJsSettings>,
}

impl<EmailJsApi, Notify> ContactDeliveryServiceImpl<EmailJsApi, Notify> {
    pub fn new(emailjs_api: EmailJsApi, notify: Notify, config: ContactDeliveryConfig) -> Self {
        Self {
            emailjs_api,
            notify,
            config,
        }
    }
}

impl<EmailJsApi, Notify> ContactDeliveryService for ContactDeliveryServiceImpl<EmailJsApi, Notify>
where
    EmailJsApi: EmailJsApiService,
    Notify: NotificationService,
{
    #[instrument(skip_all)]
    async fn send(
        &self,
        submission: ContactSubmission,
    ) -> Result<DeliveryOutcome, MissingConfigError> {
        let credentials = self.config.emailjs.credentials()?;

        let _pending = PendingNotification::show(&self.notify, SENDING_MESSAGE);

        let outcome = match self
            .emailjs_api
            .send(credentials, template_params(submission))
            .await
        {
            Ok(()) => {
                info!("Delivered contact message");
                self.notify
                    .show(NotificationKind::Success, SENT_MESSAGE.into());
                DeliveryOutcome::Sent
            }
            Err(err) => {
                error!("Failed to deliver contact message: {err}");
                self.notify
                    .show(NotificationKind::Error, FAILED_MESSAGE.into());
                DeliveryOutcome::Failed
            }
        };

        Ok(outcome)
    }
}

/// A loading notification which is dismissed when this guard goes out of
/// scope, whether the delivery finished or was cancelled.
struct PendingNotification<'a, Notify: NotificationService> {
    notify: &'a Notify,
    id: NotificationId,
}

impl<'a, Notify: NotificationService> PendingNotification<'a, Notify> {
    fn show(notify: &'a Notify, message: &str) -> Self {
        let id = notify.show(NotificationKind::Loading, message.into());
        Self { notify, id }
    }
}

impl<Notify: NotificationService> Drop for PendingNotification<'_, Notify> {
    fn drop(&mut self) {
        self.notify.dismiss(self.id);
    }
}

fn template_params(submission: ContactSubmission) -> EmailJsTemplateParams {
    [
        (ContactField::Name, submission.name.into_inner()),
        (ContactField::Email, submission.email.to_string()),
        (ContactField::Content, submission.content.into_inner()),
    ]
    .into_iter()
    .map(|(field, value)| (field.as_str().into(), value))
    .collect()
}
