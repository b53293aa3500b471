use std::future::Future;

use mailform_models::{contact::ContactSubmission, emailjs::MissingConfigError};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactDeliveryService: Send + Sync + 'static {
    /// Deliver a validated submission to the email provider and notify the
    /// user about the progress.
    ///
    /// Fails without any side effects if the delivery configuration is
    /// incomplete.
    fn send(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<DeliveryOutcome, MissingConfigError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent,
    Failed,
}

#[cfg(feature = "mock")]
impl MockContactDeliveryService {
    pub fn with_send(
        mut self,
        submission: ContactSubmission,
        result: Result<DeliveryOutcome, MissingConfigError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
