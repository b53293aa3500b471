use std::future::Future;

use mailform_models::{
    contact::{ContactField, FieldErrors},
    emailjs::MissingConfigError,
    form::ContactFormState,
};
use thiserror::Error;
use tokio::sync::watch;

pub mod delivery;

pub use delivery::DeliveryOutcome;

/// Holds the state of a single contact form.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormService: Send + Sync + 'static {
    /// Returns a snapshot of the current state.
    fn state(&self) -> ContactFormState;

    /// Subscribe to state changes.
    fn subscribe(&self) -> watch::Receiver<ContactFormState>;

    fn set_value(&self, field: ContactField, value: String);

    /// Mark the field as visited and show its validation error, if any.
    fn blur(&self, field: ContactField);

    fn reset(&self);

    /// Validate the form and deliver the message.
    ///
    /// Only one submission can be in flight at a time. A failed delivery is
    /// reported to the user and returned as [`DeliveryOutcome::Failed`], not
    /// as an error.
    fn submit(
        &self,
    ) -> impl Future<Output = Result<DeliveryOutcome, ContactSubmitError>> + Send;
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ContactSubmitError {
    #[error("The form contains invalid fields: {0}")]
    Invalid(FieldErrors),
    #[error("A message is already being sent.")]
    AlreadySending,
    #[error(transparent)]
    MissingConfig(#[from] MissingConfigError),
}
